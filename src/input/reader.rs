use std::fs::{self, File};
use std::io::{self, Read};
use std::path::Path;
use std::time::SystemTime;

use crate::error::JsonqError;

/// Files larger than this are refused before reading
pub const MAX_FILE_BYTES: u64 = 10 * 1024 * 1024;

/// Read raw JSON text; parsing is left to the document
pub struct InputReader;

impl InputReader {
    /// Read from `path`, or stdin when no path is given
    pub fn read_text(path: Option<&Path>) -> Result<String, JsonqError> {
        match path {
            Some(path) => Self::read_file(path),
            None => Self::read_from(io::stdin().lock()),
        }
    }

    pub fn read_file(path: &Path) -> Result<String, JsonqError> {
        let size = fs::metadata(path)?.len();
        if size > MAX_FILE_BYTES {
            return Err(JsonqError::FileTooLarge {
                size,
                limit: MAX_FILE_BYTES,
            });
        }
        Self::read_from(File::open(path)?)
    }

    /// Read everything from `reader`, refusing more than the file limit
    pub fn read_from(reader: impl Read) -> Result<String, JsonqError> {
        let mut contents = String::new();
        reader.take(MAX_FILE_BYTES + 1).read_to_string(&mut contents)?;
        let size = contents.len() as u64;
        if size > MAX_FILE_BYTES {
            return Err(JsonqError::FileTooLarge {
                size,
                limit: MAX_FILE_BYTES,
            });
        }
        Ok(contents)
    }

    /// Last modification time, used by watch mode to spot changes
    pub fn modified(path: &Path) -> Result<SystemTime, JsonqError> {
        Ok(fs::metadata(path)?.modified()?)
    }
}
