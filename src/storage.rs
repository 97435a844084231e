//! File locations and TOML persistence shared by history and saved queries

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

const APP_DIR: &str = "jsonq";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Could not read stored data: {0}")]
    Decode(#[from] toml::de::Error),

    #[error("Could not write stored data: {0}")]
    Encode(#[from] toml::ser::Error),

    #[error("Could not determine the {0} directory")]
    NoDirectory(&'static str),

    #[error("A saved query needs a name")]
    EmptyName,
}

/// `~/.config/jsonq`, alongside the configuration file
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|p| p.join(".config").join(APP_DIR))
}

/// Platform data directory for jsonq
pub fn data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join(APP_DIR))
}

/// Read a TOML file, returning the default value when it does not exist
pub fn read_toml<T>(path: &Path) -> Result<T, StorageError>
where
    T: DeserializeOwned + Default,
{
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(T::default()),
        Err(e) => return Err(e.into()),
    };
    Ok(toml::from_str(&contents)?)
}

/// Write a TOML file, creating parent directories as needed
pub fn write_toml<T: Serialize>(path: &Path, value: &T) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let contents = toml::to_string_pretty(value)?;
    fs::write(path, contents)?;
    Ok(())
}
