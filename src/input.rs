//! Reading JSON text from a file or stdin

mod reader;

pub use reader::{InputReader, MAX_FILE_BYTES};
