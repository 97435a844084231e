use thiserror::Error;

use crate::clipboard::ClipboardError;
use crate::document::ParseError;
use crate::export::ExportError;
use crate::share::ShareError;
use crate::storage::StorageError;

#[derive(Debug, Error)]
pub enum JsonqError {
    #[error("Invalid JSON input: {0}")]
    InvalidJson(#[from] ParseError),

    #[error("Input file is {size} bytes, larger than the {limit} byte limit")]
    FileTooLarge { size: u64, limit: u64 },

    #[error("Query failed: {0}")]
    Evaluation(String),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Invalid shared query: {0}")]
    Share(#[from] ShareError),

    #[error("Clipboard error: {0}")]
    Clipboard(#[from] ClipboardError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
