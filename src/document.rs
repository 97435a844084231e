//! Document model
//!
//! Holds the currently loaded JSON value together with the metadata derived
//! from it. The value is replaced wholesale on every successful parse and
//! cleared on failure, so a stale document is never queried.

mod field_paths;
mod metadata;

pub use field_paths::extract_field_paths;
pub use metadata::{DocumentMetadata, ValueKind};

use serde_json::Value;
use thiserror::Error;

/// JSON parse failure, carrying the parser's message verbatim
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ParseError {
    message: String,
}

impl ParseError {
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        Self {
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Default)]
pub struct Document {
    value: Option<Value>,
    metadata: Option<DocumentMetadata>,
    field_paths: Vec<String>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `text` and make it the current document.
    ///
    /// On failure the previous document is discarded, not retained.
    pub fn set_text(&mut self, text: &str) -> Result<&Value, ParseError> {
        self.clear();

        let value: Value = serde_json::from_str(text)?;

        #[cfg(debug_assertions)]
        log::debug!("Document loaded: {} bytes", text.len());

        self.metadata = Some(DocumentMetadata::compute(&value, text.len()));
        self.field_paths = extract_field_paths(&value);
        Ok(self.value.insert(value))
    }

    pub fn clear(&mut self) {
        self.value = None;
        self.metadata = None;
        self.field_paths.clear();
    }

    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.value.is_some()
    }

    pub fn metadata(&self) -> Option<&DocumentMetadata> {
        self.metadata.as_ref()
    }

    /// Sorted, deduplicated field paths discovered from the document
    pub fn field_paths(&self) -> &[String] {
        &self.field_paths
    }
}
