use arboard::Clipboard;

use super::{ClipboardError, ClipboardResult};

pub fn copy(text: &str) -> ClipboardResult {
    let mut clipboard =
        Clipboard::new().map_err(|e| ClipboardError::SystemUnavailable(e.to_string()))?;

    clipboard
        .set_text(text)
        .map_err(|e| ClipboardError::WriteError(e.to_string()))
}
