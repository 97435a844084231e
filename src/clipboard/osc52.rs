use std::io::Write;

use base64::{Engine as _, engine::general_purpose::STANDARD};

use super::{ClipboardError, ClipboardResult};

/// Write the OSC 52 sequence for `text` to the terminal
pub fn copy(text: &str, out: &mut impl Write) -> ClipboardResult {
    out.write_all(encode_osc52(text).as_bytes())
        .and_then(|()| out.flush())
        .map_err(|e| ClipboardError::WriteError(e.to_string()))
}

/// `ESC ] 52 ; c ; <base64> BEL`, targeting the clipboard selection
pub fn encode_osc52(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}
