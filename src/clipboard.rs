//! Copying text out of the terminal.
//!
//! The system clipboard is used when available (via arboard). OSC 52 escape
//! sequences cover remote sessions where the terminal owns the clipboard.

mod osc52;
mod system;

use std::io::{self, Write};

use thiserror::Error;

use crate::config::ClipboardBackend;

pub use osc52::encode_osc52;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("system clipboard unavailable: {0}")]
    SystemUnavailable(String),

    #[error("could not write to the clipboard: {0}")]
    WriteError(String),
}

pub type ClipboardResult = Result<(), ClipboardError>;

/// Copy `text` using the configured backend. `Auto` falls back to OSC 52.
pub fn copy_to_clipboard(text: &str, backend: ClipboardBackend) -> ClipboardResult {
    copy_with(text, backend, system::copy, &mut terminal())
}

fn copy_with(
    text: &str,
    backend: ClipboardBackend,
    system_copy: impl FnOnce(&str) -> ClipboardResult,
    terminal: &mut impl Write,
) -> ClipboardResult {
    match backend {
        ClipboardBackend::System => system_copy(text),
        ClipboardBackend::Osc52 => osc52::copy(text, terminal),
        ClipboardBackend::Auto => system_copy(text).or_else(|e| {
            log::debug!("Falling back to OSC 52: {}", e);
            osc52::copy(text, terminal)
        }),
    }
}

#[cfg(not(test))]
fn terminal() -> impl Write {
    io::stdout()
}

// Unit tests never write escape sequences to the runner's stdout
#[cfg(test)]
fn terminal() -> impl Write {
    io::sink()
}
