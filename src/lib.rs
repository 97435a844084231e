//! jsonq library - query JSON documents with JMESPath or a visual builder
//!
//! The binary is a thin front end over these modules; everything here is
//! usable and testable without a terminal.

pub mod app;
pub mod builder;
pub mod clipboard;
pub mod config;
pub mod document;
pub mod error;
pub mod export;
pub mod history;
pub mod input;
pub mod notification;
pub mod query;
pub mod results;
pub mod saved;
pub mod share;
pub mod storage;
pub mod theme;

// Re-export commonly used types for convenience
pub use app::{AppContext, Session};
pub use builder::{BuilderConfig, BuilderState};
pub use config::Config;
pub use document::Document;
pub use error::JsonqError;
pub use query::{ExecutionOutcome, QueryExecutor, generate, recognize};
