//! Query history: newest first, deduplicated by exact text, capped in size

mod matcher;

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::storage::{self, StorageError};

pub use matcher::HistoryMatcher;

pub const DEFAULT_MAX_ENTRIES: usize = 50;
const HISTORY_FILE: &str = "history.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub expression: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct HistoryFile {
    #[serde(default)]
    entries: Vec<HistoryEntry>,
}

/// Default history file under the platform data directory
pub fn history_path() -> Option<PathBuf> {
    storage::data_dir().map(|p| p.join(HISTORY_FILE))
}

/// Executed queries, most recent first.
///
/// With no backing file, or after a write failure, the history keeps working
/// in memory for the rest of the session.
#[derive(Debug)]
pub struct HistoryState {
    entries: Vec<HistoryEntry>,
    max_entries: usize,
    path: Option<PathBuf>,
    matcher: HistoryMatcher,
}

impl HistoryState {
    pub fn in_memory(max_entries: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_entries,
            path: None,
            matcher: HistoryMatcher::default(),
        }
    }

    /// Load history from `path`, keeping it as the backing file
    pub fn open(path: PathBuf, max_entries: usize) -> Result<Self, StorageError> {
        let file: HistoryFile = storage::read_toml(&path)?;
        let mut state = Self::in_memory(max_entries);
        for entry in file.entries {
            if !state.entries.iter().any(|e| e.expression == entry.expression) {
                state.entries.push(entry);
            }
        }
        state.entries.truncate(max_entries);
        state.path = Some(path);

        log::debug!("Loaded {} history entries", state.entries.len());
        Ok(state)
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_persistent(&self) -> bool {
        self.path.is_some()
    }

    pub fn add(&mut self, expression: &str) -> Result<(), StorageError> {
        self.add_at(expression, Utc::now())
    }

    /// Record `expression` as the newest entry.
    ///
    /// Entries are keyed by their exact text. Re-adding existing text moves
    /// it to the front with the new timestamp.
    /// When writing the file fails the entry is still kept in memory, the
    /// history stops persisting, and the error is returned.
    pub fn add_at(&mut self, expression: &str, timestamp: DateTime<Utc>) -> Result<(), StorageError> {
        if expression.trim().is_empty() {
            return Ok(());
        }

        self.entries.retain(|e| e.expression != expression);
        self.entries.insert(
            0,
            HistoryEntry {
                expression: expression.to_string(),
                timestamp,
            },
        );
        self.entries.truncate(self.max_entries);

        self.persist()
    }

    /// Entries matching `search`, best match first
    pub fn search(&self, search: &str) -> Vec<&HistoryEntry> {
        self.matcher
            .rank(search, &self.entries)
            .into_iter()
            .map(|idx| &self.entries[idx])
            .collect()
    }

    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.entries.clear();
        self.persist()
    }

    fn persist(&mut self) -> Result<(), StorageError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let file = HistoryFile {
            entries: self.entries.clone(),
        };
        if let Err(e) = storage::write_toml(path, &file) {
            log::warn!("History could not be saved, keeping it in memory: {}", e);
            self.path = None;
            return Err(e);
        }
        Ok(())
    }
}
