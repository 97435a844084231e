// Configuration type definitions

use std::path::PathBuf;

use serde::Deserialize;

use crate::history::{self, DEFAULT_MAX_ENTRIES};
use crate::query::debouncer::DEFAULT_DEBOUNCE_MS;
use crate::saved;
use crate::theme::Theme;

/// Clipboard backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ClipboardBackend {
    #[default]
    Auto,
    System,
    Osc52,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClipboardConfig {
    #[serde(default)]
    pub backend: ClipboardBackend,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QueryConfig {
    /// Quiet window before debounced input is applied
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

impl Default for QueryConfig {
    fn default() -> Self {
        QueryConfig {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct HistoryConfig {
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

fn default_max_entries() -> usize {
    DEFAULT_MAX_ENTRIES
}

impl Default for HistoryConfig {
    fn default() -> Self {
        HistoryConfig {
            max_entries: DEFAULT_MAX_ENTRIES,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default = "default_color")]
    pub color: bool,
}

fn default_color() -> bool {
    true
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            theme: Theme::default(),
            color: true,
        }
    }
}

/// Where history and saved queries live
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageConfig {
    /// Overrides both default locations when set
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub clipboard: ClipboardConfig,
    #[serde(default)]
    pub query: QueryConfig,
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

impl Config {
    pub fn history_path(&self) -> Option<PathBuf> {
        match &self.storage.dir {
            Some(dir) => Some(dir.join("history.toml")),
            None => history::history_path(),
        }
    }

    pub fn saved_queries_path(&self) -> Option<PathBuf> {
        match &self.storage.dir {
            Some(dir) => Some(dir.join("saved_queries.toml")),
            None => saved::saved_queries_path(),
        }
    }
}
