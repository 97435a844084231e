use crate::config::{ClipboardBackend, Config, ConfigResult};
use crate::history::HistoryState;
use crate::notification::NotificationState;
use crate::saved::SavedQueries;
use crate::theme::Theme;

/// Process-wide state, created once in `main` and passed to every handler
#[derive(Debug)]
pub struct AppContext {
    pub config: Config,
    pub theme: Theme,
    pub color: bool,
    pub notification: NotificationState,
    pub history: HistoryState,
    pub saved: SavedQueries,
}

impl AppContext {
    /// Build from a loaded configuration, opening history and saved queries.
    ///
    /// Config warnings and storage failures become notifications; storage
    /// that cannot be opened is replaced by an in-memory store.
    pub fn new(loaded: ConfigResult) -> Self {
        let mut ctx = Self::in_memory(loaded.config);
        if let Some(warning) = loaded.warning {
            ctx.notification.show_warning(&warning);
        }

        match ctx.config.history_path() {
            Some(path) => match HistoryState::open(path, ctx.config.history.max_entries) {
                Ok(history) => ctx.history = history,
                Err(e) => {
                    log::warn!("Could not open history: {}", e);
                    ctx.notification.show_warning(&format!(
                        "History unavailable, keeping it for this session only: {}",
                        e
                    ));
                }
            },
            None => ctx
                .notification
                .show_warning("No data directory, history is kept for this session only"),
        }

        if let Some(path) = ctx.config.saved_queries_path() {
            match SavedQueries::open(path) {
                Ok(saved) => ctx.saved = saved,
                Err(e) => {
                    log::warn!("Could not open saved queries: {}", e);
                    ctx.notification
                        .show_warning(&format!("Saved queries unavailable: {}", e));
                }
            }
        }

        ctx
    }

    /// Nothing touches the filesystem
    pub fn in_memory(config: Config) -> Self {
        Self {
            theme: config.display.theme,
            color: config.display.color,
            history: HistoryState::in_memory(config.history.max_entries),
            saved: SavedQueries::in_memory(),
            notification: NotificationState::new(),
            config,
        }
    }

    pub fn clipboard_backend(&self) -> ClipboardBackend {
        self.config.clipboard.backend
    }

    pub fn debounce_ms(&self) -> u64 {
        self.config.query.debounce_ms
    }
}
