use std::time::{Duration, Instant};

pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Collapses bursts of input into a single evaluation.
///
/// Times are milliseconds on a caller-supplied monotonic clock; only the
/// most recent schedule counts.
#[derive(Debug)]
pub struct Debouncer {
    window_ms: u64,
    /// Time of the last input that triggered a debounce
    last_input_ms: Option<u64>,
    /// Whether an execution is waiting for the window to expire
    pending_execution: bool,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new()
    }
}

impl Debouncer {
    pub fn new() -> Self {
        Self::with_window(DEFAULT_DEBOUNCE_MS)
    }

    pub fn with_window(window_ms: u64) -> Self {
        Self {
            window_ms,
            last_input_ms: None,
            pending_execution: false,
        }
    }

    pub fn window(&self) -> Duration {
        Duration::from_millis(self.window_ms)
    }

    pub fn schedule_execution_at(&mut self, now_ms: u64) {
        self.last_input_ms = Some(now_ms);
        self.pending_execution = true;
    }

    pub fn should_execute_at(&self, now_ms: u64) -> bool {
        if !self.pending_execution {
            return false;
        }

        match self.last_input_ms {
            Some(last) => now_ms.saturating_sub(last) >= self.window_ms,
            None => false,
        }
    }

    pub fn mark_executed(&mut self) {
        self.pending_execution = false;
        self.last_input_ms = None;
    }

    pub fn has_pending(&self) -> bool {
        self.pending_execution
    }
}

/// Millisecond clock anchored at creation, for driving a [`Debouncer`]
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    start: Instant,
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn now_ms(&self) -> u64 {
        u64::try_from(self.start.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

#[cfg(test)]
#[path = "debouncer_tests.rs"]
mod debouncer_tests;
