use std::collections::VecDeque;

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotificationType {
    /// Confirmations such as "Copied query"
    #[default]
    Info,
    /// Degraded but working, e.g. invalid config or history not saved
    Warning,
    /// The requested operation was aborted
    Error,
}

impl NotificationType {
    pub fn label(self) -> &'static str {
        match self {
            NotificationType::Info => "info",
            NotificationType::Warning => "warning",
            NotificationType::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub notification_type: NotificationType,
}

/// Pending notifications, oldest first
#[derive(Debug, Default)]
pub struct NotificationState {
    pending: VecDeque<Notification>,
}

impl NotificationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, message: &str) {
        self.show_with_type(message, NotificationType::Info);
    }

    pub fn show_warning(&mut self, message: &str) {
        self.show_with_type(message, NotificationType::Warning);
    }

    pub fn show_error(&mut self, message: &str) {
        self.show_with_type(message, NotificationType::Error);
    }

    pub fn show_with_type(&mut self, message: &str, notification_type: NotificationType) {
        log::debug!("Notification ({}): {}", notification_type.label(), message);
        self.pending.push_back(Notification {
            message: message.to_string(),
            notification_type,
        });
    }

    /// Most recent notification, if any are pending
    pub fn latest(&self) -> Option<&Notification> {
        self.pending.back()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Remove and return everything pending
    pub fn drain(&mut self) -> Vec<Notification> {
        self.pending.drain(..).collect()
    }

    pub fn dismiss(&mut self) {
        self.pending.clear();
    }
}
