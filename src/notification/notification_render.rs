use crossterm::style::Stylize;

use super::{Notification, NotificationType};
use crate::theme::Theme;

/// One line for the terminal, coloured by severity when `color` is set
pub fn render_notification(notification: &Notification, theme: Theme, color: bool) -> String {
    let label = notification.notification_type.label();
    if !color {
        return format!("{}: {}", label, notification.message);
    }

    let tint = match notification.notification_type {
        NotificationType::Info => theme.info(),
        NotificationType::Warning => theme.warning(),
        NotificationType::Error => theme.error(),
    };
    format!("{}: {}", label.with(tint).bold(), notification.message)
}
