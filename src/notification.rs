//! User-facing notifications.
//!
//! Any handler can push a message; the front end drains and prints them.

mod notification_render;
mod notification_state;

pub use notification_render::render_notification;
pub use notification_state::{Notification, NotificationState, NotificationType};
