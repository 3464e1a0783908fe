use std::path::Path;
use tracing::warn;

/// Best effort, a missing notification daemon is not worth failing a command for.
pub fn notify(summary: &str, body: &str, icon: Option<&Path>) {
    let mut notification = notify_rust::Notification::new();
    notification.summary(summary).body(body);

    if let Some(icon) = icon.and_then(Path::to_str) {
        notification.icon(icon);
    }

    if let Err(e) = notification.show() {
        warn!("Failed to show desktop notification: {e}");
    }
}
