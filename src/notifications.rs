//! Best-effort desktop notifications
//!
//! Notifications are advisory: a failure to display one is logged and
//! swallowed, never propagated. The config toggle turns them off entirely.

use crate::config::ConfigStore;
use tracing::{debug, warn};

/// Show a desktop notification if the user has them enabled
pub fn notify(config: &ConfigStore, title: &str, body: &str) {
    debug!("Notification: {} - {}", title, body);

    if !config.has_notifications() {
        return;
    }

    if let Err(e) = notify_rust::Notification::new()
        .summary(title)
        .body(body)
        .appname("snapshelf")
        .show()
    {
        warn!("Failed to show notification: {}", e);
    }
}
