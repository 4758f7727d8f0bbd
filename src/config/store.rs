//! Shared configuration store with change notification
//!
//! Components that need to react to a settings change (the folder watcher, the
//! coordinator) subscribe for a [`ConfigChange`] event. The watched folder is
//! re-read from the store on every cycle, so a change is picked up by the next
//! poll without interrupting one already in flight.

use crate::config::manager::ConfigManager;
use crate::config::models::AppConfig;
use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc;
use tracing::{debug, warn};

/// Emitted to subscribers after the configuration has been updated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigChange;

/// Process-wide configuration store
///
/// Holds the current [`AppConfig`] behind a mutex and fans out a change event
/// to every subscriber after each update. Cloning the store shares the same
/// underlying state.
#[derive(Clone)]
pub struct ConfigStore {
    inner: Arc<Mutex<AppConfig>>,
    subscribers: Arc<Mutex<Vec<mpsc::SyncSender<ConfigChange>>>>,
}

impl ConfigStore {
    /// Create a store holding the given configuration
    pub fn new(config: AppConfig) -> Self {
        Self {
            inner: Arc::new(Mutex::new(config)),
            subscribers: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get a copy of the current configuration
    pub fn get(&self) -> AppConfig {
        self.inner.lock().clone()
    }

    /// Get the currently watched folder
    pub fn watched_folder(&self) -> PathBuf {
        self.inner.lock().watched_folder.clone()
    }

    /// Whether desktop notifications are enabled
    pub fn has_notifications(&self) -> bool {
        self.inner.lock().has_notifications
    }

    /// Subscribe to configuration changes
    ///
    /// Returns a receiver that gets one [`ConfigChange`] per successful update.
    /// Dropped receivers are pruned lazily on the next notification.
    pub fn subscribe(&self) -> mpsc::Receiver<ConfigChange> {
        let (tx, rx) = mpsc::sync_channel(8);
        self.subscribers.lock().push(tx);
        rx
    }

    /// Mutate the configuration, persist it, and notify subscribers
    ///
    /// A failed save is logged as a warning; the in-memory update still takes
    /// effect and subscribers are still notified.
    pub fn update(&self, f: impl FnOnce(&mut AppConfig)) {
        {
            let mut config = self.inner.lock();
            f(&mut config);
        }

        let config = self.inner.lock().clone();
        if let Err(e) = ConfigManager::save(&config) {
            warn!(
                "Failed to save configuration to disk: {}. Continuing with in-memory config. \
                 Changes will be lost on application restart.",
                e
            );
        }

        self.notify_subscribers();
    }

    fn notify_subscribers(&self) {
        let mut subscribers = self.subscribers.lock();
        subscribers.retain(|tx| match tx.try_send(ConfigChange) {
            Ok(()) => true,
            Err(mpsc::TrySendError::Full(_)) => {
                // Subscriber is lagging; it will still see the latest state
                // when it drains its channel.
                debug!("Config change subscriber channel full, skipping");
                true
            }
            Err(mpsc::TrySendError::Disconnected(_)) => false,
        });
    }
}
