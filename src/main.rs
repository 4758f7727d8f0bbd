//! `snapshelf` - Tray-resident gallery for a watched folder
//!
//! Wires the folder watcher, sync coordinator, and tray surface together and
//! runs the tray loop on the main thread.

// Hide the console window on Windows release builds
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

// GUI module is only in the binary, not the library
mod gui;

use anyhow::{Context, Result};
use snapshelf::{
    actions::SystemActions,
    config::{ConfigManager, ConfigStore},
    controller::SyncCoordinator,
    events::CoordinatorEvent,
    utils,
    watcher::FolderWatcher,
};
use std::sync::{Arc, mpsc};
use std::thread;
use tracing::{info, warn};

/// Capacity of the coordinator's event channel
const EVENT_CHANNEL_CAPACITY: usize = 32;

fn main() -> Result<()> {
    utils::init_logging().context("Failed to initialize logging system")?;

    info!("snapshelf v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = ConfigManager::load().context("Failed to load application configuration")?;
    info!("Watching {}", config.watched_folder.display());
    let store = ConfigStore::new(config);

    let (event_tx, event_rx) = mpsc::sync_channel::<CoordinatorEvent>(EVENT_CHANNEL_CAPACITY);

    // Forward config-change notifications into the coordinator loop
    let config_rx = store.subscribe();
    {
        let event_tx = event_tx.clone();
        thread::spawn(move || {
            while config_rx.recv().is_ok() {
                if event_tx.send(CoordinatorEvent::ConfigChanged).is_err() {
                    break;
                }
            }
        });
    }

    info!("Starting folder watcher thread");
    let _watcher_handle = FolderWatcher::new(store.clone(), event_tx.clone()).start();

    let actions = Arc::new(SystemActions::new(store.clone()));
    let mut coordinator = SyncCoordinator::new(store, actions, event_rx);
    let (_tray_consumer, snapshot_rx) = coordinator.register_consumer();

    info!("Starting sync coordinator thread");
    let coordinator_handle = coordinator.spawn();

    info!("Starting tray loop");
    let mut tray =
        gui::TrayController::new(event_tx, snapshot_rx).context("Failed to create system tray")?;
    tray.run();

    if coordinator_handle.join().is_err() {
        warn!("Coordinator thread panicked");
    }

    info!("snapshelf shutting down");
    Ok(())
}
