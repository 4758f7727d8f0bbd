//! `snapshelf` - Tray-resident gallery for a watched folder
//!
//! Watches a screenshots/recordings folder and keeps a tray menu and gallery
//! window consistent with its contents. A `FolderWatcher` polls the folder and
//! reports changes over a channel; the `SyncCoordinator` owns the canonical
//! file list, re-lists on change, and pushes ordered snapshots to each
//! registered consumer. File actions (open, upload, delete, clipboard,
//! save-as) run through the `FileActions` trait so the coordinator stays
//! testable without touching the real system.

// Module declarations
pub mod actions;
pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod files;
pub mod gallery;
pub mod notifications;
pub mod tray;
pub mod utils;
pub mod watcher;

// Re-export commonly used types
pub use error::{Result, SnapshelfError};
