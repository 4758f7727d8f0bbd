//! Folder watching
//!
//! [`FolderWatcher`] polls the watched folder on a background thread and
//! detects changes by diffing path snapshots. When the set of media files
//! changes it sends a single [`CoordinatorEvent::FolderChanged`] to the
//! coordinator, which re-lists and pushes a fresh snapshot to consumers.
//!
//! The watched path and poll interval are re-read from the config store on
//! every cycle, so a settings change takes effect on the next poll without
//! interrupting one already in flight.

use crate::config::ConfigStore;
use crate::error::{Result, SnapshelfError};
use crate::events::CoordinatorEvent;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, error, info};

/// Background poller for the watched folder
pub struct FolderWatcher {
    config: ConfigStore,
    event_sender: mpsc::SyncSender<CoordinatorEvent>,
    /// Previous snapshot of media file paths in the watched folder
    known_paths: HashSet<PathBuf>,
    /// First successful poll primes the snapshot without emitting an event;
    /// the coordinator does its own initial refresh
    primed: bool,
}

impl FolderWatcher {
    /// Create a watcher that reports changes to `event_sender`
    pub fn new(config: ConfigStore, event_sender: mpsc::SyncSender<CoordinatorEvent>) -> Self {
        Self {
            config,
            event_sender,
            known_paths: HashSet::new(),
            primed: false,
        }
    }

    /// Start the polling thread
    ///
    /// The thread exits when the coordinator side of the channel is dropped.
    pub fn start(mut self) -> JoinHandle<()> {
        thread::spawn(move || {
            info!("Folder watcher started");
            loop {
                match self.poll_folder() {
                    Ok(changed) => {
                        if changed
                            && self
                                .event_sender
                                .send(CoordinatorEvent::FolderChanged)
                                .is_err()
                        {
                            info!("Coordinator channel closed, stopping folder watcher");
                            break;
                        }
                    }
                    Err(e) => {
                        // Non-fatal: keep the previous snapshot and retry on
                        // the next cycle
                        error!("Error polling watched folder: {}", e);
                    }
                }

                let interval = self.config.get().poll_interval_ms;
                thread::sleep(Duration::from_millis(interval));
            }
        })
    }

    /// Poll the folder once; returns whether the path set changed
    fn poll_folder(&mut self) -> Result<bool> {
        let folder = self.config.watched_folder();

        let entries =
            std::fs::read_dir(&folder).map_err(|source| SnapshelfError::ListingError {
                path: folder.clone(),
                source,
            })?;

        let mut current = HashSet::with_capacity(self.known_paths.len().max(16));
        for entry in entries.flatten() {
            let path = entry.path();
            if crate::files::is_media_file(&path) {
                current.insert(path);
            }
        }

        if !self.primed {
            debug!(
                "Primed folder watcher with {} files in {}",
                current.len(),
                folder.display()
            );
            self.known_paths = current;
            self.primed = true;
            return Ok(false);
        }

        let changed = current != self.known_paths;
        if changed {
            let added = current.difference(&self.known_paths).count();
            let removed = self.known_paths.difference(&current).count();
            info!(
                "Watched folder changed: {} added, {} removed",
                added, removed
            );
            self.known_paths = current;
        }

        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use std::fs;

    fn watcher_for(dir: &std::path::Path) -> (FolderWatcher, mpsc::Receiver<CoordinatorEvent>) {
        let config = ConfigStore::new(AppConfig {
            watched_folder: dir.to_path_buf(),
            ..AppConfig::default()
        });
        let (tx, rx) = mpsc::sync_channel(8);
        (FolderWatcher::new(config, tx), rx)
    }

    #[test]
    fn test_first_poll_primes_without_change() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.png"), b"x").unwrap();

        let (mut watcher, _rx) = watcher_for(dir.path());
        assert!(!watcher.poll_folder().unwrap());
        assert_eq!(watcher.known_paths.len(), 1);
    }

    #[test]
    fn test_new_file_is_detected() {
        let dir = tempfile::tempdir().unwrap();
        let (mut watcher, _rx) = watcher_for(dir.path());

        watcher.poll_folder().unwrap();
        fs::write(dir.path().join("new.png"), b"x").unwrap();
        assert!(watcher.poll_folder().unwrap());

        // No further change: no event
        assert!(!watcher.poll_folder().unwrap());
    }

    #[test]
    fn test_removed_file_is_detected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.png");
        fs::write(&path, b"x").unwrap();

        let (mut watcher, _rx) = watcher_for(dir.path());
        watcher.poll_folder().unwrap();

        fs::remove_file(&path).unwrap();
        assert!(watcher.poll_folder().unwrap());
    }

    #[test]
    fn test_non_media_files_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let (mut watcher, _rx) = watcher_for(dir.path());
        watcher.poll_folder().unwrap();

        fs::write(dir.path().join("notes.txt"), b"x").unwrap();
        assert!(!watcher.poll_folder().unwrap());
    }

    #[test]
    fn test_missing_folder_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("gone");
        let (mut watcher, _rx) = watcher_for(&missing);
        assert!(watcher.poll_folder().is_err());
    }

    #[test]
    fn test_config_change_switches_folder() {
        let dir_a = tempfile::tempdir().unwrap();
        let dir_b = tempfile::tempdir().unwrap();
        fs::write(dir_b.path().join("b.png"), b"x").unwrap();

        let config = ConfigStore::new(AppConfig {
            watched_folder: dir_a.path().to_path_buf(),
            ..AppConfig::default()
        });
        let (tx, _rx) = mpsc::sync_channel(8);
        let mut watcher = FolderWatcher::new(config.clone(), tx);

        watcher.poll_folder().unwrap();
        config.update(|c| c.watched_folder = dir_b.path().to_path_buf());

        // Next poll sees the new folder's contents
        assert!(watcher.poll_folder().unwrap());
        assert_eq!(watcher.known_paths.len(), 1);
    }
}
