//! Sync coordinator implementation
//!
//! The coordinator owns the canonical file list and keeps every registered
//! consumer (tray menu, gallery window) eventually consistent with disk state.
//! It reacts to folder-watcher events, consumer commands, and config changes,
//! re-lists the watched folder, and pushes ordered [`ListSnapshot`]s to each
//! consumer over its own channel.
//!
//! Listings carry a monotonic sequence number. A listing that completes after
//! a newer one has already been applied is discarded, so overlapping refreshes
//! resolve to last-applied-wins by sequence, never by arrival order.

use crate::actions::FileActions;
use crate::config::ConfigStore;
use crate::error::get_user_friendly_error;
use crate::events::{CoordinatorEvent, ListSnapshot, UiCommand};
use crate::files::{self, FileList};
use crate::notifications;
use std::path::Path;
use std::sync::Arc;
use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Handle identifying a registered consumer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsumerId(u64);

struct Consumer {
    id: ConsumerId,
    sender: mpsc::SyncSender<ListSnapshot>,
}

/// Capacity of each consumer's snapshot channel
const CONSUMER_CHANNEL_CAPACITY: usize = 64;

/// Owner of the canonical file list
///
/// Explicit lifecycle: construct with [`SyncCoordinator::new`], drive with
/// [`run`](SyncCoordinator::run) or [`spawn`](SyncCoordinator::spawn), stop by
/// sending [`UiCommand::Quit`] or dropping all event senders.
pub struct SyncCoordinator {
    config: ConfigStore,
    actions: Arc<dyn FileActions>,
    /// Canonical file list, in the lister's order
    files: FileList,
    /// Sequence number of the most recently issued listing
    issued_seq: u64,
    /// Sequence number of the most recently applied listing
    applied_seq: u64,
    consumers: Vec<Consumer>,
    next_consumer_id: u64,
    /// Event receiver, taken when the loop starts
    event_receiver: Option<mpsc::Receiver<CoordinatorEvent>>,
}

impl SyncCoordinator {
    /// Create a coordinator with an empty file list
    pub fn new(
        config: ConfigStore,
        actions: Arc<dyn FileActions>,
        event_receiver: mpsc::Receiver<CoordinatorEvent>,
    ) -> Self {
        Self {
            config,
            actions,
            files: FileList::new(),
            issued_seq: 0,
            applied_seq: 0,
            consumers: Vec::new(),
            next_consumer_id: 0,
            event_receiver: Some(event_receiver),
        }
    }

    /// Current canonical file list
    pub fn current_files(&self) -> &FileList {
        &self.files
    }

    /// Register a consumer and immediately deliver the current snapshot
    ///
    /// Each consumer gets its own bounded channel; snapshots arrive in the
    /// order the coordinator produced them.
    pub fn register_consumer(&mut self) -> (ConsumerId, mpsc::Receiver<ListSnapshot>) {
        let (tx, rx) = mpsc::sync_channel(CONSUMER_CHANNEL_CAPACITY);
        let id = ConsumerId(self.next_consumer_id);
        self.next_consumer_id += 1;

        // New consumers converge without waiting for the next disk change
        let _ = tx.try_send(ListSnapshot {
            seq: self.applied_seq,
            files: self.files.clone(),
        });

        self.consumers.push(Consumer { id, sender: tx });
        debug!("Registered consumer {:?}", id);
        (id, rx)
    }

    /// Remove a consumer; its channel is dropped
    pub fn unregister_consumer(&mut self, id: ConsumerId) {
        self.consumers.retain(|c| c.id != id);
        debug!("Unregistered consumer {:?}", id);
    }

    /// Issue a new listing sequence number
    pub fn begin_refresh(&mut self) -> u64 {
        self.issued_seq += 1;
        self.issued_seq
    }

    /// Apply a completed listing if it is not stale
    ///
    /// Returns `false` when `seq` is older than (or equal to) the last applied
    /// listing, in which case the canonical list is left untouched.
    pub fn apply_listing(&mut self, seq: u64, files: FileList) -> bool {
        if seq <= self.applied_seq {
            debug!(
                "Discarding stale listing (seq {} <= applied {})",
                seq, self.applied_seq
            );
            return false;
        }

        self.applied_seq = seq;
        self.files = files;
        info!(
            "Applied listing seq {} with {} files",
            seq,
            self.files.len()
        );
        self.notify_consumers();
        true
    }

    /// Re-list the watched folder and push the result to all consumers
    ///
    /// On listing failure the canonical list is left untouched; the error is
    /// logged and surfaced as a notification. There is no retry loop: the next
    /// external trigger retries naturally.
    pub fn refresh(&mut self) {
        let seq = self.begin_refresh();
        let folder = self.config.watched_folder();

        match files::list_files(&folder) {
            Ok(listing) => {
                self.apply_listing(seq, listing);
            }
            Err(e) => {
                error!("Refresh failed: {}", e);
                notifications::notify(&self.config, "snapshelf", &get_user_friendly_error(&e));
            }
        }
    }

    /// Push the current list to every consumer
    ///
    /// Delivery order between consumers is unspecified; each consumer's own
    /// channel preserves snapshot order. Disconnected consumers are pruned.
    fn notify_consumers(&mut self) {
        let snapshot = ListSnapshot {
            seq: self.applied_seq,
            files: self.files.clone(),
        };

        self.consumers.retain(|consumer| {
            match consumer.sender.try_send(snapshot.clone()) {
                Ok(()) => true,
                Err(mpsc::TrySendError::Full(_)) => {
                    warn!(
                        "Consumer {:?} is lagging, dropping snapshot seq {}",
                        consumer.id, snapshot.seq
                    );
                    true
                }
                Err(mpsc::TrySendError::Disconnected(_)) => {
                    debug!("Consumer {:?} disconnected, pruning", consumer.id);
                    false
                }
            }
        });
    }

    /// Two-phase delete: tentative local removal, authoritative reconciliation
    ///
    /// The record is removed from the canonical list and pushed to consumers
    /// immediately, before the disk delete is confirmed. The follow-up refresh
    /// reconciles against actual disk state: if the delete failed the file
    /// reappears, which is the accepted last-writer-wins outcome.
    fn handle_delete(&mut self, url: &Path) {
        let before = self.files.len();
        self.files.retain(|record| record.url != url);
        if self.files.len() != before {
            debug!("Optimistically removed {} from list", url.display());
            self.notify_consumers();
        }

        if let Err(e) = self.actions.delete(url) {
            warn!("Delete failed, next refresh will restore the record: {}", e);
            notifications::notify(&self.config, "snapshelf", &get_user_friendly_error(&e));
        }

        // Reconcile with disk regardless of the action's outcome
        self.refresh();
    }

    fn handle_upload(&mut self, url: &Path) {
        match self.actions.upload(url) {
            Ok(uploaded_url) => {
                if let Err(e) = self.actions.copy_url(&uploaded_url) {
                    warn!("Could not copy uploaded URL to clipboard: {}", e);
                }
                let name = url
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                notifications::notify(
                    &self.config,
                    "snapshelf",
                    &format!("Uploaded {name}\n{uploaded_url}"),
                );
            }
            Err(e) => {
                error!("Upload failed: {}", e);
                notifications::notify(&self.config, "snapshelf", &get_user_friendly_error(&e));
            }
        }
    }

    /// Handle one event; returns `false` when the loop should stop
    fn handle_event(&mut self, event: CoordinatorEvent) -> bool {
        match event {
            CoordinatorEvent::Ui(command) => self.handle_command(command),
            CoordinatorEvent::FolderChanged => {
                debug!("Folder change reported by watcher");
                self.refresh();
                true
            }
            CoordinatorEvent::ConfigChanged => {
                debug!("Configuration changed, refreshing");
                self.refresh();
                true
            }
        }
    }

    fn handle_command(&mut self, command: UiCommand) -> bool {
        match command {
            UiCommand::OpenFile(url) => {
                if let Err(e) = self.actions.open(&url) {
                    error!("Open failed: {}", e);
                    notifications::notify(&self.config, "snapshelf", &get_user_friendly_error(&e));
                }
            }
            UiCommand::CopyToClipboard(url) => {
                if let Err(e) = self.actions.copy_to_clipboard(&url) {
                    error!("Clipboard copy failed: {}", e);
                    notifications::notify(&self.config, "snapshelf", &get_user_friendly_error(&e));
                }
            }
            UiCommand::DeleteFile(url) => self.handle_delete(&url),
            UiCommand::Upload(url) => self.handle_upload(&url),
            UiCommand::SaveAs(url) => {
                if let Err(e) = self.actions.save_as(&url) {
                    error!("Save-as failed: {}", e);
                    notifications::notify(&self.config, "snapshelf", &get_user_friendly_error(&e));
                }
            }
            UiCommand::OpenFolder => {
                let folder = self.config.watched_folder();
                if let Err(e) = self.actions.open(&folder) {
                    error!("Open folder failed: {}", e);
                    notifications::notify(&self.config, "snapshelf", &get_user_friendly_error(&e));
                }
            }
            UiCommand::Refresh => self.refresh(),
            UiCommand::Quit => {
                info!("Quit command received");
                return false;
            }
        }
        true
    }

    /// Run the event loop on the current thread
    ///
    /// Performs an initial refresh so consumers have a snapshot before the
    /// first disk change, then processes events until a quit command arrives
    /// or every event sender is dropped.
    pub fn run(&mut self) {
        let Some(event_receiver) = self.event_receiver.take() else {
            warn!("Event loop already running; run() call ignored");
            return;
        };

        info!("Entering coordinator event loop");
        self.refresh();

        loop {
            match event_receiver.recv_timeout(Duration::from_millis(100)) {
                Ok(event) => {
                    if !self.handle_event(event) {
                        break;
                    }
                }
                Err(mpsc::RecvTimeoutError::Timeout) => {
                    // Timeout is normal, nothing to do
                }
                Err(mpsc::RecvTimeoutError::Disconnected) => {
                    warn!("Event channel disconnected. Exiting event loop.");
                    break;
                }
            }
        }

        info!("Coordinator event loop exited");
    }

    /// Run the event loop on a background thread
    pub fn spawn(mut self) -> JoinHandle<()> {
        std::thread::spawn(move || self.run())
    }
}
