//! Gallery window view-model
//!
//! [`GalleryView`] is one window's derived view of the coordinator's file
//! list: the same records, plus per-item visibility merged in locally. It
//! never mutates the coordinator's canonical copy; actions flow back as
//! [`UiCommand`]s over the command channel.

use crate::events::{CoordinatorEvent, ListSnapshot, UiCommand};
use crate::files::FileList;
use crate::gallery::debounce::TrailingDebouncer;
use crate::gallery::visibility::{self, INITIAL_VISIBLE_COUNT, ItemBounds, Viewport};
use std::path::Path;
use std::sync::mpsc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Scroll quiet period before visibility is recomputed
pub const SCROLL_DEBOUNCE: Duration = Duration::from_millis(50);

/// Window-local view of the file list with lazy-load visibility tracking
pub struct GalleryView {
    files: FileList,
    seq: u64,
    snapshot_rx: mpsc::Receiver<ListSnapshot>,
    command_tx: mpsc::SyncSender<CoordinatorEvent>,
    debouncer: TrailingDebouncer,
}

impl GalleryView {
    /// Create a view consuming snapshots from `snapshot_rx`
    ///
    /// `snapshot_rx` comes from
    /// [`SyncCoordinator::register_consumer`](crate::controller::SyncCoordinator::register_consumer);
    /// the registration snapshot is applied on the first
    /// [`pump`](GalleryView::pump).
    pub fn new(
        snapshot_rx: mpsc::Receiver<ListSnapshot>,
        command_tx: mpsc::SyncSender<CoordinatorEvent>,
    ) -> Self {
        Self {
            files: FileList::new(),
            seq: 0,
            snapshot_rx,
            command_tx,
            debouncer: TrailingDebouncer::new(SCROLL_DEBOUNCE),
        }
    }

    /// Records currently backing the rendered grid
    pub fn files(&self) -> &FileList {
        &self.files
    }

    /// Drain pending snapshots, applying the newest; returns whether the list
    /// changed
    pub fn pump(&mut self) -> bool {
        let Some(snapshot) = self.snapshot_rx.try_iter().last() else {
            return false;
        };
        self.apply_snapshot(snapshot);
        true
    }

    /// Replace the local list with a fresh snapshot
    ///
    /// Until a real viewport measurement arrives, the first
    /// [`INITIAL_VISIBLE_COUNT`] records are marked visible and the rest are
    /// rendered as placeholders.
    pub fn apply_snapshot(&mut self, snapshot: ListSnapshot) {
        debug!(
            "Gallery applying snapshot seq {} ({} files)",
            snapshot.seq,
            snapshot.files.len()
        );
        self.seq = snapshot.seq;
        self.files = snapshot.files;
        for (index, record) in self.files.iter_mut().enumerate() {
            record.visible = index < INITIAL_VISIBLE_COUNT;
        }
    }

    /// Record one scroll event; recomputation is deferred to the quiet period
    pub fn record_scroll(&mut self, now: Instant) {
        self.debouncer.record_event(now);
    }

    /// Tick the debouncer; recomputes visibility once scrolling has settled
    ///
    /// `bounds` must have one entry per record, in list order. Returns whether
    /// a recomputation happened.
    pub fn tick(&mut self, now: Instant, bounds: &[ItemBounds], viewport: Viewport) -> bool {
        if !self.debouncer.fire_if_due(now) {
            return false;
        }

        let visibility = visibility::compute_visibility(bounds, viewport);
        for (record, visible) in self.files.iter_mut().zip(visibility) {
            record.visible = visible;
        }
        debug!(
            "Gallery visibility recomputed: {}/{} visible",
            self.files.iter().filter(|f| f.visible).count(),
            self.files.len()
        );
        true
    }

    /// Optimistically remove a record and ask the coordinator to delete it
    ///
    /// The local list drops the record immediately for UI responsiveness; the
    /// coordinator's reconciling refresh is authoritative and will restore the
    /// record if the disk delete fails.
    pub fn delete(&mut self, url: &Path) {
        self.files.retain(|record| record.url != url);
        self.send(UiCommand::DeleteFile(url.to_path_buf()));
    }

    /// Ask the coordinator to upload a file
    pub fn upload(&self, url: &Path) {
        self.send(UiCommand::Upload(url.to_path_buf()));
    }

    /// Ask the coordinator to copy a file to the clipboard
    pub fn copy_to_clipboard(&self, url: &Path) {
        self.send(UiCommand::CopyToClipboard(url.to_path_buf()));
    }

    /// Ask the coordinator to open a file
    pub fn open(&self, url: &Path) {
        self.send(UiCommand::OpenFile(url.to_path_buf()));
    }

    fn send(&self, command: UiCommand) {
        if self.command_tx.send(CoordinatorEvent::Ui(command)).is_err() {
            warn!("Coordinator is gone, dropping gallery command");
        }
    }

    /// Tear down the view's subscription
    ///
    /// Dropping the snapshot receiver disconnects the channel; the coordinator
    /// prunes the dead consumer on its next notification. Call this on window
    /// unmount so reloads do not leak subscriptions.
    pub fn detach(self) {
        drop(self.snapshot_rx);
        debug!("Gallery view detached");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::files::FileRecord;
    use std::path::PathBuf;

    fn snapshot(seq: u64, count: usize) -> ListSnapshot {
        ListSnapshot {
            seq,
            files: (0..count)
                .map(|i| FileRecord::new(PathBuf::from(format!("/shots/{i:02}.png"))))
                .collect(),
        }
    }

    fn view() -> (GalleryView, mpsc::Receiver<CoordinatorEvent>, mpsc::SyncSender<ListSnapshot>) {
        let (snap_tx, snap_rx) = mpsc::sync_channel(8);
        let (cmd_tx, cmd_rx) = mpsc::sync_channel(8);
        (GalleryView::new(snap_rx, cmd_tx), cmd_rx, snap_tx)
    }

    #[test]
    fn test_initial_visibility_window() {
        let (mut gallery, _cmd, _snap) = view();
        gallery.apply_snapshot(snapshot(1, 15));

        let visible: Vec<bool> = gallery.files().iter().map(|f| f.visible).collect();
        assert_eq!(visible.iter().filter(|v| **v).count(), 10);
        assert!(visible[..10].iter().all(|v| *v));
        assert!(visible[10..].iter().all(|v| !*v));
    }

    #[test]
    fn test_short_list_all_visible() {
        let (mut gallery, _cmd, _snap) = view();
        gallery.apply_snapshot(snapshot(1, 3));
        assert!(gallery.files().iter().all(|f| f.visible));
    }

    #[test]
    fn test_pump_applies_newest_snapshot() {
        let (mut gallery, _cmd, snap_tx) = view();
        snap_tx.send(snapshot(1, 2)).unwrap();
        snap_tx.send(snapshot(2, 5)).unwrap();

        assert!(gallery.pump());
        assert_eq!(gallery.files().len(), 5);
        assert_eq!(gallery.seq, 2);

        // Nothing pending
        assert!(!gallery.pump());
    }

    #[test]
    fn test_debounced_scroll_recomputes_once() {
        let (mut gallery, _cmd, _snap) = view();
        gallery.apply_snapshot(snapshot(1, 15));

        let bounds: Vec<ItemBounds> = (0..15)
            .map(|i| ItemBounds {
                top: i as f32 * 100.0,
                height: 100.0,
            })
            .collect();
        // Viewport scrolled to show items 10..=14
        let viewport = Viewport {
            top: 1000.0,
            height: 500.0,
        };

        let start = Instant::now();
        for i in 0..20 {
            gallery.record_scroll(start + Duration::from_millis(i));
        }

        let mut recomputations = 0;
        for i in 0..200 {
            if gallery.tick(start + Duration::from_millis(i), &bounds, viewport) {
                recomputations += 1;
            }
        }
        assert_eq!(recomputations, 1);

        let visible: Vec<bool> = gallery.files().iter().map(|f| f.visible).collect();
        assert!(visible[..10].iter().all(|v| !*v));
        assert!(visible[10..].iter().all(|v| *v));
    }

    #[test]
    fn test_delete_is_local_and_forwarded() {
        let (mut gallery, cmd_rx, _snap) = view();
        gallery.apply_snapshot(snapshot(1, 3));

        let target = PathBuf::from("/shots/01.png");
        gallery.delete(&target);

        assert_eq!(gallery.files().len(), 2);
        assert!(gallery.files().iter().all(|f| f.url != target));
        assert_eq!(
            cmd_rx.try_recv().unwrap(),
            CoordinatorEvent::Ui(UiCommand::DeleteFile(target))
        );
    }

    #[test]
    fn test_actions_forward_commands() {
        let (gallery, cmd_rx, _snap) = view();
        let url = PathBuf::from("/shots/00.png");

        gallery.upload(&url);
        gallery.copy_to_clipboard(&url);
        gallery.open(&url);

        assert_eq!(
            cmd_rx.try_recv().unwrap(),
            CoordinatorEvent::Ui(UiCommand::Upload(url.clone()))
        );
        assert_eq!(
            cmd_rx.try_recv().unwrap(),
            CoordinatorEvent::Ui(UiCommand::CopyToClipboard(url.clone()))
        );
        assert_eq!(
            cmd_rx.try_recv().unwrap(),
            CoordinatorEvent::Ui(UiCommand::OpenFile(url))
        );
    }
}
