//! Typed messages carried between the coordinator and its collaborators
//!
//! Two directions, one closed set of variants each: consumers (tray menu,
//! gallery window) send [`UiCommand`]s to the coordinator; the coordinator
//! pushes [`ListSnapshot`]s back. File identity on the wire is always the
//! absolute path.

use crate::files::FileList;
use std::path::PathBuf;

/// Command sent by a consumer to the coordinator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    /// Open a file in the default viewer
    OpenFile(PathBuf),
    /// Copy a file to the clipboard
    CopyToClipboard(PathBuf),
    /// Delete a file (optimistic local removal, reconciled on next refresh)
    DeleteFile(PathBuf),
    /// Upload a file through the configured uploader
    Upload(PathBuf),
    /// Save a copy of a file to a user-chosen destination
    SaveAs(PathBuf),
    /// Open the watched folder in the file manager
    OpenFolder,
    /// Re-list the watched folder and push a fresh snapshot
    Refresh,
    /// Stop the coordinator loop
    Quit,
}

/// Event delivered to the coordinator loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoordinatorEvent {
    /// A consumer issued a command
    Ui(UiCommand),
    /// The folder watcher observed a change on disk
    FolderChanged,
    /// The configuration store was updated
    ConfigChanged,
}

/// Snapshot of the authoritative file list pushed to consumers
///
/// `seq` increases monotonically with each applied listing. Consumers observe
/// snapshots in production order over their own channel; the two consumers may
/// observe a given snapshot at different times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSnapshot {
    /// Sequence number of the listing this snapshot came from
    pub seq: u64,
    /// The file list, in the lister's order
    pub files: FileList,
}
