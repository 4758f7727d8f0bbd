//! Tray menu model
//!
//! The menu has a static structure with dynamic content: a "Latest" submenu of
//! the most recent files (each with Upload / Delete / Save as), then fixed
//! entries. The model is rebuilt in full from every snapshot; menu rebuilds
//! are cheap and infrequent relative to file-change events, so there is no
//! incremental patching.

use crate::events::UiCommand;
use crate::files::FileList;
use std::path::PathBuf;

/// Maximum number of files shown in the "Latest" submenu
pub const LATEST_COUNT: usize = 5;

/// Fixed menu labels
pub mod labels {
    /// Submenu of recent files
    pub const LATEST: &str = "Latest";
    /// Opens the gallery window
    pub const BROWSE_IMAGES: &str = "Browse Images";
    /// Opens the watched folder in the file manager
    pub const OPEN_FOLDER: &str = "Open a folder";
    /// Opens the settings view
    pub const SETTINGS: &str = "Settings";
    /// Quits the application
    pub const EXIT: &str = "Exit";
    /// Per-file upload entry
    pub const UPLOAD: &str = "Upload";
    /// Per-file delete entry
    pub const DELETE: &str = "Delete";
    /// Per-file save-as entry
    pub const SAVE_AS: &str = "Save as";
}

/// Action attached to one entry of a file's submenu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileMenuAction {
    /// Upload through the configured uploader
    Upload,
    /// Delete from disk
    Delete,
    /// Save a copy elsewhere
    SaveAs,
}

impl FileMenuAction {
    /// Menu label for this action
    pub fn label(self) -> &'static str {
        match self {
            Self::Upload => labels::UPLOAD,
            Self::Delete => labels::DELETE,
            Self::SaveAs => labels::SAVE_AS,
        }
    }

    /// Command sent to the coordinator when this entry is clicked
    pub fn command(self, url: PathBuf) -> UiCommand {
        match self {
            Self::Upload => UiCommand::Upload(url),
            Self::Delete => UiCommand::DeleteFile(url),
            Self::SaveAs => UiCommand::SaveAs(url),
        }
    }
}

/// All per-file submenu actions, in menu order
pub const FILE_MENU_ACTIONS: [FileMenuAction; 3] = [
    FileMenuAction::Upload,
    FileMenuAction::Delete,
    FileMenuAction::SaveAs,
];

/// One file entry in the "Latest" submenu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMenuEntry {
    /// Submenu label (the file name)
    pub label: String,
    /// File the entry's actions target
    pub url: PathBuf,
}

/// Snapshot-derived content of the tray menu
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TrayMenuModel {
    /// Up to [`LATEST_COUNT`] most recent files, in list order
    pub latest: Vec<FileMenuEntry>,
}

impl TrayMenuModel {
    /// Build the menu content from a file list snapshot
    pub fn from_files(files: &FileList) -> Self {
        let latest = files
            .iter()
            .take(LATEST_COUNT)
            .map(|record| FileMenuEntry {
                label: record.filename.clone(),
                url: record.url.clone(),
            })
            .collect();
        Self { latest }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::files::FileRecord;

    fn files(names: &[&str]) -> FileList {
        names
            .iter()
            .map(|name| FileRecord::new(PathBuf::from(format!("/shots/{name}"))))
            .collect()
    }

    #[test]
    fn test_latest_preserves_list_order() {
        let model = TrayMenuModel::from_files(&files(&["a.png", "b.png", "c.png"]));
        let labels: Vec<&str> = model.latest.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, ["a.png", "b.png", "c.png"]);
    }

    #[test]
    fn test_latest_is_capped_at_five() {
        let model = TrayMenuModel::from_files(&files(&[
            "1.png", "2.png", "3.png", "4.png", "5.png", "6.png", "7.png",
        ]));
        assert_eq!(model.latest.len(), LATEST_COUNT);
        assert_eq!(model.latest[0].label, "1.png");
        assert_eq!(model.latest[4].label, "5.png");
    }

    #[test]
    fn test_empty_list_gives_empty_submenu() {
        let model = TrayMenuModel::from_files(&FileList::new());
        assert!(model.latest.is_empty());
    }

    #[test]
    fn test_file_actions_map_to_commands() {
        let url = PathBuf::from("/shots/a.png");
        assert_eq!(
            FileMenuAction::Upload.command(url.clone()),
            UiCommand::Upload(url.clone())
        );
        assert_eq!(
            FileMenuAction::Delete.command(url.clone()),
            UiCommand::DeleteFile(url.clone())
        );
        assert_eq!(
            FileMenuAction::SaveAs.command(url.clone()),
            UiCommand::SaveAs(url)
        );
    }

    #[test]
    fn test_rebuild_after_delete_scenario() {
        // Folder [a, b, c]; after deleting b the rebuilt menu shows [a, c]
        let model = TrayMenuModel::from_files(&files(&["a.png", "b.png", "c.png"]));
        assert_eq!(model.latest.len(), 3);

        let model = TrayMenuModel::from_files(&files(&["a.png", "c.png"]));
        let labels: Vec<&str> = model.latest.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, ["a.png", "c.png"]);
    }
}
