//! File list data model and folder lister
//!
//! The lister scans the watched folder and returns screenshot/recording files
//! newest-first. Its sort order is authoritative: the coordinator never
//! re-sorts, and both the tray "Latest" submenu and the gallery's initial
//! visible window depend on position.

use crate::error::{Result, SnapshelfError};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::debug;

/// File extensions recognized as screenshots or recordings
const MEDIA_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "webp", "bmp", "mp4", "webm", "mkv",
];

/// One watched file: path, display name, and transient visibility flag
///
/// The path is the unique identity key. `visible` is presentation-only state,
/// never persisted, recomputed per render context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Absolute path to the file (identity key)
    pub url: PathBuf,
    /// File name for display
    pub filename: String,
    /// Whether the gallery should eagerly load this file's image
    pub visible: bool,
}

impl FileRecord {
    /// Create a record for a path, with visibility off
    pub fn new(url: PathBuf) -> Self {
        let filename = url
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            url,
            filename,
            visible: false,
        }
    }
}

/// Ordered sequence of file records, newest-first
pub type FileList = Vec<FileRecord>;

/// List media files in `folder`, newest-first by modification time
///
/// Ties are broken by filename, descending, so repeated listings of an
/// unchanged folder always produce the same order. Entries whose metadata
/// cannot be read are skipped. A folder that cannot be read at all is a
/// [`SnapshelfError::ListingError`].
pub fn list_files(folder: &Path) -> Result<FileList> {
    let entries = std::fs::read_dir(folder).map_err(|source| SnapshelfError::ListingError {
        path: folder.to_path_buf(),
        source,
    })?;

    let mut files: Vec<(SystemTime, FileRecord)> = Vec::new();

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!("Skipping unreadable directory entry: {}", e);
                continue;
            }
        };

        let path = entry.path();
        if !is_media_file(&path) {
            continue;
        }

        let modified = match entry.metadata().and_then(|m| m.modified()) {
            Ok(modified) => modified,
            Err(e) => {
                debug!("Skipping {} (no metadata): {}", path.display(), e);
                continue;
            }
        };

        files.push((modified, FileRecord::new(path)));
    }

    files.sort_by(|(mtime_a, rec_a), (mtime_b, rec_b)| {
        mtime_b
            .cmp(mtime_a)
            .then_with(|| rec_b.filename.cmp(&rec_a.filename))
    });

    Ok(files.into_iter().map(|(_, record)| record).collect())
}

/// Whether a path points at a file with a recognized media extension
pub fn is_media_file(path: &Path) -> bool {
    if !path.is_file() {
        return false;
    }
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            MEDIA_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::Duration;
    use tempfile::TempDir;

    fn touch(dir: &TempDir, name: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, b"x").unwrap();
        path
    }

    #[test]
    fn test_record_filename() {
        let record = FileRecord::new(PathBuf::from("/shots/a.png"));
        assert_eq!(record.filename, "a.png");
        assert!(!record.visible);
    }

    #[test]
    fn test_lists_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir, "old.png");
        // Ensure a distinct mtime for the newer file
        std::thread::sleep(Duration::from_millis(20));
        touch(&dir, "new.png");

        let files = list_files(dir.path()).unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].filename, "new.png");
        assert_eq!(files[1].filename, "old.png");
    }

    #[test]
    fn test_ignores_non_media_files() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir, "shot.png");
        touch(&dir, "notes.txt");
        fs::create_dir(dir.path().join("sub.png")).unwrap();

        let files = list_files(dir.path()).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].filename, "shot.png");
    }

    #[test]
    fn test_extension_matching_is_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir, "SHOT.PNG");

        let files = list_files(dir.path()).unwrap();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_missing_folder_is_listing_error() {
        let err = list_files(Path::new("/definitely/not/here")).unwrap_err();
        assert!(matches!(err, SnapshelfError::ListingError { .. }));
    }

    #[test]
    fn test_listing_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir, "a.png");
        touch(&dir, "b.png");
        touch(&dir, "c.png");

        let first = list_files(dir.path()).unwrap();
        let second = list_files(dir.path()).unwrap();
        assert_eq!(first, second);
    }
}
