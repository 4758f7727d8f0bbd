//! Per-file actions
//!
//! The coordinator performs upload, copy, open, and delete through the
//! [`FileActions`] trait so the OS-facing implementation can be swapped out in
//! tests. [`SystemActions`] is the real implementation: the `open` crate for
//! launching files, `arboard` for the clipboard, an external uploader command,
//! and an `rfd` save dialog for save-as. Each call either succeeds or returns
//! an [`ActionError`](crate::error::SnapshelfError::ActionError); none of them
//! panic or block the coordinator beyond the call itself.

use crate::config::ConfigStore;
use crate::error::{Result, SnapshelfError, StringError};
use std::path::Path;
use std::process::Command;
use tracing::{debug, info};

/// External collaborator contract for per-file operations
///
/// All operations are keyed by the file's absolute path and are idempotent
/// from the caller's perspective: repeating a call after success is harmless,
/// and a failure leaves no partial state the caller must clean up.
pub trait FileActions: Send + Sync {
    /// Upload the file; returns the resulting URL
    fn upload(&self, url: &Path) -> Result<String>;
    /// Put the file's content (or its path, for non-images) on the clipboard
    fn copy_to_clipboard(&self, url: &Path) -> Result<()>;
    /// Put a plain-text URL on the clipboard (used after uploads)
    fn copy_url(&self, text: &str) -> Result<()>;
    /// Open the file or folder with the default application
    fn open(&self, url: &Path) -> Result<()>;
    /// Delete the file from disk
    fn delete(&self, url: &Path) -> Result<()>;
    /// Save a copy of the file to a user-chosen destination
    fn save_as(&self, url: &Path) -> Result<()>;
}

/// [`FileActions`] backed by the operating system and external tools
pub struct SystemActions {
    config: ConfigStore,
}

impl SystemActions {
    /// Create system actions reading the uploader command from `config`
    pub fn new(config: ConfigStore) -> Self {
        Self { config }
    }

    fn clipboard_image(url: &Path) -> Result<()> {
        let img = image::open(url)
            .map_err(|e| SnapshelfError::action("copy", url, e))?
            .into_rgba8();
        let (width, height) = img.dimensions();

        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| SnapshelfError::action("copy", url, e))?;
        clipboard
            .set_image(arboard::ImageData {
                width: width as usize,
                height: height as usize,
                bytes: img.into_raw().into(),
            })
            .map_err(|e| SnapshelfError::action("copy", url, e))?;
        Ok(())
    }

    fn clipboard_text(url: &Path) -> Result<()> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| SnapshelfError::action("copy", url, e))?;
        clipboard
            .set_text(url.to_string_lossy().into_owned())
            .map_err(|e| SnapshelfError::action("copy", url, e))?;
        Ok(())
    }

    fn is_image(url: &Path) -> bool {
        url.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                ["png", "jpg", "jpeg", "gif", "webp", "bmp"]
                    .iter()
                    .any(|known| ext.eq_ignore_ascii_case(known))
            })
    }
}

impl FileActions for SystemActions {
    fn upload(&self, url: &Path) -> Result<String> {
        let uploader = self.config.get().uploader_command;
        info!("Uploading {} via '{}'", url.display(), uploader);

        let output = Command::new(&uploader)
            .arg(url)
            .output()
            .map_err(|e| SnapshelfError::action("upload", url, e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SnapshelfError::action(
                "upload",
                url,
                StringError(format!("uploader exited with {}: {}", output.status, stderr.trim())),
            ));
        }

        let uploaded_url = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if uploaded_url.is_empty() {
            return Err(SnapshelfError::action(
                "upload",
                url,
                StringError("uploader produced no URL".to_string()),
            ));
        }

        info!("Uploaded {} -> {}", url.display(), uploaded_url);
        Ok(uploaded_url)
    }

    fn copy_to_clipboard(&self, url: &Path) -> Result<()> {
        debug!("Copying {} to clipboard", url.display());
        if Self::is_image(url) {
            Self::clipboard_image(url)
        } else {
            Self::clipboard_text(url)
        }
    }

    fn copy_url(&self, text: &str) -> Result<()> {
        debug!("Copying URL to clipboard");
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| SnapshelfError::action("copy", text, e))?;
        clipboard
            .set_text(text.to_owned())
            .map_err(|e| SnapshelfError::action("copy", text, e))?;
        Ok(())
    }

    fn open(&self, url: &Path) -> Result<()> {
        debug!("Opening {}", url.display());
        open::that(url).map_err(|e| SnapshelfError::action("open", url, e))
    }

    fn delete(&self, url: &Path) -> Result<()> {
        info!("Deleting {}", url.display());
        std::fs::remove_file(url).map_err(|e| SnapshelfError::action("delete", url, e))
    }

    fn save_as(&self, url: &Path) -> Result<()> {
        let mut dialog = rfd::FileDialog::new();
        if let Some(name) = url.file_name().and_then(|n| n.to_str()) {
            dialog = dialog.set_file_name(name);
        }

        // No destination chosen is not an error, the user cancelled
        let Some(dest) = dialog.save_file() else {
            debug!("Save-as cancelled for {}", url.display());
            return Ok(());
        };

        std::fs::copy(url, &dest).map_err(|e| SnapshelfError::action("save", url, e))?;
        info!("Saved copy of {} to {}", url.display(), dest.display());
        Ok(())
    }
}
