//! Error types for `snapshelf`
//!
//! This module defines all error types used throughout the application,
//! providing clear error messages and proper error propagation.
//!
//! Error variants use `#[source]` to preserve error chains for better
//! observability and debugging.

use std::path::PathBuf;
use thiserror::Error;

/// Simple error type for wrapping string messages while implementing `std::error::Error`
#[derive(Debug, Error)]
#[error("{0}")]
pub struct StringError(pub String);

impl StringError {
    /// Create a new `StringError` from a string message
    pub fn new(msg: impl Into<String>) -> Box<Self> {
        Box::new(Self(msg.into()))
    }
}

/// Main error type for `snapshelf` operations
#[derive(Debug, Error)]
pub enum SnapshelfError {
    /// The watched folder could not be listed (missing, unreadable)
    #[error("Failed to list folder {path}: {source}")]
    ListingError {
        /// Folder that failed to list
        path: PathBuf,
        /// Underlying filesystem error
        #[source]
        source: std::io::Error,
    },

    /// A per-file action (upload, copy, open, delete) failed
    /// Preserves the underlying error source for full error chain transparency
    #[error("File action '{action}' failed for {path}: {source}")]
    ActionError {
        /// Action name as shown to the user
        action: &'static str,
        /// File the action targeted
        path: PathBuf,
        /// Underlying error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Configuration error (malformed settings, unwritable config dir)
    /// Preserves the underlying error source for full error chain transparency
    #[error("Configuration error: {0}")]
    ConfigError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl SnapshelfError {
    /// Build an [`SnapshelfError::ActionError`] from any error source
    pub fn action(
        action: &'static str,
        path: impl Into<PathBuf>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::ActionError {
            action,
            path: path.into(),
            source: Box::new(source),
        }
    }
}

/// Result type alias for `snapshelf` operations
pub type Result<T> = std::result::Result<T, SnapshelfError>;

/// Convert an error to a user-friendly message
///
/// This function takes a [`SnapshelfError`] and returns a message suitable
/// for displaying in a desktop notification.
pub fn get_user_friendly_error(error: &SnapshelfError) -> String {
    match error {
        SnapshelfError::ListingError { path, .. } => {
            format!(
                "Could not read the watched folder:\n{}\n\n\
                 Check that the folder exists and is readable,\n\
                 or pick a different folder in Settings.",
                path.display()
            )
        }
        SnapshelfError::ActionError { action, path, .. } => {
            format!(
                "Could not {action} file:\n{}\n\n\
                 The file may have been moved or deleted.",
                path.display()
            )
        }
        SnapshelfError::ConfigError(_) => "Failed to load or save configuration.\n\n\
             Your settings may not persist.\n\
             Check that the application data directory is writable."
            .to_string(),
        SnapshelfError::IoError(e) => {
            format!(
                "A file system error occurred:\n\n{e}\n\n\
                 Please check file permissions and disk space."
            )
        }
        SnapshelfError::JsonError(e) => {
            format!(
                "Configuration file is corrupted:\n\n{e}\n\n\
                 The application will use default settings."
            )
        }
    }
}
