//! Configuration data models
//!
//! This module defines the data structures used for application configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Folder watched for new screenshots and recordings
    pub watched_folder: PathBuf,
    /// Whether to show desktop notifications
    pub has_notifications: bool,
    /// Folder poll interval in milliseconds (250-10000)
    pub poll_interval_ms: u64,
    /// External command invoked to upload a file; receives the path as its
    /// only argument and prints the resulting URL on stdout
    pub uploader_command: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let watched_folder = dirs::picture_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        Self {
            watched_folder,
            has_notifications: true,
            poll_interval_ms: 1000,
            uploader_command: "imgur-upload".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.has_notifications);
        assert_eq!(config.poll_interval_ms, 1000);
    }

    #[test]
    fn test_serialization() {
        let config = AppConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config.watched_folder, deserialized.watched_folder);
        assert_eq!(
            config.has_notifications,
            deserialized.has_notifications
        );
    }
}
