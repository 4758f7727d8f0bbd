//! Configuration module
//!
//! Data model, JSON persistence, and the shared change-notifying store.

pub mod manager;
pub mod models;
pub mod store;

pub use manager::ConfigManager;
pub use models::AppConfig;
pub use store::{ConfigChange, ConfigStore};
