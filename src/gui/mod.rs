//! Tray surface of the binary
//!
//! Renders the [`snapshelf::tray::TrayMenuModel`] with the `tray-icon` crate
//! and translates menu clicks into coordinator commands.

pub mod tray;

pub use tray::TrayController;
