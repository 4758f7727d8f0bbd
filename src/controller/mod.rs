//! Coordination between disk state and UI-facing snapshots

pub mod sync_coordinator;

pub use sync_coordinator::{ConsumerId, SyncCoordinator};
