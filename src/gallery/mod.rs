//! Gallery window view-model
//!
//! Visibility windowing for lazy image loading, trailing-edge scroll
//! debouncing, and the window-local derived file list.

pub mod debounce;
pub mod view;
pub mod visibility;

pub use debounce::TrailingDebouncer;
pub use view::{GalleryView, SCROLL_DEBOUNCE};
pub use visibility::{INITIAL_VISIBLE_COUNT, ItemBounds, Viewport, compute_visibility};
