//! Viewport intersection for lazy image loading
//!
//! The gallery only eagerly loads images whose bounding box intersects the
//! current viewport. Before any real measurement exists (on mount), the first
//! [`INITIAL_VISIBLE_COUNT`] records are treated as visible as a cheap
//! approximation.

/// Number of records marked visible before viewport measurement is available
pub const INITIAL_VISIBLE_COUNT: usize = 10;

/// Vertical extent of the visible scroll area, in layout pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Scroll offset of the top edge
    pub top: f32,
    /// Height of the visible area
    pub height: f32,
}

impl Viewport {
    fn bottom(self) -> f32 {
        self.top + self.height
    }
}

/// Vertical bounding box of one rendered gallery item
///
/// Items keep their layout slot whether or not they are visible, so bounds
/// stay valid across visibility changes and scroll position is stable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemBounds {
    /// Top edge in the same coordinate space as the viewport
    pub top: f32,
    /// Item height
    pub height: f32,
}

impl ItemBounds {
    fn bottom(self) -> f32 {
        self.top + self.height
    }

    /// Whether this item intersects the viewport at all
    pub fn intersects(self, viewport: Viewport) -> bool {
        self.top < viewport.bottom() && self.bottom() > viewport.top
    }
}

/// Compute per-item visibility by intersecting bounds with the viewport
pub fn compute_visibility(bounds: &[ItemBounds], viewport: Viewport) -> Vec<bool> {
    bounds.iter().map(|b| b.intersects(viewport)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stacked(count: usize, item_height: f32) -> Vec<ItemBounds> {
        (0..count)
            .map(|i| ItemBounds {
                top: i as f32 * item_height,
                height: item_height,
            })
            .collect()
    }

    #[test]
    fn test_item_inside_viewport_is_visible() {
        let viewport = Viewport { top: 0.0, height: 600.0 };
        let item = ItemBounds { top: 100.0, height: 200.0 };
        assert!(item.intersects(viewport));
    }

    #[test]
    fn test_item_below_viewport_is_hidden() {
        let viewport = Viewport { top: 0.0, height: 600.0 };
        let item = ItemBounds { top: 600.0, height: 200.0 };
        assert!(!item.intersects(viewport));
    }

    #[test]
    fn test_partially_overlapping_item_is_visible() {
        let viewport = Viewport { top: 100.0, height: 500.0 };
        let item = ItemBounds { top: 0.0, height: 150.0 };
        assert!(item.intersects(viewport));
    }

    #[test]
    fn test_scrolled_viewport_window() {
        // 20 items of 100px, viewport shows items 5..=10
        let bounds = stacked(20, 100.0);
        let viewport = Viewport { top: 550.0, height: 500.0 };
        let visibility = compute_visibility(&bounds, viewport);

        for (i, visible) in visibility.iter().enumerate() {
            let expected = (5..=10).contains(&i);
            assert_eq!(*visible, expected, "item {i}");
        }
    }
}
