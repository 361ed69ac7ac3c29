//! Active-workspace indicator positioning.
//!
//! The marker sits after the row of slots and is pulled back to the left
//! by a negative offset, so the last workspace has the smallest offset
//! and workspace 1 the largest:
//!
//! ```text
//! offset = -(slot_width * (N - active + 1) + side_pad / 2 - nudge)
//! ```
//!
//! All values are in `rem`.

use crate::workspace::WorkspaceIndex;
use log::warn;

/// Geometry of the slot row, in `rem`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorLayout {
    /// Width of one slot.
    pub slot_width: f64,
    /// Horizontal padding on each side of the row.
    pub side_pad: f64,
    /// Correction for the marker glyph's own width.
    pub nudge: f64,
}

impl Default for IndicatorLayout {
    fn default() -> Self {
        Self {
            slot_width: 1.772,
            side_pad: 0.546,
            nudge: 0.2,
        }
    }
}

/// Horizontal offset of the marker relative to the end of the row.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct IndicatorOffset(pub f64);

impl IndicatorOffset {
    /// Offset in `rem`.  Always negative for sane layouts.
    pub fn rem(self) -> f64 {
        self.0
    }

    /// Distance of the marker's leading edge from the start of the padded
    /// row, for toolkits that cannot express negative margins.
    pub fn from_row_start(self, count: usize, layout: &IndicatorLayout) -> f64 {
        layout.side_pad + count as f64 * layout.slot_width + self.0
    }
}

/// Compute the marker offset for `active` in a row of `count` slots.
pub fn position(active: WorkspaceIndex, count: usize, layout: &IndicatorLayout) -> IndicatorOffset {
    let slots_from_end = (count + 1).saturating_sub(active.get()) as f64;
    IndicatorOffset(-(layout.slot_width * slots_from_end + layout.side_pad / 2.0 - layout.nudge))
}

/// The marker's state between events.
///
/// Caches the last active workspace so that repeated notifications for the
/// same workspace do not trigger a redraw.  The offset itself is always
/// computed from the freshly delivered value.
#[derive(Debug, Clone)]
pub struct ActiveIndicator {
    count: usize,
    layout: IndicatorLayout,
    last: Option<WorkspaceIndex>,
    offset: IndicatorOffset,
}

impl ActiveIndicator {
    pub fn new(count: usize, layout: IndicatorLayout) -> Self {
        Self {
            count,
            layout,
            last: None,
            offset: IndicatorOffset::default(),
        }
    }

    /// Apply an active-workspace notification.
    ///
    /// Out-of-range ids are clamped to the row and logged.  Returns `true`
    /// when the marker has to move.
    pub fn update(&mut self, raw_active: i32) -> bool {
        let active = match WorkspaceIndex::new(raw_active, self.count) {
            Ok(index) => index,
            Err(e) => {
                let clamped = WorkspaceIndex::clamped(raw_active, self.count);
                warn!("{}, clamping indicator to {}", e, clamped);
                clamped
            }
        };

        if self.last == Some(active) {
            return false;
        }
        self.offset = position(active, self.count, &self.layout);
        self.last = Some(active);
        true
    }

    /// The workspace the marker currently points at, if any update arrived.
    pub fn active(&self) -> Option<WorkspaceIndex> {
        self.last
    }

    pub fn offset(&self) -> IndicatorOffset {
        self.offset
    }

    pub fn layout(&self) -> &IndicatorLayout {
        &self.layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn ws(i: i32) -> WorkspaceIndex {
        WorkspaceIndex::new(i, 9).unwrap()
    }

    #[test]
    fn last_workspace_is_one_slot_back() {
        let l = IndicatorLayout::default();
        let off = position(ws(9), 9, &l);
        assert!(approx(off.rem(), -(l.slot_width + l.side_pad / 2.0 - l.nudge)));
    }

    #[test]
    fn first_workspace_default_layout() {
        let off = position(ws(1), 9, &IndicatorLayout::default());
        // 1.772 * 9 + 0.273 - 0.2
        assert!(approx(off.rem(), -16.021), "got {}", off.rem());
    }

    #[test]
    fn each_step_moves_one_slot() {
        let l = IndicatorLayout::default();
        for i in 1..9 {
            let a = position(ws(i), 9, &l).rem();
            let b = position(ws(i + 1), 9, &l).rem();
            assert!(approx(b - a, l.slot_width));
        }
    }

    #[test]
    fn leading_edge_lands_inside_the_slot() {
        let l = IndicatorLayout::default();
        for i in 1..=9 {
            let edge = position(ws(i), 9, &l).from_row_start(9, &l);
            let slot_start = l.side_pad + (i - 1) as f64 * l.slot_width;
            assert!(approx(edge, slot_start - l.side_pad / 2.0 + l.nudge));
        }
    }

    #[test]
    fn update_skips_repeats() {
        let mut ind = ActiveIndicator::new(9, IndicatorLayout::default());
        assert!(ind.update(3));
        assert!(!ind.update(3));
        assert!(ind.update(4));
        assert_eq!(ind.active(), Some(ws(4)));
        assert_eq!(ind.offset(), position(ws(4), 9, &IndicatorLayout::default()));
    }

    #[test]
    fn update_clamps_out_of_range() {
        let mut ind = ActiveIndicator::new(9, IndicatorLayout::default());
        assert!(ind.update(15));
        assert_eq!(ind.active(), Some(ws(9)));
        // 15 and 9 resolve to the same slot.
        assert!(!ind.update(9));
        assert!(ind.update(-2));
        assert_eq!(ind.active(), Some(ws(1)));
    }
}
