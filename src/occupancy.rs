//! Occupancy classification.
//!
//! Every slot in the bar is drawn as part of a "pill" that spans runs of
//! consecutive occupied workspaces.  The first slot of a run gets a left
//! edge, the last a right edge, and a run of one gets both.
//!
//! | Class                | CSS class                    |
//! |----------------------|------------------------------|
//! | `None`               | (none)                       |
//! | `Occupied`           | `bar-ws-occupied`            |
//! | `OccupiedLeftEdge`   | `bar-ws-occupied-left`       |
//! | `OccupiedRightEdge`  | `bar-ws-occupied-right`      |
//! | `OccupiedIsolated`   | `bar-ws-occupied-left-right` |
//!
//! [`classify`] always recomputes the whole row from a snapshot; there is
//! no incremental update path.

use crate::command::WorkspaceInfo;
use crate::workspace::WorkspaceIndex;
use log::debug;

/// Whether each of the `N` workspaces holds at least one window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancySnapshot {
    occupied: Vec<bool>,
}

impl OccupancySnapshot {
    /// A row of `count` empty workspaces.
    pub fn empty(count: usize) -> Self {
        Self {
            occupied: vec![false; count],
        }
    }

    /// Build a snapshot from the set of occupied indices.
    ///
    /// Indices outside `1..=count` are ignored.
    pub fn from_occupied(count: usize, occupied: impl IntoIterator<Item = i32>) -> Self {
        let mut snapshot = Self::empty(count);
        for id in occupied {
            if let Ok(index) = WorkspaceIndex::new(id, count) {
                snapshot.occupied[index.slot()] = true;
            }
        }
        snapshot
    }

    /// Build a snapshot from raw compositor workspace data.
    ///
    /// Workspaces the compositor did not report count as empty.  Special
    /// workspaces (negative ids) and ids beyond the row are dropped.
    pub fn from_workspaces(count: usize, workspaces: &[WorkspaceInfo]) -> Self {
        let mut snapshot = Self::empty(count);
        for ws in workspaces {
            match WorkspaceIndex::new(ws.id, count) {
                Ok(index) => snapshot.occupied[index.slot()] |= ws.windows > 0,
                Err(_) => debug!("ignoring workspace {} ({} windows)", ws.id, ws.windows),
            }
        }
        snapshot
    }

    /// Number of slots covered.
    pub fn len(&self) -> usize {
        self.occupied.len()
    }

    /// Whether the snapshot covers no slots at all.
    pub fn is_empty(&self) -> bool {
        self.occupied.is_empty()
    }

    /// Occupancy of a raw index.  Anything outside the row is empty.
    pub fn is_occupied(&self, index: i64) -> bool {
        if index < 1 {
            return false;
        }
        self.occupied
            .get(index as usize - 1)
            .copied()
            .unwrap_or(false)
    }
}

/// How a single slot is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VisualOccupancyClass {
    #[default]
    None,
    /// Occupied with occupied neighbours on both sides.
    Occupied,
    /// Occupied, start of a run.
    OccupiedLeftEdge,
    /// Occupied, end of a run.
    OccupiedRightEdge,
    /// Occupied with no occupied neighbour.
    OccupiedIsolated,
}

impl VisualOccupancyClass {
    /// Combine the two edge flags of an occupied slot.
    pub fn from_edges(left: bool, right: bool) -> Self {
        match (left, right) {
            (true, true) => Self::OccupiedIsolated,
            (true, false) => Self::OccupiedLeftEdge,
            (false, true) => Self::OccupiedRightEdge,
            (false, false) => Self::Occupied,
        }
    }

    pub fn is_occupied(self) -> bool {
        self != Self::None
    }

    pub fn has_left_edge(self) -> bool {
        matches!(self, Self::OccupiedLeftEdge | Self::OccupiedIsolated)
    }

    pub fn has_right_edge(self) -> bool {
        matches!(self, Self::OccupiedRightEdge | Self::OccupiedIsolated)
    }

    /// The style class applied to the slot's label, if any.
    pub fn css_class(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Occupied => Some("bar-ws-occupied"),
            Self::OccupiedLeftEdge => Some("bar-ws-occupied-left"),
            Self::OccupiedRightEdge => Some("bar-ws-occupied-right"),
            Self::OccupiedIsolated => Some("bar-ws-occupied-left-right"),
        }
    }

    /// Every CSS class this module may set, so a view can clear them.
    pub const ALL_CSS_CLASSES: [&'static str; 4] = [
        "bar-ws-occupied",
        "bar-ws-occupied-left",
        "bar-ws-occupied-right",
        "bar-ws-occupied-left-right",
    ];
}

/// Classify every slot of the snapshot, in index order.
///
/// The result has exactly `snapshot.len()` entries; entry `k` belongs to
/// workspace `k + 1`.
pub fn classify(snapshot: &OccupancySnapshot) -> Vec<VisualOccupancyClass> {
    (1..=snapshot.len() as i64)
        .map(|i| {
            if !snapshot.is_occupied(i) {
                return VisualOccupancyClass::None;
            }
            VisualOccupancyClass::from_edges(
                !snapshot.is_occupied(i - 1),
                !snapshot.is_occupied(i + 1),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::VisualOccupancyClass::*;

    #[test]
    fn example_row() {
        let snap = OccupancySnapshot::from_occupied(9, [2, 3, 6]);
        assert_eq!(
            classify(&snap),
            vec![
                None,
                OccupiedLeftEdge,
                OccupiedRightEdge,
                None,
                None,
                OccupiedIsolated,
                None,
                None,
                None
            ]
        );
    }

    #[test]
    fn run_of_three_has_plain_middle() {
        let snap = OccupancySnapshot::from_occupied(9, [4, 5, 6]);
        let classes = classify(&snap);
        assert_eq!(classes[3], OccupiedLeftEdge);
        assert_eq!(classes[4], Occupied);
        assert_eq!(classes[5], OccupiedRightEdge);
    }

    #[test]
    fn row_ends_count_as_edges() {
        let snap = OccupancySnapshot::from_occupied(9, 1..=9);
        let classes = classify(&snap);
        assert_eq!(classes[0], OccupiedLeftEdge);
        assert_eq!(classes[8], OccupiedRightEdge);
        assert!(classes[1..8].iter().all(|c| *c == Occupied));
    }

    #[test]
    fn single_slot_row() {
        assert_eq!(classify(&OccupancySnapshot::from_occupied(1, [1])), vec![OccupiedIsolated]);
        assert_eq!(classify(&OccupancySnapshot::empty(1)), vec![None]);
    }

    #[test]
    fn empty_row() {
        let classes = classify(&OccupancySnapshot::empty(9));
        assert_eq!(classes.len(), 9);
        assert!(classes.iter().all(|c| *c == None));
    }

    #[test]
    fn missing_and_foreign_workspaces_are_unoccupied() {
        let workspaces = [
            WorkspaceInfo { id: 2, windows: 3 },
            WorkspaceInfo { id: 3, windows: 0 },
            WorkspaceInfo { id: -98, windows: 1 },
            WorkspaceInfo { id: 12, windows: 4 },
        ];
        let snap = OccupancySnapshot::from_workspaces(9, &workspaces);
        let occupied: Vec<i64> = (1..=9).filter(|i| snap.is_occupied(*i)).collect();
        assert_eq!(occupied, vec![2]);
        assert!(!snap.is_occupied(0));
        assert!(!snap.is_occupied(10));
    }

    #[test]
    fn css_classes_match_class() {
        assert_eq!(None.css_class(), Option::None);
        assert_eq!(Occupied.css_class(), Some("bar-ws-occupied"));
        assert_eq!(OccupiedLeftEdge.css_class(), Some("bar-ws-occupied-left"));
        assert_eq!(OccupiedRightEdge.css_class(), Some("bar-ws-occupied-right"));
        assert_eq!(OccupiedIsolated.css_class(), Some("bar-ws-occupied-left-right"));
    }

    /// Checks the edge rules against every snapshot of rows up to 10 wide.
    #[test]
    fn exhaustive_small_rows() {
        for n in 1..=10usize {
            for mask in 0u32..(1 << n) {
                let occ = |i: i64| i >= 1 && i <= n as i64 && mask & (1 << (i - 1)) != 0;
                let snap =
                    OccupancySnapshot::from_occupied(n, (1..=n as i32).filter(|i| occ(*i as i64)));
                let classes = classify(&snap);

                assert_eq!(classes.len(), n);
                for (k, class) in classes.iter().enumerate() {
                    let i = k as i64 + 1;
                    assert_eq!(class.is_occupied(), occ(i), "n={n} mask={mask:b} i={i}");
                    if occ(i) {
                        assert_eq!(class.has_left_edge(), !occ(i - 1));
                        assert_eq!(class.has_right_edge(), !occ(i + 1));
                    }
                }
                assert_eq!(classify(&snap), classes);
            }
        }
    }
}
