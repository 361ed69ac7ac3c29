//! Workspace indices.
//!
//! A [`WorkspaceIndex`] is a 1-based position in the bar's fixed row of
//! `N` slots.  It can only be constructed through a range check against
//! `N`, so any value of this type maps to exactly one slot.

use std::fmt;

/// Errors produced when a raw compositor id does not name a slot.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorkspaceIndexError {
    #[error("workspace {index} is outside 1..={count}")]
    OutOfRange { index: i32, count: usize },
}

/// A workspace slot, `1..=count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WorkspaceIndex(usize);

impl WorkspaceIndex {
    /// Validate `index` against a row of `count` slots.
    pub fn new(index: i32, count: usize) -> Result<Self, WorkspaceIndexError> {
        if index >= 1 && (index as usize) <= count {
            Ok(Self(index as usize))
        } else {
            Err(WorkspaceIndexError::OutOfRange { index, count })
        }
    }

    /// Like [`new`](Self::new), but pulls out-of-range values to the
    /// nearest end of the row.
    ///
    /// `count` must be at least 1.
    pub fn clamped(index: i32, count: usize) -> Self {
        let upper = count.max(1) as i64;
        Self((index as i64).clamp(1, upper) as usize)
    }

    /// The 1-based index.
    pub fn get(self) -> usize {
        self.0
    }

    /// Position of this slot in a zero-based array.
    pub fn slot(self) -> usize {
        self.0 - 1
    }

    /// Every index of a row of `count` slots, in visual order.
    pub fn all(count: usize) -> impl Iterator<Item = WorkspaceIndex> {
        (1..=count).map(WorkspaceIndex)
    }
}

impl fmt::Display for WorkspaceIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_both_ends() {
        assert_eq!(WorkspaceIndex::new(1, 9).unwrap().get(), 1);
        assert_eq!(WorkspaceIndex::new(9, 9).unwrap().get(), 9);
    }

    #[test]
    fn rejects_out_of_range() {
        assert_eq!(
            WorkspaceIndex::new(0, 9),
            Err(WorkspaceIndexError::OutOfRange { index: 0, count: 9 })
        );
        assert!(WorkspaceIndex::new(10, 9).is_err());
        assert!(WorkspaceIndex::new(-99, 9).is_err());
    }

    #[test]
    fn clamped_pulls_to_ends() {
        assert_eq!(WorkspaceIndex::clamped(-3, 9).get(), 1);
        assert_eq!(WorkspaceIndex::clamped(0, 9).get(), 1);
        assert_eq!(WorkspaceIndex::clamped(5, 9).get(), 5);
        assert_eq!(WorkspaceIndex::clamped(42, 9).get(), 9);
    }

    #[test]
    fn all_is_bijective_with_slots() {
        let slots: Vec<usize> = WorkspaceIndex::all(9).map(|i| i.slot()).collect();
        assert_eq!(slots, (0..9).collect::<Vec<_>>());
    }
}
