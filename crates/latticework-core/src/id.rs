//! Strongly-typed identifiers.

use std::fmt;

/// Handle to a cell stored in a lattice arena.
///
/// Cells never own each other; every previous/next relation is a
/// `CellId` pointing back into the arena that owns the storage.
/// `CellId(n)` is the n-th cell the arena ever allocated, so handles
/// stay stable for the lifetime of the lattice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(pub u32);

impl CellId {
    /// Arena slot this handle addresses.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u32> for CellId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_and_index() {
        let id = CellId::from(7);
        assert_eq!(id.index(), 7);
        assert_eq!(id.to_string(), "#7");
    }

    #[test]
    fn ordering_follows_allocation_order() {
        assert!(CellId(1) < CellId(2));
    }
}
