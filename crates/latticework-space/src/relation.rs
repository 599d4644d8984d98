//! Per-axis neighbour relations.

use latticework_core::CellId;

/// One side of a cell's link along an axis.
///
/// Absence is a first-class value: it marks a lattice edge, not a
/// missing pointer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Relation {
    /// Lattice edge; nothing lies in this direction.
    #[default]
    Absent,
    /// The neighbouring cell in this direction.
    Present(CellId),
}

impl Relation {
    /// The linked cell, if any.
    pub fn cell(self) -> Option<CellId> {
        match self {
            Self::Absent => None,
            Self::Present(id) => Some(id),
        }
    }

    /// Whether a neighbour is linked.
    pub fn is_present(self) -> bool {
        matches!(self, Self::Present(_))
    }

    /// Whether this is a lattice edge.
    pub fn is_absent(self) -> bool {
        matches!(self, Self::Absent)
    }
}

impl From<Option<CellId>> for Relation {
    fn from(v: Option<CellId>) -> Self {
        v.map_or(Self::Absent, Self::Present)
    }
}

impl From<CellId> for Relation {
    fn from(id: CellId) -> Self {
        Self::Present(id)
    }
}

/// Previous/next relation pair for a single axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct AxisLinks {
    /// Towards lower coordinates.
    pub previous: Relation,
    /// Towards higher coordinates.
    pub next: Relation,
}

impl AxisLinks {
    /// Both directions pointing back at `id`.
    pub fn self_loop(id: CellId) -> Self {
        Self {
            previous: Relation::Present(id),
            next: Relation::Present(id),
        }
    }
}
