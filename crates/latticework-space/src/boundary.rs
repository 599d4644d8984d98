//! Boundary kind for a lattice axis.

/// How the two ends of a built axis are connected.
///
/// # Examples
///
/// ```
/// use latticework_space::{Boundary, LatticeBuilder};
///
/// let mut ring = LatticeBuilder::new(0u8, 1).unwrap();
/// ring.add_dimension(4, Boundary::Cyclic).unwrap();
/// let origin = ring.lattice().origin();
/// // The origin's previous neighbour wraps to the far end.
/// assert!(ring.lattice().cell(origin).unwrap().previous(0).unwrap().is_present());
///
/// let mut line = LatticeBuilder::new(0u8, 1).unwrap();
/// line.add_dimension(4, Boundary::Linear).unwrap();
/// let origin = line.lattice().origin();
/// assert!(line.lattice().cell(origin).unwrap().previous(0).unwrap().is_absent());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Boundary {
    /// Both ends are left with an absent relation.
    #[default]
    Linear,
    /// The last cell wraps around to the first (toroidal).
    Cyclic,
}

impl Boundary {
    /// Whether the axis wraps.
    pub fn is_cyclic(self) -> bool {
        matches!(self, Self::Cyclic)
    }
}
