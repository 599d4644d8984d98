//! Arena-backed lattice container.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexSet;
use latticework_core::{CellError, CellId, ConfigError, CoordVector};

use crate::cell::Cell;
use crate::error::LatticeError;
use crate::relation::Relation;
use crate::rule::Rule;
use crate::traversal::{Iter, Traversal};
use crate::view::CellRef;

/// A lattice of linked cells, identified by its origin.
///
/// Storage is an arena of [`Cell`]s addressed by [`CellId`]; relations
/// are handle pairs, so cells never own each other. The arena is *not*
/// the membership list: a lattice consists of exactly the cells
/// reachable from [`origin`](Self::origin) by following relations.
/// Cells that become unreachable stay allocated but are never
/// enumerated.
///
/// # Examples
///
/// ```
/// use latticework_space::{Boundary, LatticeBuilder};
///
/// let mut b = LatticeBuilder::new('.', 1).unwrap();
/// b.add_dimension(3, Boundary::Cyclic).unwrap();
/// b.add_dimension(4, Boundary::Linear).unwrap();
/// let lattice = b.into_lattice();
/// assert_eq!(lattice.all_cells().len(), 12);
/// ```
pub struct Lattice<S> {
    cells: Vec<Cell<S>>,
    origin: CellId,
    memory_depth: usize,
}

impl<S: Clone> Lattice<S> {
    /// A one-cell lattice whose origin is isolated-cyclic on
    /// `dimensions` axes.
    ///
    /// Returns `Err(LatticeError::Config)` if `memory_depth == 0`.
    pub fn single(
        initial: S,
        dimensions: usize,
        memory_depth: usize,
    ) -> Result<Self, LatticeError> {
        let origin = CellId(0);
        let cell = Cell::isolated(origin, initial, dimensions, memory_depth)?;
        Ok(Self {
            cells: vec![cell],
            origin,
            memory_depth,
        })
    }

    /// Allocate a fresh isolated-cyclic cell in the arena.
    ///
    /// The cell is unreachable until something links to it.
    pub(crate) fn alloc_isolated(
        &mut self,
        initial: S,
        dimensions: usize,
    ) -> Result<CellId, LatticeError> {
        let index = self.cells.len();
        let raw = u32::try_from(index)
            .map_err(|_| ConfigError::CellCountOverflow { value: index + 1 })?;
        let id = CellId(raw);
        self.cells
            .push(Cell::isolated(id, initial, dimensions, self.memory_depth)?);
        Ok(id)
    }

    /// Bind `rule` to every reachable cell.
    pub fn assign_rule_all(&mut self, rule: Arc<dyn Rule<S>>) {
        for id in self.all_cells() {
            if let Some(cell) = self.cell_mut(id) {
                cell.set_rule(Arc::clone(&rule));
            }
        }
    }

    /// Committed states of every reachable cell, keyed and sorted by
    /// coordinate.
    pub fn snapshot(&self) -> BTreeMap<CoordVector, S> {
        self.iter()
            .filter_map(|id| self.cell(id))
            .map(|c| (c.coord().clone(), c.current().clone()))
            .collect()
    }

    /// Run `id`'s rule and store the result in its pending slot.
    ///
    /// Recalculating before applying silently overwrites the earlier
    /// result.
    pub fn calculate_next(&mut self, id: CellId) -> Result<(), LatticeError> {
        let next = self.compute_next(id)?;
        self.try_cell_mut(id)?.set_pending(next);
        Ok(())
    }
}

impl<S> Lattice<S> {
    /// The cell that identifies this lattice.
    pub fn origin(&self) -> CellId {
        self.origin
    }

    /// Always `false`: a lattice owns at least its origin.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of cells ever allocated, reachable or not.
    pub fn arena_len(&self) -> usize {
        self.cells.len()
    }

    /// History depth every cell in this lattice was created with.
    pub fn memory_depth(&self) -> usize {
        self.memory_depth
    }

    /// The cell behind `id`.
    pub fn cell(&self, id: CellId) -> Option<&Cell<S>> {
        self.cells.get(id.index())
    }

    /// Mutable access to the cell behind `id`.
    pub fn cell_mut(&mut self, id: CellId) -> Option<&mut Cell<S>> {
        self.cells.get_mut(id.index())
    }

    /// The cell behind `id`, or `UnknownCell`.
    pub fn try_cell(&self, id: CellId) -> Result<&Cell<S>, LatticeError> {
        self.cell(id).ok_or(LatticeError::UnknownCell { cell: id })
    }

    /// Mutable access to the cell behind `id`, or `UnknownCell`.
    pub fn try_cell_mut(&mut self, id: CellId) -> Result<&mut Cell<S>, LatticeError> {
        self.cell_mut(id).ok_or(LatticeError::UnknownCell { cell: id })
    }

    /// A rule-facing view of `id`.
    pub fn view(&self, id: CellId) -> Result<CellRef<'_, S>, LatticeError> {
        Ok(CellRef::new(self, self.try_cell(id)?))
    }

    /// Every reachable cell, in breadth-first order from the origin.
    pub fn all_cells(&self) -> Vec<CellId> {
        self.iter().collect()
    }

    /// Number of reachable cells.
    pub fn cell_count(&self) -> usize {
        self.iter().count()
    }

    /// Lazy breadth-first iterator from the origin.
    pub fn iter(&self) -> Iter<'_, S> {
        Iter::new(self)
    }

    /// A detached traversal cursor starting at the origin.
    pub fn traversal(&self) -> Traversal {
        Traversal::new(self.origin)
    }

    /// The de-duplicated set of cells one relation away from `id`.
    pub fn neighbors_around(&self, id: CellId) -> Result<IndexSet<CellId>, LatticeError> {
        Ok(self.try_cell(id)?.neighbors_around())
    }

    /// Find the reachable cell labelled `coord`.
    pub fn cell_by_coord(&self, coord: &CoordVector) -> Option<CellId> {
        self.iter()
            .find(|&id| self.cell(id).is_some_and(|c| c.coord() == coord))
    }

    /// Link `a.next(axis) = b` and `b.previous(axis) = a` together.
    pub fn link(&mut self, a: CellId, axis: usize, b: CellId) -> Result<(), LatticeError> {
        // Validate both ends before writing either.
        self.try_cell(a)?.next(axis)?;
        self.try_cell(b)?.previous(axis)?;
        self.try_cell_mut(a)?.set_next(axis, Relation::Present(b))?;
        self.try_cell_mut(b)?.set_previous(axis, Relation::Present(a))?;
        Ok(())
    }

    /// Walk `|offsets[d]|` hops along each axis `d` in the sign of the
    /// offset, starting from `from`.
    ///
    /// Only meaningful on regular lattices with a constant size per
    /// axis. Fails with `EdgeReached` if the walk runs into an absent
    /// relation.
    pub fn relative_cell(&self, from: CellId, offsets: &[i32]) -> Result<CellId, LatticeError> {
        let dimensions = self.try_cell(from)?.dimension_count();
        if offsets.len() > dimensions {
            return Err(LatticeError::DimensionOutOfRange {
                axis: offsets.len() - 1,
                dimensions,
            });
        }
        let mut at = from;
        for (axis, &offset) in offsets.iter().enumerate() {
            for _ in 0..offset.unsigned_abs() {
                let cell = self.try_cell(at)?;
                let rel = if offset > 0 {
                    cell.next(axis)?
                } else {
                    cell.previous(axis)?
                };
                at = rel
                    .cell()
                    .ok_or(LatticeError::EdgeReached { cell: at, axis })?;
            }
        }
        Ok(at)
    }

    /// Run `id`'s rule against committed state without storing the
    /// result.
    pub fn compute_next(&self, id: CellId) -> Result<S, LatticeError> {
        let cell = self.try_cell(id)?;
        let rule = cell.rule().ok_or(CellError::UnassignedRule { cell: id })?;
        rule.compute_next(CellRef::new(self, cell))
            .ok_or(LatticeError::Cell(CellError::NullResult { cell: id }))
    }

    /// Commit `id`'s pending state and clear the slot.
    pub fn apply_next(&mut self, id: CellId) -> Result<(), LatticeError> {
        self.try_cell_mut(id)?.apply_next()?;
        Ok(())
    }
}

impl<S: fmt::Debug> fmt::Debug for Lattice<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lattice")
            .field("origin", &self.origin)
            .field("arena_len", &self.cells.len())
            .field("memory_depth", &self.memory_depth)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::LatticeBuilder;
    use crate::compliance;
    use crate::Boundary;

    struct Sum;

    impl Rule<u32> for Sum {
        fn compute_next(&self, cell: CellRef<'_, u32>) -> Option<u32> {
            Some(cell.neighbors().map(|n| *n.current()).sum())
        }
    }

    struct Nothing;

    impl Rule<u32> for Nothing {
        fn compute_next(&self, _cell: CellRef<'_, u32>) -> Option<u32> {
            None
        }
    }

    fn torus(len: usize, dims: usize) -> Lattice<u32> {
        let mut b = LatticeBuilder::new(1u32, 2).unwrap();
        for _ in 0..dims {
            b.add_dimension(len, Boundary::Cyclic).unwrap();
        }
        b.into_lattice()
    }

    #[test]
    fn single_is_self_linked() {
        let l = Lattice::single("x", 2, 1).unwrap();
        assert!(!l.is_empty());
        assert_eq!(l.all_cells(), [l.origin()]);
        compliance::run_full_compliance(&l);
    }

    #[test]
    fn single_rejects_zero_depth() {
        assert!(matches!(
            Lattice::single(0u8, 1, 0),
            Err(LatticeError::Config(ConfigError::InvalidMemoryDepth { depth: 0 }))
        ));
    }

    #[test]
    fn unknown_cell_is_reported() {
        let l = Lattice::single(0u8, 1, 1).unwrap();
        assert_eq!(
            l.view(CellId(9)).err(),
            Some(LatticeError::UnknownCell { cell: CellId(9) })
        );
    }

    #[test]
    fn calculate_without_rule_fails() {
        let mut l = torus(3, 1);
        let o = l.origin();
        assert_eq!(
            l.calculate_next(o),
            Err(LatticeError::Cell(CellError::UnassignedRule { cell: o }))
        );
    }

    #[test]
    fn null_result_fails() {
        let mut l = torus(3, 1);
        l.assign_rule_all(Arc::new(Nothing));
        let o = l.origin();
        assert_eq!(
            l.calculate_next(o),
            Err(LatticeError::Cell(CellError::NullResult { cell: o }))
        );
        assert!(!l.cell(o).unwrap().has_pending());
    }

    #[test]
    fn calculate_reads_committed_state_only() {
        let mut l = torus(4, 1);
        l.assign_rule_all(Arc::new(Sum));
        let ids = l.all_cells();
        for &id in &ids {
            l.calculate_next(id).unwrap();
        }
        for &id in &ids {
            let c = l.cell(id).unwrap();
            assert_eq!(c.current(), &1);
            assert_eq!(c.pending(), Some(&2));
        }
        for &id in &ids {
            l.apply_next(id).unwrap();
        }
        assert!(ids.iter().all(|&id| *l.cell(id).unwrap().current() == 2));
    }

    #[test]
    fn relative_cell_walks_and_wraps() {
        let l = torus(4, 2);
        let o = l.origin();
        let c = l.relative_cell(o, &[1, 3]).unwrap();
        assert_eq!(l.cell(c).unwrap().coord().as_slice(), &[1, 3]);
        let back = l.relative_cell(c, &[-1, -3]).unwrap();
        assert_eq!(back, o);
        let wrapped = l.relative_cell(o, &[-1]).unwrap();
        assert_eq!(l.cell(wrapped).unwrap().coord().as_slice(), &[3, 0]);
    }

    #[test]
    fn relative_cell_errors() {
        let mut b = LatticeBuilder::new(0u8, 1).unwrap();
        b.add_dimension(3, Boundary::Linear).unwrap();
        let l = b.into_lattice();
        let o = l.origin();
        assert_eq!(
            l.relative_cell(o, &[-1]),
            Err(LatticeError::EdgeReached { cell: o, axis: 0 })
        );
        assert_eq!(
            l.relative_cell(o, &[0, 1]),
            Err(LatticeError::DimensionOutOfRange { axis: 1, dimensions: 1 })
        );
    }

    #[test]
    fn cell_by_coord_and_snapshot() {
        let l = torus(3, 2);
        let target = CoordVector::from_slice(&[2, 1]);
        let id = l.cell_by_coord(&target).unwrap();
        assert_eq!(l.cell(id).unwrap().coord(), &target);
        let snap = l.snapshot();
        assert_eq!(snap.len(), 9);
        assert_eq!(snap.keys().next().unwrap().as_slice(), &[0, 0]);
    }

    #[test]
    fn link_sets_both_sides() {
        let mut l = Lattice::single(0u8, 1, 1).unwrap();
        let o = l.origin();
        let other = l.alloc_isolated(1, 1).unwrap();
        l.link(o, 0, other).unwrap();
        assert_eq!(l.cell(o).unwrap().next(0), Ok(Relation::Present(other)));
        assert_eq!(l.cell(other).unwrap().previous(0), Ok(Relation::Present(o)));
        assert!(l.link(o, 3, other).is_err());
    }
}
