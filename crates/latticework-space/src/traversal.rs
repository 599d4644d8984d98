//! Breadth-first enumeration of a lattice from its origin.
//!
//! Membership of a lattice is reachability from the origin; these types
//! are the only way to enumerate it. [`Traversal`] is a detached cursor
//! that borrows the lattice only for the duration of each step, so the
//! caller may edit relations between steps. [`Iter`] is the borrowing
//! `Iterator` form.

use std::collections::VecDeque;

use indexmap::IndexSet;
use latticework_core::CellId;

use crate::lattice::Lattice;

/// Restartable breadth-first cursor over the cells reachable from an
/// origin.
///
/// A cell's relations are read when the cell is yielded, not when it is
/// discovered. Consequently, if relations change between steps:
///
/// - edges added to cells still waiting in the queue are picked up;
/// - edits to cells already yielded are ignored;
/// - edits to the cell being yielded at that moment are unspecified.
///
/// Every cell is yielded at most once, so a traversal over a finite
/// arena always terminates.
#[derive(Clone, Debug)]
pub struct Traversal {
    origin: CellId,
    queue: VecDeque<CellId>,
    seen: IndexSet<CellId>,
}

impl Traversal {
    /// A traversal that will start at `origin`.
    pub fn new(origin: CellId) -> Self {
        let mut t = Self {
            origin,
            queue: VecDeque::new(),
            seen: IndexSet::new(),
        };
        t.restart();
        t
    }

    /// Rewind to the origin, forgetting everything visited.
    pub fn restart(&mut self) {
        self.queue.clear();
        self.seen.clear();
        self.queue.push_back(self.origin);
        self.seen.insert(self.origin);
    }

    /// Yield the next cell, expanding its neighbours against the
    /// lattice as it is now.
    pub fn advance<S>(&mut self, lattice: &Lattice<S>) -> Option<CellId> {
        let id = self.queue.pop_front()?;
        if let Some(cell) = lattice.cell(id) {
            for n in cell.neighbors_around() {
                if self.seen.insert(n) {
                    self.queue.push_back(n);
                }
            }
        }
        Some(id)
    }

    /// Whether every discovered cell has been yielded.
    pub fn is_finished(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of cells discovered so far, yielded or queued.
    pub fn discovered(&self) -> usize {
        self.seen.len()
    }
}

/// Borrowing breadth-first iterator over a lattice's cells.
///
/// Created by [`Lattice::iter`].
pub struct Iter<'a, S> {
    lattice: &'a Lattice<S>,
    traversal: Traversal,
}

impl<'a, S> Iter<'a, S> {
    pub(crate) fn new(lattice: &'a Lattice<S>) -> Self {
        Self {
            lattice,
            traversal: Traversal::new(lattice.origin()),
        }
    }

    /// Rewind to the origin.
    pub fn restart(&mut self) {
        self.traversal.restart();
    }
}

impl<S> Iterator for Iter<'_, S> {
    type Item = CellId;

    fn next(&mut self) -> Option<CellId> {
        self.traversal.advance(self.lattice)
    }
}

impl<S> std::iter::FusedIterator for Iter<'_, S> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::LatticeBuilder;
    use crate::relation::Relation;
    use crate::Boundary;

    fn line(len: usize) -> Lattice<u8> {
        let mut b = LatticeBuilder::new(0u8, 1).unwrap();
        b.add_dimension(len, Boundary::Linear).unwrap();
        b.into_lattice()
    }

    #[test]
    fn single_cell_yields_origin_once() {
        let lattice = Lattice::single(0u8, 2, 1).unwrap();
        let ids: Vec<CellId> = lattice.iter().collect();
        assert_eq!(ids, [lattice.origin()]);
    }

    #[test]
    fn iter_is_restartable() {
        let lattice = line(5);
        let mut it = lattice.iter();
        let first: Vec<CellId> = it.by_ref().take(3).collect();
        it.restart();
        let all: Vec<CellId> = it.collect();
        assert_eq!(all.len(), 5);
        assert_eq!(&all[..3], first.as_slice());
    }

    #[test]
    fn edge_added_ahead_of_frontier_is_picked_up() {
        let mut lattice = line(3);
        let origin = lattice.origin();
        let stray = lattice.alloc_isolated(7, 1).unwrap();
        // Unreachable until linked.
        assert_eq!(lattice.all_cells().len(), 3);

        let mut t = lattice.traversal();
        assert_eq!(t.advance(&lattice), Some(origin));
        // origin's neighbour is queued but not yet expanded.
        let queued = lattice.cell(origin).unwrap().next(0).unwrap().cell().unwrap();
        lattice
            .cell_mut(queued)
            .unwrap()
            .set_previous(0, Relation::Present(stray))
            .unwrap();

        let mut rest = Vec::new();
        while let Some(id) = t.advance(&lattice) {
            rest.push(id);
        }
        assert!(rest.contains(&stray));
    }

    #[test]
    fn edge_added_behind_frontier_is_ignored() {
        let mut lattice = line(3);
        let origin = lattice.origin();
        let stray = lattice.alloc_isolated(7, 1).unwrap();

        let mut t = lattice.traversal();
        assert_eq!(t.advance(&lattice), Some(origin));
        lattice
            .cell_mut(origin)
            .unwrap()
            .set_previous(0, Relation::Present(stray))
            .unwrap();

        let mut rest = Vec::new();
        while let Some(id) = t.advance(&lattice) {
            rest.push(id);
        }
        assert!(!rest.contains(&stray));
        assert!(t.is_finished());

        t.restart();
        let mut all = Vec::new();
        while let Some(id) = t.advance(&lattice) {
            all.push(id);
        }
        assert!(all.contains(&stray));
    }
}
