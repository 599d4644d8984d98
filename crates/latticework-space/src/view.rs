//! Read-only neighbourhood view handed to rules.

use latticework_core::{CellId, CoordVector, HistoryError};

use crate::cell::Cell;
use crate::error::LatticeError;
use crate::lattice::Lattice;
use crate::relation::Relation;

/// A cell together with the lattice it lives in.
///
/// Rules navigate the neighbourhood through this view. It only exposes
/// committed state, which is what makes a calculation phase independent
/// of the order cells are visited in.
pub struct CellRef<'a, S> {
    lattice: &'a Lattice<S>,
    cell: &'a Cell<S>,
}

impl<S> Clone for CellRef<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for CellRef<'_, S> {}

impl<'a, S> CellRef<'a, S> {
    pub(crate) fn new(lattice: &'a Lattice<S>, cell: &'a Cell<S>) -> Self {
        Self { lattice, cell }
    }

    /// The viewed cell's handle.
    pub fn id(&self) -> CellId {
        self.cell.id()
    }

    /// The underlying cell.
    pub fn cell(&self) -> &'a Cell<S> {
        self.cell
    }

    /// The lattice the cell belongs to.
    pub fn lattice(&self) -> &'a Lattice<S> {
        self.lattice
    }

    /// The committed state.
    pub fn current(&self) -> &'a S {
        self.cell.current()
    }

    /// The committed state `age` generations ago.
    pub fn state_at(&self, age: usize) -> Result<&'a S, HistoryError> {
        self.cell.state_at(age)
    }

    /// The positional label.
    pub fn coord(&self) -> &'a CoordVector {
        self.cell.coord()
    }

    /// Number of axes.
    pub fn dimension_count(&self) -> usize {
        self.cell.dimension_count()
    }

    /// Neighbour towards lower coordinates on `axis`; `None` at an edge
    /// or past the last axis.
    pub fn previous(&self, axis: usize) -> Option<CellRef<'a, S>> {
        self.follow(self.cell.previous(axis).ok()?)
    }

    /// Neighbour towards higher coordinates on `axis`; `None` at an edge
    /// or past the last axis.
    pub fn next(&self, axis: usize) -> Option<CellRef<'a, S>> {
        self.follow(self.cell.next(axis).ok()?)
    }

    /// Every distinct cell one relation away.
    pub fn neighbors(&self) -> impl Iterator<Item = CellRef<'a, S>> + 'a {
        let lattice = self.lattice;
        self.cell
            .neighbors_around()
            .into_iter()
            .filter_map(move |id| lattice.view(id).ok())
    }

    /// The cell reached by walking `offsets` hops, one entry per axis.
    pub fn relative(&self, offsets: &[i32]) -> Result<CellRef<'a, S>, LatticeError> {
        let id = self.lattice.relative_cell(self.cell.id(), offsets)?;
        self.lattice.view(id)
    }

    fn follow(&self, rel: Relation) -> Option<CellRef<'a, S>> {
        rel.cell().and_then(|id| self.lattice.view(id).ok())
    }
}
