//! A single lattice node.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexSet;
use latticework_core::{CellError, CellId, CoordVector, HistoryError, StateHistory};
use smallvec::SmallVec;

use crate::error::LatticeError;
use crate::relation::{AxisLinks, Relation};
use crate::rule::Rule;

/// A state-holding node with per-axis neighbour relations.
///
/// Cells are stored in a [`Lattice`](crate::Lattice) arena and refer to
/// each other by [`CellId`]. The relation accessors here are low level:
/// they do not keep the previous/next pair symmetric. The builder, or
/// [`Lattice::link`](crate::Lattice::link), is responsible for that.
pub struct Cell<S> {
    id: CellId,
    history: StateHistory<S>,
    coord: CoordVector,
    links: SmallVec<[AxisLinks; 4]>,
    pending: Option<S>,
    rule: Option<Arc<dyn Rule<S>>>,
}

impl<S: Clone> Cell<S> {
    /// An isolated-cyclic cell: every relation on every axis points back
    /// at the cell itself, forming a valid one-cell lattice.
    pub(crate) fn isolated(
        id: CellId,
        initial: S,
        dimensions: usize,
        memory_depth: usize,
    ) -> Result<Self, LatticeError> {
        let history = StateHistory::new(memory_depth, initial)?;
        let mut coord = CoordVector::new();
        coord.set_dimension_count(dimensions)?;
        Ok(Self {
            id,
            history,
            coord,
            links: SmallVec::from_elem(AxisLinks::self_loop(id), dimensions),
            pending: None,
            rule: None,
        })
    }
}

impl<S> Cell<S> {
    /// This cell's handle in its arena.
    pub fn id(&self) -> CellId {
        self.id
    }

    /// Number of axes this cell is linked along.
    pub fn dimension_count(&self) -> usize {
        self.links.len()
    }

    /// Grow or shrink the number of axes.
    ///
    /// New axes get self-referencing relation pairs and a zero
    /// coordinate; removed axes are discarded from the end. Retained
    /// axes keep their relations and coordinates.
    pub fn set_dimension_count(&mut self, n: usize) -> Result<(), LatticeError> {
        self.coord.set_dimension_count(n)?;
        self.links.resize(n, AxisLinks::self_loop(self.id));
        Ok(())
    }

    /// The relation towards lower coordinates on `axis`.
    pub fn previous(&self, axis: usize) -> Result<Relation, LatticeError> {
        self.axis(axis).map(|l| l.previous)
    }

    /// The relation towards higher coordinates on `axis`.
    pub fn next(&self, axis: usize) -> Result<Relation, LatticeError> {
        self.axis(axis).map(|l| l.next)
    }

    /// Overwrite the previous relation on `axis`.
    pub fn set_previous(&mut self, axis: usize, rel: Relation) -> Result<(), LatticeError> {
        self.axis_mut(axis)?.previous = rel;
        Ok(())
    }

    /// Overwrite the next relation on `axis`.
    pub fn set_next(&mut self, axis: usize, rel: Relation) -> Result<(), LatticeError> {
        self.axis_mut(axis)?.next = rel;
        Ok(())
    }

    /// All relation pairs, indexed by axis.
    pub fn links(&self) -> &[AxisLinks] {
        &self.links
    }

    /// The de-duplicated set of cells one relation away, on any axis.
    ///
    /// Order is axis-major, previous before next. A self-loop
    /// contributes this cell.
    pub fn neighbors_around(&self) -> IndexSet<CellId> {
        self.links
            .iter()
            .flat_map(|l| [l.previous, l.next])
            .filter_map(Relation::cell)
            .collect()
    }

    /// The positional label.
    pub fn coord(&self) -> &CoordVector {
        &self.coord
    }

    /// Mutable access to the label. Writes fail once it is frozen.
    pub fn coord_mut(&mut self) -> &mut CoordVector {
        &mut self.coord
    }

    pub(crate) fn replace_coord(&mut self, coord: CoordVector) {
        self.coord = coord;
    }

    /// The committed state (age 0).
    pub fn current(&self) -> &S {
        self.history.current()
    }

    /// The committed state `age` generations ago.
    pub fn state_at(&self, age: usize) -> Result<&S, HistoryError> {
        self.history.state_at(age)
    }

    /// The full history.
    pub fn history(&self) -> &StateHistory<S> {
        &self.history
    }

    /// Overwrite the current state in place. Does not start a new
    /// generation and leaves any pending state alone.
    pub fn force_state(&mut self, state: S) {
        self.history.force_current(state);
    }

    /// The bound rule, if any.
    pub fn rule(&self) -> Option<&Arc<dyn Rule<S>>> {
        self.rule.as_ref()
    }

    /// Bind `rule`, replacing any previous one.
    pub fn set_rule(&mut self, rule: Arc<dyn Rule<S>>) {
        self.rule = Some(rule);
    }

    /// Unbind the rule.
    pub fn clear_rule(&mut self) {
        self.rule = None;
    }

    /// The calculated-but-not-applied next state.
    pub fn pending(&self) -> Option<&S> {
        self.pending.as_ref()
    }

    /// Whether a calculated state is waiting to be applied.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Store a calculated next state, overwriting any earlier one.
    pub fn set_pending(&mut self, state: S) {
        self.pending = Some(state);
    }

    /// Commit the pending state as a new generation and clear the slot.
    pub fn apply_next(&mut self) -> Result<(), CellError> {
        let state = self
            .pending
            .take()
            .ok_or(CellError::NotCalculated { cell: self.id })?;
        self.history.push(state);
        Ok(())
    }

    fn axis(&self, axis: usize) -> Result<&AxisLinks, LatticeError> {
        let dimensions = self.links.len();
        self.links
            .get(axis)
            .ok_or(LatticeError::DimensionOutOfRange { axis, dimensions })
    }

    fn axis_mut(&mut self, axis: usize) -> Result<&mut AxisLinks, LatticeError> {
        let dimensions = self.links.len();
        self.links
            .get_mut(axis)
            .ok_or(LatticeError::DimensionOutOfRange { axis, dimensions })
    }
}

impl<S: fmt::Debug> fmt::Debug for Cell<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cell")
            .field("id", &self.id)
            .field("coord", &self.coord)
            .field("current", self.history.current())
            .field("pending", &self.pending)
            .field("links", &self.links)
            .field("has_rule", &self.rule.is_some())
            .finish()
    }
}
