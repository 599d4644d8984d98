//! Incremental N-dimensional lattice construction.
//!
//! [`LatticeBuilder`] starts from a single zero-dimensional cell and
//! extrudes one axis at a time. Extruding axis `k` to length `L` copies
//! the whole current lattice `L - 1` times, one layer per rank, and
//! stitches the copies together along `k`:
//!
//! ```text
//!   rank 0 (existing)      rank 1              rank L-1
//!   b ──d── x      ──k──▶  a ──d── x'  ──k──▶  ...
//! ```
//!
//! Every relation `b ─d─ x` on an already-built axis `d < k` is
//! reproduced in each new layer as `a ─d─ x'`, where `a` and `x'` are
//! the rank-`r` counterparts of `b` and `x`. Counterparts are tracked
//! with an explicit old→new handle map per rank. A cyclic axis is then
//! closed by linking each rank-`L-1` cell back to its rank-0 origin.

use std::sync::Arc;

use indexmap::IndexMap;
use latticework_core::{CellId, ConfigError};
use tracing::{debug, trace};

use crate::boundary::Boundary;
use crate::error::LatticeError;
use crate::lattice::Lattice;
use crate::relation::Relation;
use crate::rule::{Rule, StateFactory};

/// Builds a lattice one dimension at a time.
///
/// # Examples
///
/// ```
/// use latticework_space::{Boundary, LatticeBuilder};
///
/// let mut b = LatticeBuilder::new(0u8, 1).unwrap();
/// b.add_dimension(3, Boundary::Linear).unwrap();
/// let lattice = b.into_lattice();
///
/// let origin = lattice.cell(lattice.origin()).unwrap();
/// assert!(origin.previous(0).unwrap().is_absent());
/// let cell1 = origin.next(0).unwrap().cell().unwrap();
/// let cell2 = lattice.cell(cell1).unwrap().next(0).unwrap().cell().unwrap();
/// assert!(lattice.cell(cell2).unwrap().next(0).unwrap().is_absent());
/// ```
pub struct LatticeBuilder<S> {
    lattice: Lattice<S>,
    initial: S,
    rule: Option<Arc<dyn Rule<S>>>,
}

impl<S: Clone> LatticeBuilder<S> {
    /// A builder holding one zero-dimensional cell in state `initial`.
    ///
    /// Returns `Err(LatticeError::Config)` if `memory_depth == 0`.
    pub fn new(initial: S, memory_depth: usize) -> Result<Self, LatticeError> {
        let lattice = Lattice::single(initial.clone(), 0, memory_depth)?;
        Ok(Self {
            lattice,
            initial,
            rule: None,
        })
    }

    /// Bind `rule` to every cell built so far and every cell built
    /// later.
    pub fn with_rule(mut self, rule: Arc<dyn Rule<S>>) -> Self {
        self.lattice.assign_rule_all(Arc::clone(&rule));
        self.rule = Some(rule);
        self
    }

    /// Number of axes built so far.
    pub fn dimension_count(&self) -> usize {
        self.lattice
            .cell(self.lattice.origin())
            .map_or(0, |c| c.dimension_count())
    }

    /// Number of cells built so far.
    pub fn cell_count(&self) -> usize {
        self.lattice.cell_count()
    }

    /// The lattice under construction.
    pub fn lattice(&self) -> &Lattice<S> {
        &self.lattice
    }

    /// Extrude a new axis of `length` cells.
    ///
    /// Returns `Err(ConfigError::DimensionTooShort)` if `length < 2`, and
    /// `Err(ConfigError::CellCountOverflow)` if the result would exceed
    /// the handle space or the `i32` coordinate range. Both are checked
    /// before anything is touched, so on error the lattice is unchanged.
    pub fn add_dimension(
        &mut self,
        length: usize,
        boundary: Boundary,
    ) -> Result<&mut Self, LatticeError> {
        let axis = self.dimension_count();
        if length < 2 {
            return Err(ConfigError::DimensionTooShort { axis, length }.into());
        }
        let frontier = self.lattice.all_cells();
        let total = frontier
            .len()
            .checked_mul(length)
            .filter(|&n| n <= u32::MAX as usize)
            .ok_or(ConfigError::CellCountOverflow {
                value: frontier.len().saturating_mul(length),
            })?;
        // Ranks become i32 coordinates.
        if i32::try_from(length - 1).is_err() {
            return Err(ConfigError::CellCountOverflow { value: length - 1 }.into());
        }
        // Every extruded cell takes a fresh arena slot.
        let arena = self.lattice.arena_len() + (total - frontier.len());
        if arena > u32::MAX as usize {
            return Err(ConfigError::CellCountOverflow { value: arena }.into());
        }

        for &id in &frontier {
            let cell = self.lattice.try_cell_mut(id)?;
            cell.set_dimension_count(axis + 1)?;
            cell.set_previous(axis, Relation::Absent)?;
            cell.set_next(axis, Relation::Absent)?;
        }

        let mut layer = frontier.clone();
        for rank in 1..length {
            layer = self.extrude_layer(&layer, axis, rank)?;
        }

        if boundary.is_cyclic() {
            self.close_ring(&frontier, axis, length)?;
        }

        debug!(axis, length, ?boundary, cells = total, "extruded lattice axis");
        Ok(self)
    }

    /// Copy `layer` into a new rank along `axis`, reproducing every
    /// relation on the axes below it. Returns the new layer.
    fn extrude_layer(
        &mut self,
        layer: &[CellId],
        axis: usize,
        rank: usize,
    ) -> Result<Vec<CellId>, LatticeError> {
        let rank_coord = i32::try_from(rank).map_err(|_| ConfigError::CellCountOverflow {
            value: rank,
        })?;
        let mut counterpart: IndexMap<CellId, CellId> = IndexMap::with_capacity(layer.len());

        for &b in layer {
            let coord = self.lattice.try_cell(b)?.coord().with_axis(axis, rank_coord)?;
            let a = self.lattice.alloc_isolated(self.initial.clone(), axis + 1)?;
            let cell = self.lattice.try_cell_mut(a)?;
            cell.replace_coord(coord);
            if let Some(rule) = &self.rule {
                cell.set_rule(Arc::clone(rule));
            }
            counterpart.insert(b, a);
        }

        let translate = |rel: Relation| -> Relation {
            rel.cell()
                .and_then(|old| counterpart.get(&old).copied())
                .into()
        };

        for (&b, &a) in &counterpart {
            let below: Vec<(Relation, Relation)> = self.lattice.try_cell(b)?.links()[..axis]
                .iter()
                .map(|l| (translate(l.previous), translate(l.next)))
                .collect();

            self.lattice
                .try_cell_mut(b)?
                .set_next(axis, Relation::Present(a))?;
            let cell = self.lattice.try_cell_mut(a)?;
            cell.set_previous(axis, Relation::Present(b))?;
            cell.set_next(axis, Relation::Absent)?;
            for (d, (previous, next)) in below.into_iter().enumerate() {
                cell.set_previous(d, previous)?;
                cell.set_next(d, next)?;
            }
        }

        trace!(axis, rank, cells = counterpart.len(), "extruded layer");
        Ok(counterpart.into_values().collect())
    }

    /// Link the far end of each row along `axis` back to its start.
    fn close_ring(
        &mut self,
        starts: &[CellId],
        axis: usize,
        length: usize,
    ) -> Result<(), LatticeError> {
        for &start in starts {
            let mut last = start;
            for _ in 1..length {
                match self.lattice.try_cell(last)?.next(axis)? {
                    Relation::Present(n) => last = n,
                    Relation::Absent => break,
                }
            }
            self.lattice.link(last, axis, start)?;
        }
        Ok(())
    }

    /// Freeze every coordinate and let `factory` customize each cell
    /// once.
    pub fn finalize_space(
        mut self,
        factory: &dyn StateFactory<S>,
    ) -> Result<Lattice<S>, LatticeError> {
        let cells = self.lattice.all_cells();
        for &id in &cells {
            let cell = self.lattice.try_cell_mut(id)?;
            cell.coord_mut().freeze();
            factory.customize(cell);
        }
        debug!(
            cells = cells.len(),
            dimensions = self.dimension_count(),
            "finalized lattice"
        );
        Ok(self.lattice)
    }
}

impl<S> LatticeBuilder<S> {
    /// The lattice as built so far, without freezing or customizing.
    pub fn into_lattice(self) -> Lattice<S> {
        self.lattice
    }
}
