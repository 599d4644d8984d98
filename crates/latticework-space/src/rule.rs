//! The two capabilities supplied from outside the core: [`Rule`] and
//! [`StateFactory`].

use rand::{Rng, RngCore};

use crate::cell::Cell;
use crate::view::CellRef;

/// Computes a cell's next state from its committed neighbourhood.
///
/// # Contract
///
/// - `compute_next` sees only committed (current and older) state through
///   the [`CellRef`]; it never observes another cell's pending value.
/// - Returning `None` is a null result and fails the step.
///
/// Any `Fn(CellRef<'_, S>) -> Option<S>` closure is a rule.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use latticework_space::{Boundary, CellRef, LatticeBuilder, Rule};
///
/// // Each cell takes the value of its previous neighbour.
/// let shift = |cell: CellRef<'_, u32>| cell.previous(0).map(|p| *p.current());
/// let rule: Arc<dyn Rule<u32>> = Arc::new(shift);
///
/// let mut b = LatticeBuilder::new(0u32, 1).unwrap().with_rule(rule);
/// b.add_dimension(3, Boundary::Cyclic).unwrap();
/// let mut lattice = b.into_lattice();
/// let origin = lattice.origin();
/// lattice.calculate_next(origin).unwrap();
/// lattice.apply_next(origin).unwrap();
/// ```
pub trait Rule<S>: Send + Sync {
    /// The next state for `cell`, or `None` if the rule has no answer.
    fn compute_next(&self, cell: CellRef<'_, S>) -> Option<S>;
}

impl<S, F> Rule<S> for F
where
    F: for<'a> Fn(CellRef<'a, S>) -> Option<S> + Send + Sync,
{
    fn compute_next(&self, cell: CellRef<'_, S>) -> Option<S> {
        self(cell)
    }
}

/// Supplies the state space and initial states of a lattice.
///
/// [`LatticeBuilder::finalize_space`](crate::LatticeBuilder::finalize_space)
/// calls [`customize`](Self::customize) exactly once per cell, so a
/// freshly finalized lattice starts populated.
pub trait StateFactory<S>: Send + Sync {
    /// Every state a cell may hold.
    fn possible_states(&self) -> Vec<S>;

    /// The state a cell holds when nothing else is specified.
    fn default_state(&self) -> S;

    /// Set up one cell of a freshly built lattice.
    ///
    /// Default: overwrite the current state with [`default_state`](Self::default_state).
    fn customize(&self, cell: &mut Cell<S>) {
        cell.force_state(self.default_state());
    }

    /// A uniformly chosen member of [`possible_states`](Self::possible_states).
    ///
    /// Falls back to [`default_state`](Self::default_state) when the
    /// state space is empty.
    fn random_state(&self, rng: &mut dyn RngCore) -> S {
        let mut states = self.possible_states();
        if states.is_empty() {
            return self.default_state();
        }
        let i = rng.random_range(0..states.len());
        states.swap_remove(i)
    }
}
