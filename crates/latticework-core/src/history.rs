//! Bounded per-cell state history.

use crate::error::{ConfigError, HistoryError};
use std::collections::VecDeque;

/// Fixed-depth ring of a cell's most recent states.
///
/// Always holds exactly `depth` entries. Age 0 is the current state,
/// age `depth - 1` the oldest retained one. A fresh history is filled
/// with the initial state at every age.
///
/// # Examples
///
/// ```
/// use latticework_core::StateHistory;
///
/// let mut h = StateHistory::new(3, 0).unwrap();
/// h.push(1);
/// h.push(2);
/// assert_eq!(h.state_at(0), Ok(&2));
/// assert_eq!(h.state_at(1), Ok(&1));
/// assert_eq!(h.state_at(2), Ok(&0));
///
/// h.force_current(9);
/// assert_eq!(h.current(), &9);
/// assert_eq!(h.state_at(1), Ok(&1));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateHistory<S> {
    // Front is age 0.
    states: VecDeque<S>,
}

impl<S: Clone> StateHistory<S> {
    /// Create a history of `depth` copies of `initial`.
    ///
    /// Returns `Err(ConfigError::InvalidMemoryDepth)` if `depth == 0`.
    pub fn new(depth: usize, initial: S) -> Result<Self, ConfigError> {
        if depth == 0 {
            return Err(ConfigError::InvalidMemoryDepth { depth });
        }
        let mut states = VecDeque::with_capacity(depth);
        states.resize(depth, initial);
        Ok(Self { states })
    }
}

impl<S> StateHistory<S> {
    /// Number of retained generations.
    pub fn depth(&self) -> usize {
        self.states.len()
    }

    /// The most recent state (age 0).
    pub fn current(&self) -> &S {
        // depth >= 1 is enforced at construction and never changes.
        &self.states[0]
    }

    /// The state `age` generations ago.
    pub fn state_at(&self, age: usize) -> Result<&S, HistoryError> {
        self.states.get(age).ok_or(HistoryError::AgeOutOfRange {
            age,
            depth: self.states.len(),
        })
    }

    /// Record a new generation, dropping the oldest.
    pub fn push(&mut self, state: S) {
        self.states.pop_back();
        self.states.push_front(state);
    }

    /// Overwrite the current state without starting a new generation.
    pub fn force_current(&mut self, state: S) {
        self.states[0] = state;
    }

    /// States from newest to oldest.
    pub fn iter(&self) -> impl Iterator<Item = &S> + '_ {
        self.states.iter()
    }
}
