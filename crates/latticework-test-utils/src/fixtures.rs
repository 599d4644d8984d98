//! Reusable rule fixtures.
//!
//! - [`ConcatRule`]: concatenates the previous and next neighbours'
//!   states along one axis.
//! - [`NeighborSumRule`]: sums the states of every distinct neighbour.
//! - [`CountingRule`]: increments the current state and counts calls.
//! - [`FailingRule`]: produces no result after N successful calls.

use std::sync::atomic::{AtomicUsize, Ordering};

use latticework_space::{CellRef, Rule};

/// `previous(axis).current + next(axis).current` for string states.
///
/// An absent neighbour contributes nothing.
pub struct ConcatRule {
    pub axis: usize,
}

impl ConcatRule {
    pub fn new(axis: usize) -> Self {
        Self { axis }
    }
}

impl Rule<String> for ConcatRule {
    fn compute_next(&self, cell: CellRef<'_, String>) -> Option<String> {
        let mut out = String::new();
        if let Some(left) = cell.previous(self.axis) {
            out.push_str(left.current());
        }
        if let Some(right) = cell.next(self.axis) {
            out.push_str(right.current());
        }
        Some(out)
    }
}

/// Sum of the current states of every distinct neighbour.
pub struct NeighborSumRule;

impl Rule<u64> for NeighborSumRule {
    fn compute_next(&self, cell: CellRef<'_, u64>) -> Option<u64> {
        Some(cell.neighbors().map(|n| *n.current()).sum())
    }
}

/// Increments the current state and records how often it ran.
///
/// Uses `AtomicUsize` for the call counter so it satisfies `Sync`.
#[derive(Default)]
pub struct CountingRule {
    call_count: AtomicUsize,
}

impl CountingRule {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times `compute_next()` has been called.
    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::Relaxed)
    }
}

impl Rule<u64> for CountingRule {
    fn compute_next(&self, cell: CellRef<'_, u64>) -> Option<u64> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        Some(cell.current() + 1)
    }
}

/// Behaves like [`CountingRule`] for `succeed_count` calls, then
/// returns no result.
pub struct FailingRule {
    pub succeed_count: usize,
    call_count: AtomicUsize,
}

impl FailingRule {
    /// Create a rule that succeeds `succeed_count` times then fails.
    pub fn new(succeed_count: usize) -> Self {
        Self {
            succeed_count,
            call_count: AtomicUsize::new(0),
        }
    }

    /// How many times `compute_next()` has been called.
    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::Relaxed)
    }
}

impl Rule<u64> for FailingRule {
    fn compute_next(&self, cell: CellRef<'_, u64>) -> Option<u64> {
        let n = self.call_count.fetch_add(1, Ordering::Relaxed);
        if n >= self.succeed_count {
            return None;
        }
        Some(cell.current() + 1)
    }
}
