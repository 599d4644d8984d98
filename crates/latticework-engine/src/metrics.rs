//! Per-tick metrics for the automaton.
//!
//! [`StepMetrics`] captures timing and volume data for the most recent
//! calculate and apply phases.

/// Timing and volume metrics for the most recent tick.
///
/// All durations are in microseconds. A successful `calculate_step()`
/// replaces the whole record; a successful `apply_step()` overwrites the
/// apply fields and the hook totals. Failed phases leave it unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepMetrics {
    /// Wall-clock time of the calculate phase, in microseconds.
    pub calculate_us: u64,
    /// Wall-clock time of the apply phase, in microseconds.
    pub apply_us: u64,
    /// Cells whose next state was calculated.
    pub cells_calculated: usize,
    /// Cells whose pending state was committed.
    pub cells_applied: usize,
    /// Hook invocations in the last calculate phase plus the apply phase
    /// that followed it.
    pub hooks_run: usize,
    /// Hooks retired in the last calculate phase plus the apply phase
    /// that followed it.
    pub hooks_retired: usize,
}
