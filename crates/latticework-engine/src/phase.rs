//! The automaton's two-valued phase flag.

use std::fmt;

/// Which half of a tick the automaton expects next.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    /// Committed state is current; the next call should calculate.
    #[default]
    ReadyForCalculation,
    /// Every managed cell has a pending state waiting to be applied.
    ReadyForApplying,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadyForCalculation => write!(f, "ready for calculation"),
            Self::ReadyForApplying => write!(f, "ready for applying"),
        }
    }
}
