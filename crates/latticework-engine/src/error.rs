//! Error types for automaton stepping.

use std::error::Error;
use std::fmt;

use latticework_core::CellError;
use latticework_space::LatticeError;

/// Errors from `calculate_step()`, `apply_step()`, and friends.
///
/// A failed step leaves the phase flag unchanged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepError {
    /// A managed cell could not be calculated (no rule, null result, or
    /// unknown handle). No pending slot was written.
    Calculation(LatticeError),
    /// A managed cell could not be applied (nothing pending, or unknown
    /// handle). No state was committed.
    Application(LatticeError),
    /// The configured step limit has been reached.
    StepLimitReached {
        /// The configured limit.
        limit: u64,
    },
}

impl StepError {
    /// The per-cell protocol violation behind this error, if any.
    pub fn cell_error(&self) -> Option<CellError> {
        match self {
            Self::Calculation(LatticeError::Cell(e)) | Self::Application(LatticeError::Cell(e)) => {
                Some(*e)
            }
            _ => None,
        }
    }
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Calculation(e) => write!(f, "calculate step failed: {e}"),
            Self::Application(e) => write!(f, "apply step failed: {e}"),
            Self::StepLimitReached { limit } => write!(f, "step limit of {limit} ticks reached"),
        }
    }
}

impl Error for StepError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Calculation(e) | Self::Application(e) => Some(e),
            Self::StepLimitReached { .. } => None,
        }
    }
}
