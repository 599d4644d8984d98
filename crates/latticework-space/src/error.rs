//! Error types for lattice construction and traversal.

use latticework_core::{CellError, CellId, ConfigError, CoordError, HistoryError};
use std::error::Error;
use std::fmt;

/// Errors arising from lattice construction, relation access, or the
/// per-cell calculate/apply protocol.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LatticeError {
    /// Bad build parameters.
    Config(ConfigError),
    /// A coordinate operation failed.
    Coord(CoordError),
    /// A history read failed.
    History(HistoryError),
    /// A cell violated the calculate/apply protocol.
    Cell(CellError),
    /// The handle does not address a cell in this lattice.
    UnknownCell {
        /// The offending handle.
        cell: CellId,
    },
    /// An axis index is outside the cell's dimension count.
    DimensionOutOfRange {
        /// The requested axis.
        axis: usize,
        /// The cell's dimension count.
        dimensions: usize,
    },
    /// A relative walk ran into an absent relation.
    EdgeReached {
        /// The last cell reached before the edge.
        cell: CellId,
        /// The axis being walked.
        axis: usize,
    },
}

impl fmt::Display for LatticeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "invalid configuration: {e}"),
            Self::Coord(e) => write!(f, "coordinate error: {e}"),
            Self::History(e) => write!(f, "history error: {e}"),
            Self::Cell(e) => write!(f, "{e}"),
            Self::UnknownCell { cell } => write!(f, "cell {cell} is not in this lattice"),
            Self::DimensionOutOfRange { axis, dimensions } => {
                write!(f, "axis {axis} out of range for {dimensions}-dimensional cell")
            }
            Self::EdgeReached { cell, axis } => {
                write!(f, "walk along axis {axis} hit the lattice edge at cell {cell}")
            }
        }
    }
}

impl Error for LatticeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Coord(e) => Some(e),
            Self::History(e) => Some(e),
            Self::Cell(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for LatticeError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<CoordError> for LatticeError {
    fn from(e: CoordError) -> Self {
        Self::Coord(e)
    }
}

impl From<HistoryError> for LatticeError {
    fn from(e: HistoryError) -> Self {
        Self::History(e)
    }
}

impl From<CellError> for LatticeError {
    fn from(e: CellError) -> Self {
        Self::Cell(e)
    }
}
