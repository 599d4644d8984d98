//! Error types for the Latticework automaton framework.
//!
//! Every error here is a programming error raised synchronously at the
//! point of violation. Nothing is retried internally.

use crate::id::CellId;
use std::error::Error;
use std::fmt;

/// Errors from [`CoordVector`](crate::CoordVector) parsing and access.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CoordError {
    /// The text is not of the form `(v0, v1, ..., vn)`.
    Format {
        /// The rejected input.
        input: String,
        /// What was wrong with it.
        reason: String,
    },
    /// An axis index is outside `0..len`.
    IndexOutOfRange {
        /// The requested axis.
        index: usize,
        /// Number of axes in the vector.
        len: usize,
    },
    /// A write was attempted on a frozen vector.
    Immutable,
}

impl fmt::Display for CoordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Format { input, reason } => {
                write!(f, "malformed coordinate '{input}': {reason}")
            }
            Self::IndexOutOfRange { index, len } => {
                write!(f, "axis {index} out of range for {len}-dimensional coordinate")
            }
            Self::Immutable => write!(f, "coordinate vector is frozen"),
        }
    }
}

impl Error for CoordError {}

/// Errors from reading a [`StateHistory`](crate::StateHistory).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HistoryError {
    /// The requested age is not retained (`age >= depth`).
    AgeOutOfRange {
        /// The requested age.
        age: usize,
        /// The history depth.
        depth: usize,
    },
}

impl fmt::Display for HistoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AgeOutOfRange { age, depth } => {
                write!(f, "state age {age} out of range for history of depth {depth}")
            }
        }
    }
}

impl Error for HistoryError {}

/// Bad construction parameters for histories, lattices, or automata.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A dimension was requested with fewer than two cells.
    DimensionTooShort {
        /// The axis being built.
        axis: usize,
        /// The requested length.
        length: usize,
    },
    /// Memory depth must be at least 1 (age 0 is the current state).
    InvalidMemoryDepth {
        /// The rejected depth.
        depth: usize,
    },
    /// Finalizing a lattice requires a state factory.
    MissingStateFactory,
    /// The lattice would exceed the `u32` handle space, or an axis would
    /// exceed the `i32` coordinate range.
    CellCountOverflow {
        /// The cell count or axis rank that overflowed.
        value: usize,
    },
    /// An automaton step limit of zero permits no ticks.
    InvalidStepLimit,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DimensionTooShort { axis, length } => {
                write!(f, "dimension {axis} has length {length}, need at least 2")
            }
            Self::InvalidMemoryDepth { depth } => {
                write!(f, "memory depth must be at least 1, got {depth}")
            }
            Self::MissingStateFactory => write!(f, "no state factory configured"),
            Self::CellCountOverflow { value } => {
                write!(f, "cell count or rank {value} exceeds the addressable range")
            }
            Self::InvalidStepLimit => write!(f, "step limit must be greater than zero"),
        }
    }
}

impl Error for ConfigError {}

/// Violations of the calculate-then-apply protocol on a single cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellError {
    /// The bound rule produced no next state.
    NullResult {
        /// The cell being calculated.
        cell: CellId,
    },
    /// `apply_next` was called with no pending state.
    NotCalculated {
        /// The cell being applied.
        cell: CellId,
    },
    /// `calculate_next` was called on a cell with no rule bound.
    UnassignedRule {
        /// The cell being calculated.
        cell: CellId,
    },
}

impl CellError {
    /// The cell that violated the protocol.
    pub fn cell(&self) -> CellId {
        match *self {
            Self::NullResult { cell }
            | Self::NotCalculated { cell }
            | Self::UnassignedRule { cell } => cell,
        }
    }
}

impl fmt::Display for CellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NullResult { cell } => write!(f, "rule produced no state for cell {cell}"),
            Self::NotCalculated { cell } => {
                write!(f, "cell {cell} has no pending state to apply")
            }
            Self::UnassignedRule { cell } => write!(f, "cell {cell} has no rule assigned"),
        }
    }
}

impl Error for CellError {}
