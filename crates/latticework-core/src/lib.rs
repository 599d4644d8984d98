//! Core types for the Latticework automaton framework.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the values every other crate passes around: cell handles, coordinate
//! vectors, bounded state histories, and the error taxonomy.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod coord;
pub mod error;
pub mod history;
pub mod id;

pub use coord::CoordVector;
pub use error::{CellError, ConfigError, CoordError, HistoryError};
pub use history::StateHistory;
pub use id::CellId;
