//! Latticework: N-dimensional linked-cell lattices driven by a two-phase
//! cellular automaton.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Latticework sub-crates. For most users, adding `latticework` as a
//! single dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use std::sync::Arc;
//! use latticework::prelude::*;
//!
//! // Each cell becomes the concatenation of its left and right neighbours.
//! struct Concat;
//! impl Rule<String> for Concat {
//!     fn compute_next(&self, cell: CellRef<'_, String>) -> Option<String> {
//!         let left = cell.previous(0)?.current();
//!         let right = cell.next(0)?.current();
//!         Some(format!("{left}{right}"))
//!     }
//! }
//!
//! // Seed cell i with its own index.
//! struct Digits;
//! impl StateFactory<String> for Digits {
//!     fn possible_states(&self) -> Vec<String> { Vec::new() }
//!     fn default_state(&self) -> String { String::new() }
//!     fn customize(&self, cell: &mut Cell<String>) {
//!         let label = cell.coord().get(0).map(|i| i.to_string()).unwrap_or_default();
//!         cell.force_state(label);
//!     }
//! }
//!
//! let config = LatticeConfig {
//!     dimensions: vec![DimensionSpec::cyclic(4)],
//!     memory_depth: 2,
//!     initial_state: String::new(),
//!     state_factory: Some(Box::new(Digits)),
//!     rule: Some(Arc::new(Concat)),
//! };
//! let mut automaton = Automaton::new(config.build().unwrap());
//! automaton.do_step().unwrap();
//!
//! let states: Vec<String> = automaton.lattice().snapshot().into_values().collect();
//! assert_eq!(states, ["31", "02", "13", "20"]);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `latticework-core` | Cell handles, coordinates, state history, errors |
//! | [`space`] | `latticework-space` | Cells, lattices, builder, traversal, rule capabilities |
//! | [`engine`] | `latticework-engine` | Two-phase automaton, hooks, metrics |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and errors (`latticework-core`).
///
/// Contains [`types::CellId`], [`types::CoordVector`],
/// [`types::StateHistory`], and the shared error enums.
pub use latticework_core as types;

/// Lattice construction and the cell model (`latticework-space`).
///
/// Provides [`space::LatticeBuilder`], [`space::Lattice`], and the
/// [`space::Rule`] and [`space::StateFactory`] capabilities.
pub use latticework_space as space;

/// The two-phase automaton (`latticework-engine`).
///
/// [`engine::Automaton`] steps a lattice through calculate and apply
/// phases, with optional [`engine::Hook`]s at the phase boundaries.
pub use latticework_engine as engine;

/// Common imports for typical Latticework usage.
///
/// ```rust
/// use latticework::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use latticework_core::{CellId, CoordVector, StateHistory};

    // Errors
    pub use latticework_core::{CellError, ConfigError, CoordError, HistoryError};
    pub use latticework_space::LatticeError;

    // Space
    pub use latticework_space::{
        Boundary, Cell, CellRef, DimensionSpec, Lattice, LatticeBuilder, LatticeConfig, Relation,
        Rule, StateFactory,
    };

    // Engine
    pub use latticework_engine::{
        Automaton, AutomatonConfig, Hook, HookStage, Phase, StepError, StepMetrics,
    };
}
