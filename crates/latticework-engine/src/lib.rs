//! Two-phase automaton driver for Latticework lattices.
//!
//! An [`Automaton`] owns a [`Lattice`](latticework_space::Lattice) and a
//! managed subset of its cells, and advances them through ticks made of
//! a calculate phase followed by an apply phase. Optimization [`Hook`]s
//! run at the phase boundaries and may narrow the managed set.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod automaton;
pub mod config;
pub mod error;
pub mod hooks;
pub mod metrics;
pub mod phase;

pub use automaton::Automaton;
pub use config::AutomatonConfig;
pub use error::StepError;
pub use hooks::{Hook, HookId, HookRun, HookStage, Retirement};
pub use metrics::StepMetrics;
pub use phase::Phase;
