//! Linked-cell lattices for Latticework automata.
//!
//! A [`Lattice`] is an arena of [`Cell`]s joined by per-axis previous/next
//! [`Relation`]s and identified by a single origin cell. Membership is
//! reachability from the origin; enumerate it with [`Lattice::iter`] or
//! a detached [`Traversal`].
//!
//! # Construction
//!
//! [`LatticeBuilder`] grows a lattice one axis at a time, each axis
//! either [`Boundary::Linear`] or [`Boundary::Cyclic`], and keeps the
//! symmetric-linking invariant on every axis already built.
//! [`LatticeConfig`] wraps the builder for one-call construction.
//!
//! # External capabilities
//!
//! The core never decides what a state *means*. A [`Rule`] computes a
//! cell's next state from a read-only [`CellRef`] of its neighbourhood;
//! a [`StateFactory`] populates a freshly built lattice.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod boundary;
pub mod builder;
pub mod cell;
pub mod config;
pub mod error;
pub mod lattice;
pub mod relation;
pub mod rule;
pub mod traversal;
pub mod view;

#[cfg(test)]
pub(crate) mod compliance;

pub use boundary::Boundary;
pub use builder::LatticeBuilder;
pub use cell::Cell;
pub use config::{DimensionSpec, LatticeConfig};
pub use error::LatticeError;
pub use lattice::Lattice;
pub use relation::{AxisLinks, Relation};
pub use rule::{Rule, StateFactory};
pub use traversal::{Iter, Traversal};
pub use view::CellRef;
