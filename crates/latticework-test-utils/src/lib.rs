//! Test utilities and fixture capabilities for Latticework development.
//!
//! Provides reusable [`Rule`](latticework_space::Rule) and
//! [`StateFactory`](latticework_space::StateFactory) implementations plus
//! small lattice constructors for building test scenarios.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod factories;
pub mod fixtures;

pub use factories::{ConstantFactory, CoordLabelFactory, SeededRandomFactory};
pub use fixtures::{ConcatRule, CountingRule, FailingRule, NeighborSumRule};

use std::sync::Arc;

use latticework_space::{Boundary, Lattice, LatticeBuilder, LatticeError, Rule};

/// A 1-D lattice whose cells hold `labels` in coordinate order, with
/// `rule` bound to every cell.
pub fn labelled_line(
    labels: &[&str],
    boundary: Boundary,
    rule: Arc<dyn Rule<String>>,
) -> Result<Lattice<String>, LatticeError> {
    let mut builder = LatticeBuilder::new(String::new(), 1)?.with_rule(rule);
    builder.add_dimension(labels.len(), boundary)?;
    let factory = CoordLabelFactory::new(labels.iter().map(|s| s.to_string()).collect());
    builder.finalize_space(&factory)
}

/// A fully cyclic lattice with `dims` axes of `len` cells each.
pub fn torus<S: Clone>(initial: S, len: usize, dims: usize) -> Result<Lattice<S>, LatticeError> {
    let mut builder = LatticeBuilder::new(initial, 1)?;
    for _ in 0..dims {
        builder.add_dimension(len, Boundary::Cyclic)?;
    }
    Ok(builder.into_lattice())
}
