//! Benchmark profiles and utilities for the Latticework automaton.
//!
//! Provides pre-built lattice profiles for benchmarking:
//!
//! - [`reference_profile`]: 100x100 cyclic grid (10K cells) running a
//!   Game of Life rule
//! - [`stress_profile`]: 32x32x32 cyclic grid (~32K cells) running the
//!   same rule over a 3-D neighbourhood
//! - [`life_rule`]: the birth/survival rule used by both profiles

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::sync::Arc;

use latticework_engine::Automaton;
use latticework_space::{
    Cell, CellRef, DimensionSpec, LatticeConfig, LatticeError, Rule, StateFactory,
};

/// Conway-style birth/survival over every axis-aligned neighbour.
///
/// A dead cell with exactly `birth` live neighbours comes alive; a live
/// cell survives with `survive_min..=survive_max` live neighbours.
pub struct LifeRule {
    birth: usize,
    survive_min: usize,
    survive_max: usize,
}

impl Rule<bool> for LifeRule {
    fn compute_next(&self, cell: CellRef<'_, bool>) -> Option<bool> {
        let live = cell.neighbors().filter(|n| *n.current()).count();
        Some(if *cell.current() {
            (self.survive_min..=self.survive_max).contains(&live)
        } else {
            live == self.birth
        })
    }
}

/// The birth/survival rule for axis-aligned neighbourhoods.
///
/// Axis-aligned neighbourhoods have `2 * dims` cells, so the thresholds
/// scale with dimension count.
pub fn life_rule(dims: usize) -> Arc<dyn Rule<bool>> {
    Arc::new(LifeRule {
        birth: dims + 1,
        survive_min: dims,
        survive_max: dims + 1,
    })
}

/// Seeds roughly one cell in three alive from a hash of the coordinate.
pub struct HashSeed {
    /// Mixed into every coordinate hash.
    pub seed: u64,
}

impl StateFactory<bool> for HashSeed {
    fn possible_states(&self) -> Vec<bool> {
        vec![false, true]
    }

    fn default_state(&self) -> bool {
        false
    }

    fn customize(&self, cell: &mut Cell<bool>) {
        let h = cell
            .coord()
            .as_slice()
            .iter()
            .fold(self.seed, |acc, &v| {
                (acc ^ v as u64).wrapping_mul(6364136223846793007)
            });
        cell.force_state(h % 3 == 0);
    }
}

/// Build a reference benchmark profile: 100x100 cyclic grid (10K cells).
pub fn reference_profile(seed: u64) -> Result<Automaton<bool>, LatticeError> {
    profile(seed, &[100, 100])
}

/// Build a stress benchmark profile: 32x32x32 cyclic grid (~32K cells).
pub fn stress_profile(seed: u64) -> Result<Automaton<bool>, LatticeError> {
    profile(seed, &[32, 32, 32])
}

fn profile(seed: u64, lengths: &[usize]) -> Result<Automaton<bool>, LatticeError> {
    let config = LatticeConfig {
        dimensions: lengths.iter().map(|&l| DimensionSpec::cyclic(l)).collect(),
        memory_depth: 2,
        initial_state: false,
        state_factory: Some(Box::new(HashSeed { seed })),
        rule: Some(life_rule(lengths.len())),
    };
    Ok(Automaton::new(config.build()?))
}
