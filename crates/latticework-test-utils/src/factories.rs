//! Reusable state factory fixtures.

use latticework_space::{Cell, StateFactory};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Every cell starts in the same state.
pub struct ConstantFactory<S> {
    pub state: S,
    pub possible: Vec<S>,
}

impl<S: Clone> ConstantFactory<S> {
    pub fn new(state: S) -> Self {
        Self {
            possible: vec![state.clone()],
            state,
        }
    }
}

impl<S: Clone + Send + Sync> StateFactory<S> for ConstantFactory<S> {
    fn possible_states(&self) -> Vec<S> {
        self.possible.clone()
    }

    fn default_state(&self) -> S {
        self.state.clone()
    }
}

/// Cell `i` along axis 0 starts as `labels[i]`.
///
/// Cells whose coordinate falls outside `labels` get the empty string.
pub struct CoordLabelFactory {
    pub labels: Vec<String>,
}

impl CoordLabelFactory {
    pub fn new(labels: Vec<String>) -> Self {
        Self { labels }
    }
}

impl StateFactory<String> for CoordLabelFactory {
    fn possible_states(&self) -> Vec<String> {
        self.labels.clone()
    }

    fn default_state(&self) -> String {
        String::new()
    }

    fn customize(&self, cell: &mut Cell<String>) {
        let label = cell
            .coord()
            .get(0)
            .ok()
            .and_then(|i| usize::try_from(i).ok())
            .and_then(|i| self.labels.get(i).cloned())
            .unwrap_or_default();
        cell.force_state(label);
    }
}

/// Draws each cell's state from `possible` with a ChaCha8 stream
/// seeded from `seed` and the cell's coordinate.
///
/// The draw depends only on the coordinate, never on visit order, so
/// two lattices built with the same seed start identical.
pub struct SeededRandomFactory<S> {
    pub seed: u64,
    pub possible: Vec<S>,
    pub fallback: S,
}

impl<S> SeededRandomFactory<S> {
    pub fn new(seed: u64, possible: Vec<S>, fallback: S) -> Self {
        Self {
            seed,
            possible,
            fallback,
        }
    }
}

impl<S: Clone + Send + Sync> StateFactory<S> for SeededRandomFactory<S> {
    fn possible_states(&self) -> Vec<S> {
        self.possible.clone()
    }

    fn default_state(&self) -> S {
        self.fallback.clone()
    }

    fn customize(&self, cell: &mut Cell<S>) {
        let mix = cell.coord().as_slice().iter().fold(self.seed, |acc, &v| {
            acc.wrapping_mul(0x9E37_79B9_7F4A_7C15)
                .wrapping_add(v as u32 as u64)
        });
        let mut rng = ChaCha8Rng::seed_from_u64(mix);
        let state = self.random_state(&mut rng);
        cell.force_state(state);
    }
}
