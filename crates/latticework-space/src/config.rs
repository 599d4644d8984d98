//! Declarative lattice configuration.
//!
//! [`LatticeConfig`] is the builder-input for constructing a finalized
//! lattice in one call. [`validate()`](LatticeConfig::validate) checks
//! every parameter up front; [`build()`](LatticeConfig::build) drives a
//! [`LatticeBuilder`] through the configured axes.

use std::fmt;
use std::sync::Arc;

use latticework_core::ConfigError;

use crate::boundary::Boundary;
use crate::builder::LatticeBuilder;
use crate::error::LatticeError;
use crate::lattice::Lattice;
use crate::rule::{Rule, StateFactory};

/// Length and boundary kind of one axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DimensionSpec {
    /// Number of cells along the axis. Must be at least 2.
    pub length: usize,
    /// How the ends connect.
    pub boundary: Boundary,
}

impl DimensionSpec {
    /// A wrapping axis of `length` cells.
    pub fn cyclic(length: usize) -> Self {
        Self {
            length,
            boundary: Boundary::Cyclic,
        }
    }

    /// A non-wrapping axis of `length` cells.
    pub fn linear(length: usize) -> Self {
        Self {
            length,
            boundary: Boundary::Linear,
        }
    }
}

/// Everything needed to build and finalize a lattice.
///
/// # Examples
///
/// ```
/// use latticework_space::{DimensionSpec, LatticeConfig, StateFactory};
///
/// struct Dead;
/// impl StateFactory<bool> for Dead {
///     fn possible_states(&self) -> Vec<bool> { vec![false, true] }
///     fn default_state(&self) -> bool { false }
/// }
///
/// let config = LatticeConfig {
///     dimensions: vec![DimensionSpec::cyclic(8), DimensionSpec::cyclic(8)],
///     memory_depth: 2,
///     initial_state: false,
///     state_factory: Some(Box::new(Dead)),
///     rule: None,
/// };
/// let lattice = config.build().unwrap();
/// assert_eq!(lattice.cell_count(), 64);
/// ```
pub struct LatticeConfig<S> {
    /// Axes in build order.
    pub dimensions: Vec<DimensionSpec>,
    /// History depth per cell. Must be at least 1.
    pub memory_depth: usize,
    /// State every cell is created in, before customization.
    pub initial_state: S,
    /// Populates the finalized lattice. Required.
    pub state_factory: Option<Box<dyn StateFactory<S>>>,
    /// Rule bound to every cell, if any.
    pub rule: Option<Arc<dyn Rule<S>>>,
}

impl<S> LatticeConfig<S> {
    /// Check the configuration without building anything.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.memory_depth == 0 {
            return Err(ConfigError::InvalidMemoryDepth {
                depth: self.memory_depth,
            });
        }
        let mut total: usize = 1;
        for (axis, dim) in self.dimensions.iter().enumerate() {
            if dim.length < 2 {
                return Err(ConfigError::DimensionTooShort {
                    axis,
                    length: dim.length,
                });
            }
            total = total
                .checked_mul(dim.length)
                .filter(|&n| n <= u32::MAX as usize)
                .ok_or(ConfigError::CellCountOverflow {
                    value: total.saturating_mul(dim.length),
                })?;
        }
        if self.state_factory.is_none() {
            return Err(ConfigError::MissingStateFactory);
        }
        Ok(())
    }

    /// Total number of cells the configuration describes.
    pub fn cell_count(&self) -> usize {
        self.dimensions.iter().map(|d| d.length).product()
    }
}

impl<S: Clone> LatticeConfig<S> {
    /// Validate, build every axis, and finalize with the state factory.
    pub fn build(self) -> Result<Lattice<S>, LatticeError> {
        self.validate()?;
        let Self {
            dimensions,
            memory_depth,
            initial_state,
            state_factory,
            rule,
        } = self;
        let factory = state_factory.ok_or(ConfigError::MissingStateFactory)?;

        let mut builder = LatticeBuilder::new(initial_state, memory_depth)?;
        if let Some(rule) = rule {
            builder = builder.with_rule(rule);
        }
        for dim in &dimensions {
            builder.add_dimension(dim.length, dim.boundary)?;
        }
        builder.finalize_space(factory.as_ref())
    }
}

impl<S: fmt::Debug> fmt::Debug for LatticeConfig<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LatticeConfig")
            .field("dimensions", &self.dimensions)
            .field("memory_depth", &self.memory_depth)
            .field("initial_state", &self.initial_state)
            .field("state_factory", &self.state_factory.is_some())
            .field("rule", &self.rule.is_some())
            .finish()
    }
}
