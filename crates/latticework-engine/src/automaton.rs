//! The two-phase automaton.
//!
//! [`Automaton`] owns a lattice and steps a managed subset of its cells
//! through calculate-then-apply ticks:
//!
//! ```text
//!            calculate_step()              apply_step()
//!   ReadyForCalculation ──────▶ ReadyForApplying ──────▶ ReadyForCalculation
//!                              ◀──────┘
//!                        calculate_step() again
//!                        (overwrites pending)
//! ```
//!
//! Calculation only reads committed state and writes only pending slots;
//! application only reads each cell's own pending slot. Cells within a
//! phase are therefore independent, and a tick's result does not depend
//! on the order the managed set is visited in.

use std::time::Instant;

use indexmap::IndexSet;
use latticework_core::{CellError, CellId, ConfigError};
use latticework_space::{Lattice, LatticeError};
use tracing::{debug, debug_span};

use crate::config::AutomatonConfig;
use crate::error::StepError;
use crate::hooks::{DispatchReport, Hook, HookId, HookRegistry, HookStage};
use crate::metrics::StepMetrics;
use crate::phase::Phase;

/// Drives a lattice through two-phase simulation ticks.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use latticework_engine::{Automaton, Phase};
/// use latticework_space::{Boundary, CellRef, LatticeBuilder, Rule};
///
/// // Every cell becomes the sum of its two ring neighbours.
/// let rule: Arc<dyn Rule<u32>> = Arc::new(|c: CellRef<'_, u32>| {
///     Some(*c.previous(0)?.current() + *c.next(0)?.current())
/// });
/// let mut b = LatticeBuilder::new(1u32, 1).unwrap().with_rule(rule);
/// b.add_dimension(5, Boundary::Cyclic).unwrap();
///
/// let mut automaton = Automaton::new(b.into_lattice());
/// automaton.do_step().unwrap();
/// assert_eq!(automaton.phase(), Phase::ReadyForCalculation);
/// assert_eq!(automaton.tick(), 1);
/// let lattice = automaton.lattice();
/// assert!(lattice.iter().all(|id| *lattice.cell(id).unwrap().current() == 2));
/// ```
pub struct Automaton<S> {
    lattice: Lattice<S>,
    managed: Vec<CellId>,
    phase: Phase,
    hooks: HookRegistry<S>,
    tick: u64,
    config: AutomatonConfig,
    last_metrics: StepMetrics,
    calculate_hooks: DispatchReport,
}

impl<S> Automaton<S> {
    /// An automaton managing every cell reachable from the lattice's
    /// origin, with the default configuration.
    pub fn new(lattice: Lattice<S>) -> Self {
        let managed = lattice.all_cells();
        Self {
            lattice,
            managed,
            phase: Phase::ReadyForCalculation,
            hooks: HookRegistry::new(),
            tick: 0,
            config: AutomatonConfig::default(),
            last_metrics: StepMetrics::default(),
            calculate_hooks: DispatchReport::default(),
        }
    }

    /// Like [`new`](Self::new), with an explicit configuration.
    pub fn with_config(lattice: Lattice<S>, config: AutomatonConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut automaton = Self::new(lattice);
        automaton.config = config;
        Ok(automaton)
    }

    /// The phase the automaton expects next.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Completed ticks (successful apply phases).
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// The active configuration.
    pub fn config(&self) -> &AutomatonConfig {
        &self.config
    }

    /// The lattice being simulated.
    pub fn lattice(&self) -> &Lattice<S> {
        &self.lattice
    }

    /// Mutable access to the lattice, e.g. to force states between
    /// ticks. Topology edits are the caller's responsibility; call
    /// [`reset_managed_cells`](Self::reset_managed_cells) afterwards.
    pub fn lattice_mut(&mut self) -> &mut Lattice<S> {
        &mut self.lattice
    }

    /// Give the lattice back.
    pub fn into_lattice(self) -> Lattice<S> {
        self.lattice
    }

    /// The cells stepped each tick.
    pub fn managed_cells(&self) -> &[CellId] {
        &self.managed
    }

    /// Replace the managed set. Duplicates are dropped.
    pub fn set_managed_cells(&mut self, cells: impl IntoIterator<Item = CellId>) {
        self.managed = dedup(cells);
    }

    /// Manage every cell currently reachable from the origin.
    pub fn reset_managed_cells(&mut self) {
        self.managed = self.lattice.all_cells();
    }

    /// Metrics from the most recent phases.
    pub fn last_metrics(&self) -> &StepMetrics {
        &self.last_metrics
    }

    /// Register an optimization hook.
    pub fn add_hook(&mut self, hook: Hook<S>) -> HookId {
        self.hooks.insert(hook)
    }

    /// Unregister a hook. Returns `false` if it was not registered (or
    /// has already retired).
    pub fn remove_hook(&mut self, id: HookId) -> bool {
        self.hooks.remove(id)
    }

    /// Number of hooks registered at `stage`.
    pub fn hook_count(&self, stage: HookStage) -> usize {
        self.hooks.count(stage)
    }

    /// Commit every managed cell's pending state.
    ///
    /// Pre-apply hooks run first and may rewrite or consume pending
    /// states. After they return, every managed cell is checked for a
    /// pending state before any is committed; if one is missing the step
    /// fails with `NotCalculated` and no current state changes. On
    /// success the phase returns to [`Phase::ReadyForCalculation`] and
    /// the tick counter advances.
    pub fn apply_step(&mut self) -> Result<(), StepError> {
        let _span = debug_span!("apply_step", tick = self.tick).entered();
        let start = Instant::now();

        let pre = self
            .hooks
            .run_phase(HookStage::PreApply, &mut self.lattice, &self.managed, self.tick);

        for &id in &self.managed {
            let cell = self
                .lattice
                .try_cell(id)
                .map_err(StepError::Application)?;
            if !cell.has_pending() {
                return Err(StepError::Application(LatticeError::Cell(
                    CellError::NotCalculated { cell: id },
                )));
            }
        }
        for &id in &self.managed {
            self.lattice
                .apply_next(id)
                .map_err(StepError::Application)?;
        }
        self.phase = Phase::ReadyForCalculation;
        self.tick += 1;

        let post = self
            .hooks
            .run_phase(HookStage::PostApply, &mut self.lattice, &self.managed, self.tick);

        let calc = self.calculate_hooks;
        let m = &mut self.last_metrics;
        m.apply_us = start.elapsed().as_micros() as u64;
        m.cells_applied = self.managed.len();
        m.hooks_run = calc.ran + pre.ran + post.ran;
        m.hooks_retired = calc.retired + pre.retired + post.retired;
        debug!(cells = self.managed.len(), tick = self.tick, "applied step");
        Ok(())
    }
}

impl<S: Clone> Automaton<S> {
    /// Calculate every managed cell's next state.
    ///
    /// Selection hooks run first and may replace the managed set, then
    /// pre-calculate hooks. Every managed cell's rule is evaluated
    /// against committed state before any pending slot is written, so a
    /// failing cell leaves all pending slots and the phase untouched.
    /// A failed calculation also restores the managed set and
    /// [`last_metrics`](Self::last_metrics); hooks that already ran
    /// (and any that retired) stay run.
    ///
    /// Valid from either phase: calling it again before
    /// [`apply_step`](Self::apply_step) recalculates and overwrites the
    /// pending states.
    pub fn calculate_step(&mut self) -> Result<(), StepError> {
        let _span = debug_span!("calculate_step", tick = self.tick).entered();
        let start = Instant::now();

        let (selected, selection) = self.hooks.run_selection(&self.lattice, self.tick);
        let previous = selected.map(|cells| std::mem::replace(&mut self.managed, dedup(cells)));
        let pre = self.hooks.run_phase(
            HookStage::PreCalculate,
            &mut self.lattice,
            &self.managed,
            self.tick,
        );

        let next = match self.compute_managed() {
            Ok(next) => next,
            Err(e) => {
                if let Some(managed) = previous {
                    self.managed = managed;
                }
                return Err(e);
            }
        };
        for (id, state) in next {
            self.lattice
                .try_cell_mut(id)
                .map_err(StepError::Calculation)?
                .set_pending(state);
        }
        self.phase = Phase::ReadyForApplying;

        let post = self.hooks.run_phase(
            HookStage::PostCalculate,
            &mut self.lattice,
            &self.managed,
            self.tick,
        );

        self.calculate_hooks = DispatchReport {
            ran: selection.ran + pre.ran + post.ran,
            retired: selection.retired + pre.retired + post.retired,
        };
        self.last_metrics = StepMetrics {
            calculate_us: start.elapsed().as_micros() as u64,
            cells_calculated: self.managed.len(),
            hooks_run: self.calculate_hooks.ran,
            hooks_retired: self.calculate_hooks.retired,
            ..StepMetrics::default()
        };
        debug!(cells = self.managed.len(), "calculated step");
        Ok(())
    }

    /// Evaluate every managed cell against committed state.
    fn compute_managed(&self) -> Result<Vec<(CellId, S)>, StepError> {
        self.managed
            .iter()
            .map(|&id| {
                self.lattice
                    .compute_next(id)
                    .map(|state| (id, state))
                    .map_err(StepError::Calculation)
            })
            .collect()
    }

    /// One simulation tick: [`calculate_step`](Self::calculate_step)
    /// then [`apply_step`](Self::apply_step).
    pub fn do_step(&mut self) -> Result<(), StepError> {
        if let Some(limit) = self.config.step_limit {
            if self.tick >= limit {
                return Err(StepError::StepLimitReached { limit });
            }
        }
        self.calculate_step()?;
        self.apply_step()
    }

    /// Run `ticks` ticks, stopping at the first error.
    pub fn run(&mut self, ticks: u64) -> Result<(), StepError> {
        for _ in 0..ticks {
            self.do_step()?;
        }
        Ok(())
    }
}

fn dedup(cells: impl IntoIterator<Item = CellId>) -> Vec<CellId> {
    cells
        .into_iter()
        .collect::<IndexSet<CellId>>()
        .into_iter()
        .collect()
}
