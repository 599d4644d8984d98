//! Optimization hooks dispatched at phase boundaries.
//!
//! A hook belongs to exactly one [`HookStage`]. Phase hooks receive the
//! lattice and the managed cell set; selection hooks return a new
//! managed set. Hooks sharing a stage run in an unspecified order and
//! must not depend on each other.

use std::fmt;

use indexmap::IndexMap;
use latticework_core::CellId;
use latticework_space::Lattice;

/// Where in a tick a hook runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HookStage {
    /// Start of `calculate_step()`, before pre-calculate hooks. Replaces
    /// the managed cell set.
    Selection,
    /// Before any managed cell is calculated.
    PreCalculate,
    /// After every pending slot has been written.
    PostCalculate,
    /// Before any pending state is committed.
    PreApply,
    /// After every pending state has been committed.
    PostApply,
}

/// Callback for the four phase-boundary stages.
pub type PhaseHookFn<S> = Box<dyn FnMut(&mut Lattice<S>, &[CellId]) + Send>;

/// Callback for [`HookStage::Selection`].
pub type SelectionFn<S> = Box<dyn FnMut(&Lattice<S>) -> Vec<CellId> + Send>;

/// Predicate deciding whether a hook retires after a run.
pub type RetirePredicate = Box<dyn FnMut(&HookRun) -> bool + Send>;

/// Facts about a completed hook invocation, passed to retirement
/// predicates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HookRun {
    /// Stage the hook ran at.
    pub stage: HookStage,
    /// Completed ticks at the time of the run.
    pub tick: u64,
    /// How many times this hook has now run, including this one.
    pub runs: u64,
}

/// When a hook removes itself from its automaton.
pub enum Retirement {
    /// Stays registered until removed explicitly.
    Never,
    /// Runs once.
    AfterRun,
    /// Retires the first time the predicate returns `true`.
    When(RetirePredicate),
}

impl fmt::Debug for Retirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Never => write!(f, "Never"),
            Self::AfterRun => write!(f, "AfterRun"),
            Self::When(_) => write!(f, "When(..)"),
        }
    }
}

enum HookAction<S> {
    Phase(PhaseHookFn<S>),
    Selection(SelectionFn<S>),
}

/// An optimization hook: a callback bound to a stage plus a retirement
/// policy.
///
/// # Examples
///
/// ```
/// use latticework_engine::{Hook, HookStage};
///
/// let hook: Hook<u8> = Hook::post_apply(|_lattice, managed| {
///     assert!(!managed.is_empty());
/// })
/// .retire_after_run();
/// assert_eq!(hook.stage(), HookStage::PostApply);
/// ```
pub struct Hook<S> {
    stage: HookStage,
    action: HookAction<S>,
    retirement: Retirement,
    runs: u64,
}

impl<S> Hook<S> {
    fn phase(stage: HookStage, f: PhaseHookFn<S>) -> Self {
        Self {
            stage,
            action: HookAction::Phase(f),
            retirement: Retirement::Never,
            runs: 0,
        }
    }

    /// Run `f` before the calculate phase.
    pub fn pre_calculate(f: impl FnMut(&mut Lattice<S>, &[CellId]) + Send + 'static) -> Self {
        Self::phase(HookStage::PreCalculate, Box::new(f))
    }

    /// Run `f` after the calculate phase.
    pub fn post_calculate(f: impl FnMut(&mut Lattice<S>, &[CellId]) + Send + 'static) -> Self {
        Self::phase(HookStage::PostCalculate, Box::new(f))
    }

    /// Run `f` before the apply phase.
    pub fn pre_apply(f: impl FnMut(&mut Lattice<S>, &[CellId]) + Send + 'static) -> Self {
        Self::phase(HookStage::PreApply, Box::new(f))
    }

    /// Run `f` after the apply phase.
    pub fn post_apply(f: impl FnMut(&mut Lattice<S>, &[CellId]) + Send + 'static) -> Self {
        Self::phase(HookStage::PostApply, Box::new(f))
    }

    /// Replace the managed cell set with `f`'s result at the start of
    /// every calculate phase.
    pub fn selection(f: impl FnMut(&Lattice<S>) -> Vec<CellId> + Send + 'static) -> Self {
        Self {
            stage: HookStage::Selection,
            action: HookAction::Selection(Box::new(f)),
            retirement: Retirement::Never,
            runs: 0,
        }
    }

    /// Retire after the first run.
    pub fn retire_after_run(mut self) -> Self {
        self.retirement = Retirement::AfterRun;
        self
    }

    /// Retire the first time `predicate` returns `true` after a run.
    pub fn retire_when(mut self, predicate: impl FnMut(&HookRun) -> bool + Send + 'static) -> Self {
        self.retirement = Retirement::When(Box::new(predicate));
        self
    }

    /// The stage this hook runs at.
    pub fn stage(&self) -> HookStage {
        self.stage
    }

    /// How many times this hook has run.
    pub fn runs(&self) -> u64 {
        self.runs
    }

    /// Record a run and report whether the hook should now retire.
    fn finish_run(&mut self, tick: u64) -> bool {
        self.runs += 1;
        let run = HookRun {
            stage: self.stage,
            tick,
            runs: self.runs,
        };
        match &mut self.retirement {
            Retirement::Never => false,
            Retirement::AfterRun => true,
            Retirement::When(predicate) => predicate(&run),
        }
    }
}

impl<S> fmt::Debug for Hook<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hook")
            .field("stage", &self.stage)
            .field("retirement", &self.retirement)
            .field("runs", &self.runs)
            .finish()
    }
}

/// Handle returned when a hook is registered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HookId(pub u64);

impl fmt::Display for HookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Counts from one dispatch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct DispatchReport {
    pub ran: usize,
    pub retired: usize,
}

/// Registered hooks of an automaton.
pub(crate) struct HookRegistry<S> {
    hooks: IndexMap<HookId, Hook<S>>,
    next_id: u64,
}

impl<S> HookRegistry<S> {
    pub(crate) fn new() -> Self {
        Self {
            hooks: IndexMap::new(),
            next_id: 0,
        }
    }

    pub(crate) fn insert(&mut self, hook: Hook<S>) -> HookId {
        let id = HookId(self.next_id);
        self.next_id += 1;
        self.hooks.insert(id, hook);
        id
    }

    pub(crate) fn remove(&mut self, id: HookId) -> bool {
        self.hooks.shift_remove(&id).is_some()
    }

    pub(crate) fn count(&self, stage: HookStage) -> usize {
        self.hooks.values().filter(|h| h.stage == stage).count()
    }

    /// Run every hook registered at a phase-boundary `stage`.
    pub(crate) fn run_phase(
        &mut self,
        stage: HookStage,
        lattice: &mut Lattice<S>,
        managed: &[CellId],
        tick: u64,
    ) -> DispatchReport {
        let mut report = DispatchReport::default();
        let mut retired = Vec::new();
        for (&id, hook) in self.hooks.iter_mut().filter(|(_, h)| h.stage == stage) {
            if let HookAction::Phase(f) = &mut hook.action {
                f(lattice, managed);
                report.ran += 1;
                if hook.finish_run(tick) {
                    retired.push(id);
                }
            }
        }
        report.retired = self.retire(&retired);
        report
    }

    /// Run every selection hook; the last result wins.
    pub(crate) fn run_selection(
        &mut self,
        lattice: &Lattice<S>,
        tick: u64,
    ) -> (Option<Vec<CellId>>, DispatchReport) {
        let mut report = DispatchReport::default();
        let mut retired = Vec::new();
        let mut selected = None;
        for (&id, hook) in self
            .hooks
            .iter_mut()
            .filter(|(_, h)| h.stage == HookStage::Selection)
        {
            if let HookAction::Selection(f) = &mut hook.action {
                selected = Some(f(lattice));
                report.ran += 1;
                if hook.finish_run(tick) {
                    retired.push(id);
                }
            }
        }
        report.retired = self.retire(&retired);
        (selected, report)
    }

    fn retire(&mut self, ids: &[HookId]) -> usize {
        ids.iter().filter(|&&id| self.remove(id)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn lattice() -> Lattice<u8> {
        Lattice::single(0, 1, 1).unwrap()
    }

    #[test]
    fn constructors_set_stage() {
        assert_eq!(Hook::<u8>::pre_calculate(|_, _| {}).stage(), HookStage::PreCalculate);
        assert_eq!(Hook::<u8>::post_calculate(|_, _| {}).stage(), HookStage::PostCalculate);
        assert_eq!(Hook::<u8>::pre_apply(|_, _| {}).stage(), HookStage::PreApply);
        assert_eq!(Hook::<u8>::post_apply(|_, _| {}).stage(), HookStage::PostApply);
        assert_eq!(Hook::<u8>::selection(|_| Vec::new()).stage(), HookStage::Selection);
    }

    #[test]
    fn run_phase_only_runs_matching_stage() {
        let hits = Arc::new(AtomicUsize::new(0));
        let mut reg = HookRegistry::new();
        let h = Arc::clone(&hits);
        reg.insert(Hook::pre_apply(move |_, _| {
            h.fetch_add(1, Ordering::Relaxed);
        }));
        let h = Arc::clone(&hits);
        reg.insert(Hook::post_apply(move |_, _| {
            h.fetch_add(10, Ordering::Relaxed);
        }));
        let mut l = lattice();
        let report = reg.run_phase(HookStage::PreApply, &mut l, &[], 0);
        assert_eq!(report, DispatchReport { ran: 1, retired: 0 });
        assert_eq!(hits.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn after_run_retires_once() {
        let mut reg = HookRegistry::new();
        reg.insert(Hook::<u8>::post_calculate(|_, _| {}).retire_after_run());
        let mut l = lattice();
        let first = reg.run_phase(HookStage::PostCalculate, &mut l, &[], 0);
        assert_eq!(first, DispatchReport { ran: 1, retired: 1 });
        let second = reg.run_phase(HookStage::PostCalculate, &mut l, &[], 1);
        assert_eq!(second, DispatchReport::default());
        assert_eq!(reg.count(HookStage::PostCalculate), 0);
    }

    #[test]
    fn predicate_sees_run_count() {
        let mut reg = HookRegistry::new();
        reg.insert(Hook::<u8>::pre_calculate(|_, _| {}).retire_when(|run| run.runs == 3));
        let mut l = lattice();
        for tick in 0..2 {
            assert_eq!(reg.run_phase(HookStage::PreCalculate, &mut l, &[], tick).retired, 0);
        }
        assert_eq!(reg.run_phase(HookStage::PreCalculate, &mut l, &[], 2).retired, 1);
        assert_eq!(reg.count(HookStage::PreCalculate), 0);
    }

    #[test]
    fn selection_returns_result() {
        let mut reg = HookRegistry::new();
        reg.insert(Hook::<u8>::selection(|l| vec![l.origin()]));
        let l = lattice();
        let (selected, report) = reg.run_selection(&l, 0);
        assert_eq!(selected, Some(vec![l.origin()]));
        assert_eq!(report.ran, 1);
    }

    #[test]
    fn remove_unregisters() {
        let mut reg = HookRegistry::new();
        let id = reg.insert(Hook::<u8>::pre_apply(|_, _| {}));
        assert!(reg.remove(id));
        assert!(!reg.remove(id));
        assert_eq!(reg.count(HookStage::PreApply), 0);
    }
}
