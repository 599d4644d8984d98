//! Integration test: optimization hooks and managed-set selection.
//!
//! Hooks observe and mutate the lattice at phase boundaries; selection
//! hooks narrow the managed set for each calculate phase; retirement
//! policies unregister hooks without caller involvement.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use latticework_core::{CellError, CellId};
use latticework_engine::{Automaton, Hook, HookStage, Phase};
use latticework_space::Lattice;
use latticework_test_utils::{torus, CountingRule};

fn counting_torus(len: usize, dims: usize) -> (Automaton<u64>, Arc<CountingRule>) {
    let rule = Arc::new(CountingRule::new());
    let mut lattice = torus(0u64, len, dims).unwrap();
    lattice.assign_rule_all(rule.clone());
    (Automaton::new(lattice), rule)
}

#[test]
fn active_set_selection_skips_quiescent_cells() {
    let (mut a, rule) = counting_torus(4, 2);
    // Only cells whose state is below 2 stay active.
    a.add_hook(Hook::selection(|l: &Lattice<u64>| {
        l.iter()
            .filter(|&id| l.cell(id).is_some_and(|c| *c.current() < 2))
            .collect()
    }));

    a.run(4).unwrap();
    assert_eq!(rule.calls(), 16 + 16);
    assert!(a.managed_cells().is_empty());
    let l = a.lattice();
    assert!(l.iter().all(|id| *l.cell(id).unwrap().current() == 2));
}

#[test]
fn pre_apply_hook_can_rewrite_pending() {
    let (mut a, _) = counting_torus(3, 1);
    a.add_hook(Hook::pre_apply(|l: &mut Lattice<u64>, managed: &[CellId]| {
        for &id in managed {
            if let Some(cell) = l.cell_mut(id) {
                cell.set_pending(100);
            }
        }
    }));
    a.do_step().unwrap();
    let l = a.lattice();
    assert!(l.iter().all(|id| *l.cell(id).unwrap().current() == 100));
}

#[test]
fn pre_apply_hook_consuming_pending_fails_before_any_commit() {
    let (mut a, _) = counting_torus(3, 1);
    let consumed = *a.managed_cells().last().unwrap();
    a.add_hook(Hook::pre_apply(move |l: &mut Lattice<u64>, _: &[CellId]| {
        let _ = l.apply_next(consumed);
    }));
    a.calculate_step().unwrap();

    let err = a.apply_step().unwrap_err();
    assert_eq!(
        err.cell_error(),
        Some(CellError::NotCalculated { cell: consumed })
    );
    assert_eq!(a.phase(), Phase::ReadyForApplying);
    assert_eq!(a.tick(), 0);
    // The automaton committed nothing; only the hook's own cell moved.
    let l = a.lattice();
    for id in l.iter().filter(|&id| id != consumed) {
        let cell = l.cell(id).unwrap();
        assert_eq!(*cell.current(), 0);
        assert_eq!(cell.pending(), Some(&1));
    }
}

#[test]
fn post_apply_hook_sees_advanced_tick_state() {
    let observed = Arc::new(AtomicU64::new(0));
    let seen = Arc::clone(&observed);
    let (mut a, _) = counting_torus(2, 1);
    a.add_hook(Hook::post_apply(move |l, _| {
        let origin = l.origin();
        if let Some(cell) = l.cell(origin) {
            seen.store(*cell.current(), Ordering::Relaxed);
        }
    }));
    a.run(3).unwrap();
    assert_eq!(observed.load(Ordering::Relaxed), 3);
}

#[test]
fn retire_when_predicate_uses_tick() {
    let runs = Arc::new(AtomicUsize::new(0));
    let r = Arc::clone(&runs);
    let (mut a, _) = counting_torus(2, 1);
    a.add_hook(
        Hook::pre_calculate(move |_, _| {
            r.fetch_add(1, Ordering::Relaxed);
        })
        .retire_when(|run| run.tick >= 2),
    );
    assert_eq!(a.hook_count(HookStage::PreCalculate), 1);

    a.run(5).unwrap();
    // Runs at ticks 0, 1, 2 and retires after the third.
    assert_eq!(runs.load(Ordering::Relaxed), 3);
    assert_eq!(a.hook_count(HookStage::PreCalculate), 0);
}

#[test]
fn removed_hook_never_runs() {
    let runs = Arc::new(AtomicUsize::new(0));
    let r = Arc::clone(&runs);
    let (mut a, _) = counting_torus(2, 1);
    let id = a.add_hook(Hook::post_calculate(move |_, _| {
        r.fetch_add(1, Ordering::Relaxed);
    }));
    a.do_step().unwrap();
    assert!(a.remove_hook(id));
    assert!(!a.remove_hook(id));
    a.run(2).unwrap();
    assert_eq!(runs.load(Ordering::Relaxed), 1);
}

#[test]
fn hooks_do_not_run_when_calculation_fails_early() {
    let log = Arc::new(Mutex::new(Vec::new()));
    // No rule bound: every calculation fails.
    let mut a = Automaton::new(torus(0u64, 2, 1).unwrap());
    let pre = Arc::clone(&log);
    a.add_hook(Hook::pre_calculate(move |_, _| pre.lock().unwrap().push("pre")));
    let post = Arc::clone(&log);
    a.add_hook(Hook::post_calculate(move |_, _| post.lock().unwrap().push("post")));

    assert!(a.calculate_step().is_err());
    assert_eq!(*log.lock().unwrap(), ["pre"]);
}

#[test]
fn metrics_report_hook_activity() {
    let (mut a, _) = counting_torus(3, 1);
    a.add_hook(Hook::post_apply(|_, _| {}).retire_after_run());
    a.add_hook(Hook::pre_calculate(|_, _| {}));
    a.do_step().unwrap();
    let m = a.last_metrics();
    assert_eq!(m.hooks_run, 2);
    assert_eq!(m.hooks_retired, 1);
    assert_eq!(m.cells_calculated, 3);
    assert_eq!(m.cells_applied, 3);

    a.do_step().unwrap();
    assert_eq!(a.last_metrics().hooks_run, 1);
    assert_eq!(a.hook_count(HookStage::PostApply), 0);
}

#[test]
fn repeated_apply_does_not_accumulate_hook_counts() {
    let (mut a, _) = counting_torus(3, 1);
    // Refilling pending lets apply_step run without a calculate between.
    a.add_hook(Hook::pre_apply(|l: &mut Lattice<u64>, managed: &[CellId]| {
        for &id in managed {
            if let Some(cell) = l.cell_mut(id) {
                cell.set_pending(7);
            }
        }
    }));
    a.add_hook(Hook::pre_calculate(|_, _| {}));
    a.calculate_step().unwrap();
    assert_eq!(a.last_metrics().hooks_run, 1);

    for tick in 1..=3 {
        a.apply_step().unwrap();
        assert_eq!(a.tick(), tick);
        assert_eq!(a.last_metrics().hooks_run, 2);
        assert_eq!(a.last_metrics().hooks_retired, 0);
    }
}
