//! Custom Test Assertions
//!
//! Assertion helpers for snapshots and event streams that name the broken
//! invariant in their failure message.

use domain_claims::{RunEvent, Snapshot, StepStatus};

/// Asserts that no step is completed while an earlier step is not
///
/// # Panics
///
/// Panics naming the first out-of-order step.
pub fn assert_completed_in_order(snapshot: &Snapshot) {
    let mut seen_incomplete = None;
    for step in &snapshot.steps {
        if step.is_completed() {
            if let Some(earlier) = seen_incomplete {
                panic!(
                    "step {} is completed while earlier step {} is not",
                    step.id, earlier
                );
            }
        } else if seen_incomplete.is_none() {
            seen_incomplete = Some(step.id);
        }
    }
}

/// Asserts that at most one step is processing, and none when idle
pub fn assert_at_most_one_processing(snapshot: &Snapshot) {
    let processing = snapshot
        .steps
        .iter()
        .filter(|s| s.status == StepStatus::Processing)
        .count();

    assert!(
        processing <= 1,
        "expected at most one processing step, found {processing}"
    );
    if !snapshot.active {
        assert_eq!(processing, 0, "idle snapshot has a processing step");
    }
}

/// Asserts that results are present exactly on completed steps
pub fn assert_results_match_status(snapshot: &Snapshot) {
    for step in &snapshot.steps {
        assert_eq!(
            step.result.is_some(),
            step.is_completed(),
            "step {} has status {} but result presence {}",
            step.id,
            step.status,
            step.result.is_some()
        );
    }
}

/// Asserts the state left behind by a reset
pub fn assert_all_pending(snapshot: &Snapshot) {
    assert!(!snapshot.active, "snapshot is still active");
    for step in &snapshot.steps {
        assert_eq!(step.status, StepStatus::Pending, "step {} is not pending", step.id);
        assert!(step.result.is_none(), "step {} still has a result", step.id);
    }
}

/// Asserts every invariant a single snapshot must hold
pub fn assert_snapshot_invariants(snapshot: &Snapshot) {
    assert_completed_in_order(snapshot);
    assert_at_most_one_processing(snapshot);
    assert_results_match_status(snapshot);
}

/// Asserts that `events` is one full run over `total_steps` steps
///
/// Expects start/complete pairs in step order followed by `RunCompleted`,
/// with the completed count growing by exactly one per completion.
pub fn assert_complete_run(events: &[RunEvent], total_steps: usize) {
    assert_eq!(
        events.len(),
        total_steps * 2 + 1,
        "expected {} events for {} steps, got {}",
        total_steps * 2 + 1,
        total_steps,
        events.len()
    );

    let mut completed = 0;
    for (i, event) in events.iter().enumerate() {
        assert_snapshot_invariants(event.snapshot());
        let index = i / 2;
        match event {
            RunEvent::StepStarted { step_id, snapshot, .. } => {
                assert_eq!(i % 2, 0, "StepStarted at odd position {i}");
                assert_eq!(step_id.index(), index);
                assert_eq!(snapshot.current_step().map(|s| s.id), Some(*step_id));
            }
            RunEvent::StepCompleted { step_id, snapshot, .. } => {
                assert_eq!(i % 2, 1, "StepCompleted at even position {i}");
                assert_eq!(step_id.index(), index);
                completed += 1;
                assert_eq!(snapshot.progress().completed, completed);
                assert!(snapshot.current_step().is_none());
            }
            RunEvent::RunCompleted { snapshot, .. } => {
                assert_eq!(i, events.len() - 1, "RunCompleted before the end");
                assert!(snapshot.is_complete());
            }
            RunEvent::RunReset { .. } => panic!("unexpected reset at position {i}"),
        }
    }
}
