//! Integration tests for the step runner

use std::time::Duration;

use domain_claims::{
    DelaySchedule, RunEvent, RunInput, StepResult, StepStatus, WorkflowError,
};
use test_utils::{
    assert_all_pending, assert_complete_run, assert_snapshot_invariants, collect_until_terminal,
    drain_ready, wait_for_event, CatalogFixtures, DocumentFixtures, TestRunnerBuilder,
};

fn one_document() -> RunInput {
    RunInput::new(vec![DocumentFixtures::acord_form()])
}

// ============================================================================
// Full runs
// ============================================================================

mod full_run_tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_claims_run_end_to_end() {
        let builder = TestRunnerBuilder::new().with_timed_schedule(DelaySchedule::default());
        let notifications = builder.notifications();
        let runner = builder.build();
        let mut events = runner.subscribe();

        let started = tokio::time::Instant::now();
        let run_id = runner.start(one_document()).unwrap();
        let collected = collect_until_terminal(&mut events).await;

        assert_complete_run(&collected, 4);
        assert!(collected.iter().all(|e| e.run_id() == Some(run_id)));

        let intake = collected
            .iter()
            .find_map(|e| match e {
                RunEvent::StepCompleted { step_id, snapshot, .. } if step_id.index() == 0 => {
                    snapshot.steps[0].result.clone()
                }
                _ => None,
            })
            .unwrap();
        assert!(intake.contains("POL-2024-789456"));
        assert!(intake.contains("CLM-2024-001234"));

        let last = collected.last().unwrap().snapshot();
        let settlement = last.steps[3].result.as_ref().unwrap();
        assert!(settlement.contains("$2,750"));
        assert_eq!(last.progress().completed, last.progress().total);

        assert_eq!(notifications.count_with_title("Processing completed"), 1);

        // Four steps of 2000-3000ms plus three 500ms pauses
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(9_500), "too fast: {elapsed:?}");
        assert!(elapsed <= Duration::from_millis(13_600), "too slow: {elapsed:?}");
    }

    #[tokio::test]
    async fn test_runner_idle_after_completion() {
        let runner = TestRunnerBuilder::new().build();
        let mut events = runner.subscribe();

        runner.start(one_document()).unwrap();
        collect_until_terminal(&mut events).await;

        assert!(!runner.is_active());
        assert!(runner.active_run().is_none());
        let snapshot = runner.snapshot();
        assert!(snapshot.is_complete());
        assert_eq!(snapshot.document_count, 1);
    }

    #[tokio::test]
    async fn test_every_subscriber_sees_every_event() {
        let runner = TestRunnerBuilder::new().build();
        let mut first = runner.subscribe();
        let mut second = runner.subscribe();

        runner.start(one_document()).unwrap();
        let a = collect_until_terminal(&mut first).await;
        let b = collect_until_terminal(&mut second).await;

        assert_eq!(a, b);
        assert_eq!(a.len(), 9);
    }

    #[tokio::test]
    async fn test_restart_after_completion() {
        let builder = TestRunnerBuilder::new();
        let notifications = builder.notifications();
        let runner = builder.build();
        let mut events = runner.subscribe();

        let first = runner.start(one_document()).unwrap();
        collect_until_terminal(&mut events).await;

        let second = runner.start(RunInput::new(DocumentFixtures::claim_packet())).unwrap();
        assert_ne!(first, second);

        let collected = collect_until_terminal(&mut events).await;
        assert_complete_run(&collected, 4);
        // The new run starts from a clean list
        assert_eq!(collected[0].snapshot().progress().completed, 0);
        assert_eq!(collected[0].snapshot().document_count, 3);
        assert_eq!(notifications.count_with_title("Processing completed"), 2);
    }

    #[tokio::test]
    async fn test_structured_results_pass_through() {
        let runner = TestRunnerBuilder::new()
            .with_catalog(CatalogFixtures::numbered(1))
            .with_results(CatalogFixtures::settlement_table())
            .build();
        let mut events = runner.subscribe();

        runner.start(one_document()).unwrap();
        collect_until_terminal(&mut events).await;

        match runner.snapshot().steps[0].result.as_ref().unwrap() {
            StepResult::Fields(fields) => {
                assert_eq!(fields.len(), 3);
                assert_eq!(fields[2].label, "Net Payout Amount");
                assert_eq!(fields[2].value, "$2,750");
            }
            other => panic!("expected fields, got {other:?}"),
        }
        assert_eq!(runner.completion_summary().as_deref(), Some("Settlement table ready"));
    }

    #[tokio::test]
    async fn test_missing_result_completes_with_empty_text() {
        let runner = TestRunnerBuilder::new()
            .with_catalog(CatalogFixtures::numbered(3))
            .with_results(CatalogFixtures::numbered_results(2))
            .build();
        let mut events = runner.subscribe();

        runner.start(one_document()).unwrap();
        let collected = collect_until_terminal(&mut events).await;

        assert_complete_run(&collected, 3);
        let snapshot = runner.snapshot();
        assert_eq!(snapshot.steps[1].result, Some(StepResult::text("result 2")));
        assert_eq!(snapshot.steps[2].result, Some(StepResult::text("")));
    }
}

// ============================================================================
// Start validation
// ============================================================================

mod start_tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_input_leaves_completed_run_untouched() {
        let runner = TestRunnerBuilder::new().build();
        let mut events = runner.subscribe();

        runner.start(one_document()).unwrap();
        collect_until_terminal(&mut events).await;
        let before = runner.snapshot();

        let err = runner.start(RunInput::default()).unwrap_err();
        assert!(matches!(err, WorkflowError::InvalidInput(_)));

        let after = runner.snapshot();
        assert_eq!(before.steps, after.steps);
        assert!(drain_ready(&mut events).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_rejected_while_running() {
        let runner = TestRunnerBuilder::new()
            .with_timed_schedule(DelaySchedule::fixed(1_000, 0))
            .build();
        let mut events = runner.subscribe();

        let run_id = runner.start(one_document()).unwrap();
        wait_for_event(&mut events, |e| matches!(e, RunEvent::StepStarted { .. })).await;

        match runner.start(one_document()) {
            Err(WorkflowError::AlreadyRunning(active)) => assert_eq!(active, run_id),
            other => panic!("expected AlreadyRunning, got {other:?}"),
        }
        assert_eq!(runner.active_run(), Some(run_id));
    }
}

// ============================================================================
// Reset and abandonment
// ============================================================================

mod reset_tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_reset_while_third_step_processing() {
        let builder = TestRunnerBuilder::new().with_timed_schedule(DelaySchedule::fixed(2_000, 500));
        let notifications = builder.notifications();
        let runner = builder.build();
        let mut events = runner.subscribe();

        let run_id = runner.start(one_document()).unwrap();
        let event = wait_for_event(&mut events, |e| {
            matches!(e, RunEvent::StepStarted { step_id, .. } if step_id.index() == 2)
        })
        .await;
        assert_eq!(event.snapshot().steps[2].status, StepStatus::Processing);
        assert_eq!(event.snapshot().progress().completed, 2);

        runner.reset();

        match events.recv().await.unwrap() {
            RunEvent::RunReset { abandoned, snapshot } => {
                assert_eq!(abandoned, Some(run_id));
                assert_all_pending(&snapshot);
                assert_eq!(snapshot.run_id, None);
            }
            other => panic!("expected reset, got {other:?}"),
        }

        // Well past the point the abandoned delay would have fired
        tokio::time::sleep(Duration::from_secs(30)).await;

        assert!(drain_ready(&mut events).is_empty());
        let snapshot = runner.snapshot();
        assert_all_pending(&snapshot);
        assert_eq!(snapshot.steps.len(), 4);
        assert!(runner.input().is_none());
        assert!(!runner.is_active());
        assert_eq!(notifications.count_with_title("Processing completed"), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_during_inter_step_pause() {
        let runner = TestRunnerBuilder::new()
            .with_timed_schedule(DelaySchedule::fixed(1_000, 5_000))
            .build();
        let mut events = runner.subscribe();

        runner.start(one_document()).unwrap();
        wait_for_event(&mut events, |e| matches!(e, RunEvent::StepCompleted { .. })).await;
        runner.reset();

        let reset = events.recv().await.unwrap();
        assert!(matches!(reset, RunEvent::RunReset { .. }));

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert!(drain_ready(&mut events).is_empty());
        assert_all_pending(&runner.snapshot());
    }

    #[tokio::test]
    async fn test_reset_after_completion() {
        let runner = TestRunnerBuilder::new().build();
        let mut events = runner.subscribe();

        runner.start(one_document()).unwrap();
        collect_until_terminal(&mut events).await;
        runner.reset();

        match events.recv().await.unwrap() {
            RunEvent::RunReset { abandoned, snapshot } => {
                assert!(abandoned.is_none());
                assert!(snapshot.is_pristine());
            }
            other => panic!("expected reset, got {other:?}"),
        }
        assert!(runner.input().is_none());
    }

    #[tokio::test]
    async fn test_reset_is_idempotent() {
        let runner = TestRunnerBuilder::new().build();
        runner.reset();
        runner.reset();

        assert_all_pending(&runner.snapshot());
        assert!(!runner.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_run_after_abandonment_is_not_disturbed() {
        let runner = TestRunnerBuilder::new()
            .with_timed_schedule(DelaySchedule::fixed(2_000, 500))
            .build();
        let mut events = runner.subscribe();

        let abandoned = runner.start(one_document()).unwrap();
        wait_for_event(&mut events, |e| matches!(e, RunEvent::StepStarted { .. })).await;
        runner.reset();
        wait_for_event(&mut events, |e| matches!(e, RunEvent::RunReset { .. })).await;

        let fresh = runner.start(one_document()).unwrap();
        let collected = collect_until_terminal(&mut events).await;

        assert_complete_run(&collected, 4);
        assert!(collected.iter().all(|e| e.run_id() == Some(fresh)));
        assert!(collected.iter().all(|e| e.run_id() != Some(abandoned)));
        for event in &collected {
            assert_snapshot_invariants(event.snapshot());
        }
    }
}

// ============================================================================
// Notification sinks
// ============================================================================

mod notification_sink_tests {
    use super::*;
    use std::sync::{Arc, Mutex, OnceLock};

    use core_kernel::DomainPort;
    use domain_claims::{
        ImmediateSleeper, Notification, NotificationSink, StepCatalog, StepRunner,
    };

    /// Records what the runner looks like from inside `notify`
    #[derive(Default)]
    struct RunnerInspectingSink {
        runner: OnceLock<StepRunner>,
        seen: Mutex<Vec<(String, bool, usize)>>,
    }

    impl DomainPort for RunnerInspectingSink {}

    impl NotificationSink for RunnerInspectingSink {
        fn notify(&self, notification: Notification) {
            let Some(runner) = self.runner.get() else {
                return;
            };
            let completed = runner.snapshot().completed_steps().count();
            let active = runner.is_active();
            self.seen
                .lock()
                .unwrap()
                .push((notification.title, active, completed));
        }
    }

    #[tokio::test]
    async fn test_sink_can_read_the_runner_on_completion() {
        let sink = Arc::new(RunnerInspectingSink::default());
        let runner = StepRunner::builder(StepCatalog::claims_processing())
            .schedule(DelaySchedule::immediate())
            .sleeper(Arc::new(ImmediateSleeper))
            .notifier(sink.clone())
            .build()
            .unwrap();
        assert!(sink.runner.set(runner.clone()).is_ok());
        let mut events = runner.subscribe();

        runner.start(one_document()).unwrap();
        let collected = collect_until_terminal(&mut events).await;

        assert!(matches!(collected.last(), Some(RunEvent::RunCompleted { .. })));
        let seen = sink.seen.lock().unwrap().clone();
        assert_eq!(seen, vec![("Processing completed".to_string(), false, 4)]);
    }
}
