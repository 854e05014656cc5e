//! Session tests
//!
//! Drive whole runs through `run_session` with in-memory output.

use std::future::pending;
use std::time::Duration;

use domain_claims::{DelaySchedule, WorkflowError};
use interface_cli::error::CliError;
use interface_cli::render::{COMPLETION_TITLE, IDLE_HINT};
use interface_cli::session::{run_session, OutputFormat, SessionOptions, SessionOutcome};
use test_utils::{TestDocumentBuilder, TestRunnerBuilder};

mod text_output_tests {
    use super::*;

    #[tokio::test]
    async fn test_completed_run_prints_progress_results_and_banner() {
        let mut workbench = TestRunnerBuilder::new().build_workbench();
        workbench.upload(TestDocumentBuilder::batch("fnol", 2));

        let mut out = Vec::new();
        let outcome = run_session(&mut workbench, SessionOptions::default(), pending(), &mut out)
            .await
            .unwrap();

        assert!(matches!(outcome, SessionOutcome::Completed(_)));
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Workflow Progress (0/4)"));
        assert!(text.contains("✓ Claim Intake Results"));
        assert!(text.contains("✓ Settlement Calculation Results"));
        assert!(text.contains(COMPLETION_TITLE));
        assert!(workbench.snapshot().is_complete());
    }

    #[tokio::test]
    async fn test_empty_queue_is_rejected() {
        let builder = TestRunnerBuilder::new();
        let notifications = builder.notifications();
        let mut workbench = builder.build_workbench();

        let mut out = Vec::new();
        let error = run_session(&mut workbench, SessionOptions::default(), pending(), &mut out)
            .await
            .unwrap_err();

        assert!(matches!(
            error,
            CliError::Workflow(WorkflowError::InvalidInput(_))
        ));
        assert!(out.is_empty());
        assert_eq!(notifications.count_with_title("No files uploaded"), 1);
    }
}

mod abandonment_tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_abandon_after_resets_when_the_step_starts() {
        let mut workbench = TestRunnerBuilder::new()
            .with_timed_schedule(DelaySchedule::default())
            .build_workbench();
        workbench.upload(TestDocumentBuilder::batch("fnol", 1));
        workbench.set_prompt("Check coverage");

        let options = SessionOptions {
            format: OutputFormat::Text,
            abandon_after: Some(3),
        };
        let mut out = Vec::new();
        let outcome = run_session(&mut workbench, options, pending(), &mut out)
            .await
            .unwrap();

        let SessionOutcome::Abandoned(Some(run_id)) = outcome else {
            panic!("expected an abandoned run, got {outcome:?}");
        };
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains(&format!("Run {} abandoned.", run_id.short())));
        assert!(text.contains(IDLE_HINT));
        assert!(!text.contains("Damage Assessment Results"));

        // The window is cleared along with the steps
        assert!(workbench.documents().is_empty());
        assert!(workbench.prompt().is_empty());
        assert!(workbench.snapshot().is_pristine());
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_abandons_the_run() {
        let mut workbench = TestRunnerBuilder::new()
            .with_timed_schedule(DelaySchedule::default())
            .build_workbench();
        workbench.upload(TestDocumentBuilder::batch("fnol", 1));

        let shutdown = tokio::time::sleep(Duration::from_secs(4));
        let mut out = Vec::new();
        let outcome = run_session(&mut workbench, SessionOptions::default(), shutdown, &mut out)
            .await
            .unwrap();

        assert!(matches!(outcome, SessionOutcome::Abandoned(Some(_))));
        assert!(!workbench.is_processing());
        assert!(!String::from_utf8(out).unwrap().contains(COMPLETION_TITLE));
    }
}

mod json_output_tests {
    use super::*;

    #[tokio::test]
    async fn test_one_object_per_event() {
        let mut workbench = TestRunnerBuilder::new().build_workbench();
        workbench.upload(TestDocumentBuilder::batch("fnol", 3));

        let options = SessionOptions {
            format: OutputFormat::JsonLines,
            abandon_after: None,
        };
        let mut out = Vec::new();
        run_session(&mut workbench, options, pending(), &mut out)
            .await
            .unwrap();

        let events: Vec<serde_json::Value> = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        // Started and completed for each of the four steps, then the end
        assert_eq!(events.len(), 9);
        assert_eq!(events[0]["event"], "step_started");
        assert_eq!(events[1]["event"], "step_completed");
        assert_eq!(events[8]["event"], "run_completed");
        assert_eq!(events[8]["snapshot"]["document_count"], 3);
        assert_eq!(events[8]["snapshot"]["active"], false);
    }
}
