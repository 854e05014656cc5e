//! Test Data Builders
//!
//! Builders for runners and documents with defaults suited to tests: the
//! standard claims catalog, no waiting, and a recording notification sink.

use std::sync::Arc;

use domain_claims::{
    ClaimsResultFixtures, ClaimsWorkbench, DelaySchedule, DocumentDescriptor, ImmediateSleeper,
    ResultSource, Sleeper, StepCatalog, StepRunner, TokioSleeper,
};

use crate::notifications::RecordingNotificationSink;

/// Builder for a `StepRunner` wired for tests
pub struct TestRunnerBuilder {
    catalog: StepCatalog,
    results: Arc<dyn ResultSource>,
    schedule: DelaySchedule,
    sleeper: Arc<dyn Sleeper>,
    notifications: Arc<RecordingNotificationSink>,
    event_capacity: usize,
}

impl Default for TestRunnerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestRunnerBuilder {
    /// Creates a builder with an immediate schedule
    pub fn new() -> Self {
        Self {
            catalog: StepCatalog::claims_processing(),
            results: Arc::new(ClaimsResultFixtures),
            schedule: DelaySchedule::immediate(),
            sleeper: Arc::new(ImmediateSleeper),
            notifications: Arc::new(RecordingNotificationSink::new()),
            event_capacity: 256,
        }
    }

    /// Sets the catalog
    pub fn with_catalog(mut self, catalog: StepCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Sets the result source
    pub fn with_results(mut self, results: impl ResultSource) -> Self {
        self.results = Arc::new(results);
        self
    }

    /// Uses real Tokio sleeps with `schedule`; pair with a paused clock
    pub fn with_timed_schedule(mut self, schedule: DelaySchedule) -> Self {
        self.schedule = schedule;
        self.sleeper = Arc::new(TokioSleeper);
        self
    }

    /// Sets the event channel capacity
    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity;
        self
    }

    /// The sink the built runner will notify
    pub fn notifications(&self) -> Arc<RecordingNotificationSink> {
        Arc::clone(&self.notifications)
    }

    /// Builds the runner
    ///
    /// # Panics
    ///
    /// Panics if the schedule is invalid.
    pub fn build(self) -> StepRunner {
        StepRunner::builder(self.catalog)
            .results(self.results)
            .schedule(self.schedule)
            .sleeper(self.sleeper)
            .notifier(self.notifications)
            .event_capacity(self.event_capacity)
            .build()
            .expect("test runner configuration should be valid")
    }

    /// Builds a workbench sharing the recording sink with its runner
    pub fn build_workbench(self) -> ClaimsWorkbench {
        let notifications = self.notifications();
        ClaimsWorkbench::new(self.build(), notifications)
    }
}

/// Builder for constructing test documents
pub struct TestDocumentBuilder {
    name: String,
    size_bytes: Option<u64>,
    media_type: Option<String>,
}

impl Default for TestDocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestDocumentBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            name: "claim-document.pdf".to_string(),
            size_bytes: Some(1024),
            media_type: Some("application/pdf".to_string()),
        }
    }

    /// Sets the file name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the size
    pub fn with_size(mut self, size_bytes: u64) -> Self {
        self.size_bytes = Some(size_bytes);
        self
    }

    /// Drops size and media type, as for a picker that reports names only
    pub fn name_only(mut self) -> Self {
        self.size_bytes = None;
        self.media_type = None;
        self
    }

    /// Builds the descriptor
    pub fn build(self) -> DocumentDescriptor {
        let mut document = DocumentDescriptor::new(self.name);
        document.size_bytes = self.size_bytes;
        document.media_type = self.media_type;
        document
    }

    /// Builds `count` documents named `<stem>-1.pdf`, `<stem>-2.pdf`, ...
    pub fn batch(stem: &str, count: usize) -> Vec<DocumentDescriptor> {
        (1..=count)
            .map(|i| Self::new().with_name(format!("{stem}-{i}.pdf")).build())
            .collect()
    }
}
