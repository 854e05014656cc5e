//! Claims workbench
//!
//! The state behind the single-screen claims tool: the uploaded document
//! queue, the free-form request text, and the step runner. The two
//! user-facing actions are [`perform_request`](ClaimsWorkbench::perform_request)
//! and [`reset_window`](ClaimsWorkbench::reset_window).

use std::sync::Arc;

use core_kernel::RunId;

use crate::error::WorkflowError;
use crate::intake::{DocumentDescriptor, DocumentQueue, RunInput};
use crate::notification::{Notification, NotificationSink};
use crate::runner::StepRunner;
use crate::snapshot::Snapshot;

pub struct ClaimsWorkbench {
    queue: DocumentQueue,
    prompt: String,
    runner: StepRunner,
    notifier: Arc<dyn NotificationSink>,
}

impl ClaimsWorkbench {
    /// Creates a workbench around `runner`
    ///
    /// `notifier` receives upload and rejection notices; the runner has its
    /// own sink for the completion notice, usually the same one.
    pub fn new(runner: StepRunner, notifier: Arc<dyn NotificationSink>) -> Self {
        Self {
            queue: DocumentQueue::new(),
            prompt: String::new(),
            runner,
            notifier,
        }
    }

    /// Adds documents to the queue
    ///
    /// Returns the number added. An empty batch is ignored silently.
    pub fn upload(&mut self, documents: impl IntoIterator<Item = DocumentDescriptor>) -> usize {
        let added = self.queue.add(documents);
        if added > 0 {
            tracing::info!(added, queued = self.queue.len(), "Documents uploaded");
            self.notifier.notify(Notification::documents_uploaded(added));
        }
        added
    }

    pub fn remove_document(&mut self, index: usize) -> Option<DocumentDescriptor> {
        let removed = self.queue.remove(index);
        if let Some(document) = &removed {
            tracing::debug!(document = %document.id, name = %document.name, "Document removed");
        }
        removed
    }

    pub fn documents(&self) -> &[DocumentDescriptor] {
        self.queue.documents()
    }

    pub fn queue(&self) -> &DocumentQueue {
        &self.queue
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Whether "perform request" is currently allowed
    pub fn can_perform(&self) -> bool {
        !self.queue.is_empty() && !self.runner.is_active()
    }

    pub fn is_processing(&self) -> bool {
        self.runner.is_active()
    }

    /// Starts a run over the queued documents
    ///
    /// # Errors
    ///
    /// `InvalidInput` (after a destructive notification) when the queue is
    /// empty, otherwise whatever [`StepRunner::start`] reports.
    pub fn perform_request(&self) -> Result<RunId, WorkflowError> {
        if self.queue.is_empty() {
            self.notifier.notify(Notification::no_documents());
            return Err(WorkflowError::no_documents());
        }

        let input = RunInput::new(self.queue.documents().to_vec()).with_prompt(self.prompt.clone());
        self.runner.start(input)
    }

    /// Abandons any run, clears every result, the queue and the prompt
    pub fn reset_window(&mut self) {
        self.runner.reset();
        self.queue.clear();
        self.prompt.clear();
    }

    pub fn snapshot(&self) -> Snapshot {
        self.runner.snapshot()
    }

    pub fn runner(&self) -> &StepRunner {
        &self.runner
    }
}
