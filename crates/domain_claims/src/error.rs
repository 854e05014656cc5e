//! Workflow domain errors

use thiserror::Error;

use core_kernel::{CoreError, RunId};

use crate::step::StepStatus;

/// Errors that can occur while driving the claims workflow
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Run {0} is already in progress")]
    AlreadyRunning(RunId),

    #[error("Invalid status transition from {from} to {to}")]
    InvalidStatusTransition { from: StepStatus, to: StepStatus },

    #[error("No Tokio runtime is available to drive the run")]
    RuntimeUnavailable,

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl WorkflowError {
    /// The error reported when a run is requested without any documents
    pub fn no_documents() -> Self {
        WorkflowError::InvalidInput("no claim documents were supplied".to_string())
    }

    /// Returns true if the caller supplied unusable input
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, WorkflowError::InvalidInput(_))
    }
}
