//! CLI error handling

use std::path::PathBuf;

use thiserror::Error;

use domain_claims::WorkflowError;

/// CLI error types
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Cannot read document {path}: {source}")]
    Document {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Not a regular file: {0}")]
    NotAFile(PathBuf),

    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Event stream closed before the run finished")]
    EventStreamClosed,
}
