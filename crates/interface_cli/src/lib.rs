//! Command Line Workbench
//!
//! This crate puts the claims workflow behind a terminal front end.
//!
//! # Architecture
//!
//! - **Config**: `WORKBENCH_*` environment settings
//! - **Cli**: argument parsing
//! - **Documents**: local files turned into document descriptors
//! - **Render**: text layout of progress, results, and the completion banner
//! - **Session**: drives one run and streams its events
//!
//! # Example
//!
//! ```rust,ignore
//! let mut workbench = interface_cli::build_workbench(&config)?;
//! workbench.upload(documents::describe_paths(&cli.files)?);
//! run_session(&mut workbench, options, shutdown_signal(), &mut std::io::stdout()).await?;
//! ```

pub mod cli;
pub mod config;
pub mod documents;
pub mod error;
pub mod render;
pub mod session;
pub mod terminal;

use std::sync::Arc;

use domain_claims::{ClaimsResultFixtures, ClaimsWorkbench, StepCatalog, StepRunner};

use crate::config::WorkbenchConfig;
use crate::error::CliError;
use crate::terminal::StderrNotificationSink;

/// Builds the standard four-step claims workbench from configuration
///
/// # Errors
///
/// Returns an error if the configured delays are invalid.
pub fn build_workbench(config: &WorkbenchConfig) -> Result<ClaimsWorkbench, CliError> {
    let notifier = Arc::new(StderrNotificationSink);

    let runner = StepRunner::builder(StepCatalog::claims_processing())
        .results(Arc::new(ClaimsResultFixtures))
        .schedule(config.schedule())
        .notifier(notifier.clone())
        .event_capacity(config.event_capacity)
        .build()?;

    Ok(ClaimsWorkbench::new(runner, notifier))
}
