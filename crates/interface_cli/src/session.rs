//! One interactive run of the workbench
//!
//! Starts a run over the queued documents and streams its events to an
//! output until the run completes or is abandoned, either by the
//! `--abandon-after` step or by the shutdown future (Ctrl+C in the binary).

use std::future::Future;
use std::io::Write;

use tokio::sync::broadcast::error::RecvError;

use core_kernel::RunId;
use domain_claims::{ClaimsWorkbench, RunEvent};

use crate::error::CliError;
use crate::render;

/// How events are written
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Rendered progress and results
    #[default]
    Text,
    /// One JSON object per event
    JsonLines,
}

/// Session settings taken from the command line
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionOptions {
    pub format: OutputFormat,
    /// 1-based step whose start triggers a reset
    pub abandon_after: Option<u32>,
}

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    Completed(RunId),
    Abandoned(Option<RunId>),
}

/// Performs the request and streams events to `out`
///
/// # Errors
///
/// Fails if the request is rejected (no documents), the output cannot be
/// written, or the event channel closes mid-run.
pub async fn run_session<W, S>(
    workbench: &mut ClaimsWorkbench,
    options: SessionOptions,
    shutdown: S,
    out: &mut W,
) -> Result<SessionOutcome, CliError>
where
    W: Write,
    S: Future<Output = ()>,
{
    let mut events = workbench.runner().subscribe();
    let summary = workbench.runner().completion_summary();
    let run_id = workbench.perform_request()?;

    tokio::pin!(shutdown);
    let mut shutdown_seen = false;

    loop {
        tokio::select! {
            _ = &mut shutdown, if !shutdown_seen => {
                shutdown_seen = true;
                tracing::info!(run_id = %run_id, "Shutdown requested, resetting window");
                workbench.reset_window();
            }
            received = events.recv() => match received {
                Ok(event) => {
                    write_event(out, &event, options.format, summary.as_deref())?;
                    match &event {
                        RunEvent::StepStarted { step_id, .. }
                            if Some(step_id.value()) == options.abandon_after =>
                        {
                            workbench.reset_window();
                        }
                        RunEvent::RunCompleted { run_id, .. } => {
                            return Ok(SessionOutcome::Completed(*run_id));
                        }
                        RunEvent::RunReset { abandoned, .. } => {
                            return Ok(SessionOutcome::Abandoned(*abandoned));
                        }
                        _ => {}
                    }
                }
                Err(RecvError::Lagged(missed)) => {
                    tracing::warn!(missed, "Output fell behind the run, repainting");
                    let snapshot = workbench.snapshot();
                    write!(out, "{}", render::render_snapshot(&snapshot, summary.as_deref()))?;
                }
                Err(RecvError::Closed) => return Err(CliError::EventStreamClosed),
            },
        }
    }
}

fn write_event<W: Write>(
    out: &mut W,
    event: &RunEvent,
    format: OutputFormat,
    summary: Option<&str>,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Text => {
            writeln!(out, "{}", render::render_event(event, summary))?;
        }
        OutputFormat::JsonLines => {
            serde_json::to_writer(&mut *out, event)?;
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}
