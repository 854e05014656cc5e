//! Terminal rendering of run progress
//!
//! Pure functions from snapshots and events to text. Nothing here writes to
//! a terminal, which keeps the layout testable.

use std::fmt::Write;

use domain_claims::{RunEvent, Snapshot, Step, StepResult, StepStatus};

/// Shown before anything has run
pub const IDLE_HINT: &str = "Upload claims documents and click \"Perform Request\" to see results.";

/// Heading of the completion banner
pub const COMPLETION_TITLE: &str = "Multi-Agent Claims Processing Complete";

fn icon(status: StepStatus) -> &'static str {
    match status {
        StepStatus::Pending => "○",
        StepStatus::Processing => "⟳",
        StepStatus::Completed => "✓",
        StepStatus::Error => "✗",
    }
}

/// Progress panel: one line per step plus a completed/total header
pub fn render_progress(snapshot: &Snapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Workflow Progress ({})", snapshot.progress());
    for step in &snapshot.steps {
        let _ = writeln!(
            out,
            "  {} {}. {} - {} [{}]",
            icon(step.status),
            step.id,
            step.title,
            step.description,
            step.status.label()
        );
    }
    out
}

/// Results block for one completed step
pub fn render_step_result(step: &Step) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "✓ {} Results", step.title);
    match &step.result {
        Some(StepResult::Text(text)) => {
            for line in text.lines() {
                let _ = writeln!(out, "    {line}");
            }
        }
        Some(StepResult::Fields(fields)) => {
            let width = fields.iter().map(|f| f.label.chars().count()).max().unwrap_or(0);
            for field in fields {
                let _ = writeln!(out, "    {:<width$}  {}", field.label, field.value);
            }
        }
        None => {}
    }
    out
}

/// Results panel listing every completed step
pub fn render_results(snapshot: &Snapshot) -> String {
    let mut blocks = snapshot.completed_steps().map(render_step_result);
    let Some(first) = blocks.next() else {
        return String::new();
    };

    let mut out = String::from("Step Results\n");
    out.push_str(&first);
    for block in blocks {
        out.push_str("    ----\n");
        out.push_str(&block);
    }
    out
}

/// Completion banner, only once every step is done and the run is idle
pub fn render_completion(snapshot: &Snapshot, summary: Option<&str>) -> Option<String> {
    if !snapshot.is_complete() {
        return None;
    }

    let mut out = format!("✓ {COMPLETION_TITLE}\n");
    if let Some(summary) = summary {
        let _ = writeln!(out, "  {summary}");
    }
    Some(out)
}

/// Full view of a snapshot: progress, results, and the completion banner
pub fn render_snapshot(snapshot: &Snapshot, summary: Option<&str>) -> String {
    if snapshot.is_pristine() {
        return format!("{IDLE_HINT}\n");
    }

    let mut out = render_progress(snapshot);
    let results = render_results(snapshot);
    if !results.is_empty() {
        out.push('\n');
        out.push_str(&results);
    }
    if let Some(banner) = render_completion(snapshot, summary) {
        out.push('\n');
        out.push_str(&banner);
    }
    out
}

/// Incremental output for one event
///
/// Started steps print the progress panel, completed steps print their
/// result, the end of a run prints the banner, and a reset prints the idle
/// hint.
pub fn render_event(event: &RunEvent, summary: Option<&str>) -> String {
    match event {
        RunEvent::StepStarted { run_id, snapshot, .. } => {
            format!("[{}]\n{}", run_id.short(), render_progress(snapshot))
        }
        RunEvent::StepCompleted { step_id, snapshot, .. } => snapshot
            .step(*step_id)
            .map(render_step_result)
            .unwrap_or_default(),
        RunEvent::RunCompleted { snapshot, .. } => {
            let mut out = render_progress(snapshot);
            if let Some(banner) = render_completion(snapshot, summary) {
                out.push('\n');
                out.push_str(&banner);
            }
            out
        }
        RunEvent::RunReset { abandoned, .. } => match abandoned {
            Some(run_id) => format!("Run {} abandoned.\n{IDLE_HINT}\n", run_id.short()),
            None => format!("{IDLE_HINT}\n"),
        },
    }
}
