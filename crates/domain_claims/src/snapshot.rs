//! Progress snapshots and run events
//!
//! Every status change of a run is published as a [`RunEvent`] carrying the
//! full ordered step list, so consumers repaint from the event alone.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::RunId;

use crate::step::{Step, StepId, StepStatus};

/// The ordered step list at one point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Run the steps belong to, `None` while idle after a reset
    pub run_id: Option<RunId>,
    /// Whether a run was in flight when the snapshot was taken
    pub active: bool,
    /// Number of documents the run was started with
    pub document_count: usize,
    pub steps: Vec<Step>,
    pub emitted_at: DateTime<Utc>,
}

impl Snapshot {
    pub fn progress(&self) -> Progress {
        Progress {
            completed: self.steps.iter().filter(|s| s.is_completed()).count(),
            total: self.steps.len(),
        }
    }

    /// The step currently processing, if any
    pub fn current_step(&self) -> Option<&Step> {
        self.steps.iter().find(|s| s.is_processing())
    }

    pub fn completed_steps(&self) -> impl Iterator<Item = &Step> {
        self.steps.iter().filter(|s| s.is_completed())
    }

    pub fn step(&self, id: StepId) -> Option<&Step> {
        self.steps.get(id.index())
    }

    /// All steps completed and no run in flight
    pub fn is_complete(&self) -> bool {
        !self.active && self.progress().is_done()
    }

    /// True if nothing has happened since the last reset
    pub fn is_pristine(&self) -> bool {
        !self.active
            && self
                .steps
                .iter()
                .all(|s| s.status == StepStatus::Pending && s.result.is_none())
    }
}

/// Completed-over-total counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

impl Progress {
    pub fn is_done(&self) -> bool {
        self.total > 0 && self.completed == self.total
    }

    /// Completion as a whole percentage
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        ((self.completed * 100) / self.total) as u8
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.completed, self.total)
    }
}

/// Events published on the runner's subscription channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RunEvent {
    /// A step moved to processing
    StepStarted {
        run_id: RunId,
        step_id: StepId,
        snapshot: Snapshot,
    },

    /// A step finished and carries its result
    StepCompleted {
        run_id: RunId,
        step_id: StepId,
        snapshot: Snapshot,
    },

    /// The last step completed; the runner is idle again
    RunCompleted { run_id: RunId, snapshot: Snapshot },

    /// The runner was reset, abandoning the run it was driving, if any
    RunReset {
        abandoned: Option<RunId>,
        snapshot: Snapshot,
    },
}

impl RunEvent {
    pub fn snapshot(&self) -> &Snapshot {
        match self {
            RunEvent::StepStarted { snapshot, .. }
            | RunEvent::StepCompleted { snapshot, .. }
            | RunEvent::RunCompleted { snapshot, .. }
            | RunEvent::RunReset { snapshot, .. } => snapshot,
        }
    }

    pub fn run_id(&self) -> Option<RunId> {
        match self {
            RunEvent::StepStarted { run_id, .. }
            | RunEvent::StepCompleted { run_id, .. }
            | RunEvent::RunCompleted { run_id, .. } => Some(*run_id),
            RunEvent::RunReset { abandoned, .. } => *abandoned,
        }
    }

    /// Whether this is the last event a run will produce
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunEvent::RunCompleted { .. } | RunEvent::RunReset { .. })
    }
}
