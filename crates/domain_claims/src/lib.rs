//! Claims Processing Workflow
//!
//! This crate simulates a multi-stage claims pipeline. Claim documents are
//! queued, a run walks a fixed catalog of steps one at a time with an
//! artificial delay, and each step completes with a canned result looked up
//! by its position. Nothing is parsed, looked up, or stored.
//!
//! # Step Lifecycle
//!
//! ```text
//! Pending -> Processing -> Completed
//!                     \--> Error (reserved, never set by the runner)
//! ```
//!
//! # Components
//!
//! - [`StepRunner`]: sequential, cancellable driver publishing [`RunEvent`]s
//! - [`ClaimsWorkbench`]: document queue + request text + runner
//! - [`ResultSource`], [`Sleeper`], [`NotificationSink`]: swappable ports

pub mod step;
pub mod catalog;
pub mod fixtures;
pub mod delay;
pub mod snapshot;
pub mod intake;
pub mod notification;
pub mod runner;
pub mod workbench;
pub mod error;

pub use step::{Step, StepId, StepStatus, StepResult, ResultField, StepDefinition};
pub use catalog::StepCatalog;
pub use fixtures::{ResultSource, ClaimsResultFixtures, StaticResults};
pub use delay::{DelaySchedule, Sleeper, TokioSleeper, ImmediateSleeper};
pub use snapshot::{Snapshot, Progress, RunEvent};
pub use intake::{DocumentDescriptor, DocumentQueue, RunInput};
pub use notification::{Notification, NotificationSink, Severity, TracingNotificationSink};
pub use runner::{StepRunner, StepRunnerBuilder, DEFAULT_EVENT_CAPACITY};
pub use workbench::ClaimsWorkbench;
pub use error::WorkflowError;
