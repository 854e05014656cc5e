//! Sequential step runner
//!
//! Drives a [`StepCatalog`] from pending to completed one step at a time,
//! waiting a simulated processing delay for each, and publishes a
//! [`RunEvent`] after every transition.
//!
//! # Run lifecycle
//!
//! ```text
//! idle --start()--> step 1 processing -> step 1 completed -> ... -> step N completed --> idle
//!   ^                                                                                    |
//!   +------------------------------------- reset() (any time) ---------------------------+
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! let runner = StepRunner::builder(StepCatalog::claims_processing())
//!     .schedule(DelaySchedule::fixed(1500, 0))
//!     .build()?;
//!
//! let mut events = runner.subscribe();
//! runner.start(RunInput::new(vec![DocumentDescriptor::new("acord-form.pdf")]))?;
//!
//! while let Ok(event) = events.recv().await {
//!     render(event.snapshot());
//!     if event.is_terminal() {
//!         break;
//!     }
//! }
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::Utc;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use core_kernel::RunId;

use crate::catalog::StepCatalog;
use crate::delay::{DelaySchedule, Sleeper, TokioSleeper};
use crate::error::WorkflowError;
use crate::fixtures::{ClaimsResultFixtures, ResultSource};
use crate::intake::RunInput;
use crate::notification::{Notification, NotificationSink, TracingNotificationSink};
use crate::snapshot::{RunEvent, Snapshot};
use crate::step::{Step, StepId, StepResult};

/// Default buffer size of the event channel
pub const DEFAULT_EVENT_CAPACITY: usize = 64;

/// Builder for [`StepRunner`]
///
/// Everything except the catalog has a default: the claims result fixtures,
/// the observed delay schedule, real Tokio sleeps and tracing notifications.
pub struct StepRunnerBuilder {
    catalog: StepCatalog,
    results: Arc<dyn ResultSource>,
    schedule: DelaySchedule,
    sleeper: Arc<dyn Sleeper>,
    notifier: Arc<dyn NotificationSink>,
    event_capacity: usize,
}

impl StepRunnerBuilder {
    fn new(catalog: StepCatalog) -> Self {
        Self {
            catalog,
            results: Arc::new(ClaimsResultFixtures),
            schedule: DelaySchedule::default(),
            sleeper: Arc::new(TokioSleeper),
            notifier: Arc::new(TracingNotificationSink),
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }

    /// Sets the table step results are looked up in
    pub fn results(mut self, results: Arc<dyn ResultSource>) -> Self {
        self.results = results;
        self
    }

    /// Sets the simulated timing
    pub fn schedule(mut self, schedule: DelaySchedule) -> Self {
        self.schedule = schedule;
        self
    }

    /// Sets how the driver task waits
    pub fn sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// Sets where the completion notification goes
    pub fn notifier(mut self, notifier: Arc<dyn NotificationSink>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Sets the event channel buffer size (at least 1)
    pub fn event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity.max(1);
        self
    }

    /// Builds the runner
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::Core` if the delay schedule is invalid.
    pub fn build(self) -> Result<StepRunner, WorkflowError> {
        self.schedule.validate()?;

        let (events, _) = broadcast::channel(self.event_capacity);
        let steps = self.catalog.pending_steps();

        Ok(StepRunner {
            shared: Arc::new(RunnerShared {
                catalog: self.catalog,
                results: self.results,
                schedule: self.schedule,
                sleeper: self.sleeper,
                notifier: self.notifier,
                events,
                state: Mutex::new(RunState {
                    steps,
                    generation: 0,
                    active: None,
                    input: None,
                    last_run: None,
                }),
            }),
        })
    }
}

/// Runs the steps of a catalog one after another with simulated latency
///
/// Cloning is cheap; all clones drive the same state.
#[derive(Clone)]
pub struct StepRunner {
    shared: Arc<RunnerShared>,
}

struct RunnerShared {
    catalog: StepCatalog,
    results: Arc<dyn ResultSource>,
    schedule: DelaySchedule,
    sleeper: Arc<dyn Sleeper>,
    notifier: Arc<dyn NotificationSink>,
    events: broadcast::Sender<RunEvent>,
    state: Mutex<RunState>,
}

struct RunState {
    steps: Vec<Step>,
    /// Bumped by every start and reset; transitions from older runs are dropped
    generation: u64,
    active: Option<ActiveRun>,
    input: Option<RunInput>,
    /// Most recent run, kept after completion so its results stay attributed
    last_run: Option<RunId>,
}

struct ActiveRun {
    run_id: RunId,
    cancel: CancellationToken,
}

/// What the driver task needs to prove it still owns the runner
struct RunTicket {
    run_id: RunId,
    generation: u64,
    cancel: CancellationToken,
}

enum Transition {
    Begin,
    Complete(StepResult),
}

impl StepRunner {
    /// Starts building a runner for `catalog`
    pub fn builder(catalog: StepCatalog) -> StepRunnerBuilder {
        StepRunnerBuilder::new(catalog)
    }

    /// Begins a run over `input`
    ///
    /// Previous results are cleared and a driver task is spawned on the
    /// current Tokio runtime. Progress arrives on [`subscribe`](Self::subscribe).
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if `input` has no documents; nothing is mutated.
    /// - `AlreadyRunning` if a run is in flight.
    /// - `RuntimeUnavailable` if called outside a Tokio runtime.
    pub fn start(&self, input: RunInput) -> Result<RunId, WorkflowError> {
        if !input.has_documents() {
            tracing::warn!("Run requested without claim documents");
            return Err(WorkflowError::no_documents());
        }

        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|_| WorkflowError::RuntimeUnavailable)?;

        let mut state = self.shared.lock_state();
        if let Some(active) = &state.active {
            return Err(WorkflowError::AlreadyRunning(active.run_id));
        }

        let run_id = RunId::new_v7();
        let cancel = CancellationToken::new();
        state.generation += 1;
        let ticket = RunTicket {
            run_id,
            generation: state.generation,
            cancel: cancel.clone(),
        };

        state.steps.iter_mut().for_each(Step::reset);
        let document_count = input.document_count();
        state.input = Some(input);
        state.active = Some(ActiveRun { run_id, cancel });
        state.last_run = Some(run_id);
        drop(state);

        tracing::info!(
            run_id = %run_id,
            documents = document_count,
            steps = self.shared.catalog.len(),
            "Starting claims run"
        );

        runtime.spawn(drive(Arc::clone(&self.shared), ticket));
        Ok(run_id)
    }

    /// Abandons any active run and returns every step to pending
    ///
    /// Clears results and the stored input. The abandoned run's pending
    /// delay is cancelled and it publishes nothing further. Safe to call
    /// at any time.
    pub fn reset(&self) {
        let mut state = self.shared.lock_state();
        state.generation += 1;

        let abandoned = state.active.take().map(|active| {
            active.cancel.cancel();
            active.run_id
        });
        state.steps.iter_mut().for_each(Step::reset);
        state.input = None;
        state.last_run = None;

        let snapshot = state.snapshot();
        self.shared.publish(RunEvent::RunReset { abandoned, snapshot });
        drop(state);

        match abandoned {
            Some(run_id) => tracing::info!(run_id = %run_id, "Claims run abandoned"),
            None => tracing::debug!("Runner reset while idle"),
        }
    }

    /// Subscribes to run events published from now on
    pub fn subscribe(&self) -> broadcast::Receiver<RunEvent> {
        self.shared.events.subscribe()
    }

    /// Current state of every step
    pub fn snapshot(&self) -> Snapshot {
        self.shared.lock_state().snapshot()
    }

    pub fn is_active(&self) -> bool {
        self.shared.lock_state().active.is_some()
    }

    /// Id of the run in flight, if any
    pub fn active_run(&self) -> Option<RunId> {
        self.shared.lock_state().active.as_ref().map(|a| a.run_id)
    }

    /// Input of the current or most recent run, until the next reset
    pub fn input(&self) -> Option<RunInput> {
        self.shared.lock_state().input.clone()
    }

    pub fn step_count(&self) -> usize {
        self.shared.catalog.len()
    }

    pub fn catalog(&self) -> &StepCatalog {
        &self.shared.catalog
    }

    pub fn schedule(&self) -> &DelaySchedule {
        &self.shared.schedule
    }

    /// Closing summary from the result source for a fully completed run
    pub fn completion_summary(&self) -> Option<String> {
        self.shared.results.completion_summary(self.step_count())
    }
}

impl RunnerShared {
    fn lock_state(&self) -> MutexGuard<'_, RunState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, event: RunEvent) {
        // No subscribers is not an error
        let _ = self.events.send(event);
    }

    /// Applies a step transition if `ticket` still owns the runner
    fn apply(&self, ticket: &RunTicket, index: usize, transition: Transition) -> bool {
        let mut state = self.lock_state();
        if !state.owns(ticket) {
            return false;
        }

        let step = &mut state.steps[index];
        let step_id = step.id;
        let (outcome, started) = match transition {
            Transition::Begin => (step.begin(), true),
            Transition::Complete(result) => (step.complete(result), false),
        };

        if let Err(error) = outcome {
            tracing::error!(run_id = %ticket.run_id, step = %step_id, %error, "Stopping run");
            state.active = None;
            return false;
        }

        let snapshot = state.snapshot();
        let event = if started {
            RunEvent::StepStarted {
                run_id: ticket.run_id,
                step_id,
                snapshot,
            }
        } else {
            RunEvent::StepCompleted {
                run_id: ticket.run_id,
                step_id,
                snapshot,
            }
        };
        self.publish(event);
        true
    }

    /// Waits `duration` unless the run is cancelled first
    async fn pause(&self, ticket: &RunTicket, duration: Duration) -> bool {
        tokio::select! {
            biased;
            _ = ticket.cancel.cancelled() => false,
            _ = self.sleeper.sleep(duration) => !ticket.cancel.is_cancelled(),
        }
    }

    fn finish(&self, ticket: &RunTicket) -> bool {
        let mut state = self.lock_state();
        if !state.owns(ticket) {
            return false;
        }

        state.active = None;
        let snapshot = state.snapshot();
        self.publish(RunEvent::RunCompleted {
            run_id: ticket.run_id,
            snapshot,
        });
        drop(state);

        // Sinks may read the runner back
        self.notifier.notify(Notification::processing_completed());
        true
    }
}

impl RunState {
    fn owns(&self, ticket: &RunTicket) -> bool {
        self.generation == ticket.generation && self.active.is_some()
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            run_id: self.last_run,
            active: self.active.is_some(),
            document_count: self.input.as_ref().map_or(0, RunInput::document_count),
            steps: self.steps.clone(),
            emitted_at: Utc::now(),
        }
    }
}

async fn drive(shared: Arc<RunnerShared>, ticket: RunTicket) {
    let total = shared.catalog.len();

    for index in 0..total {
        let step_id = StepId::from_index(index);

        if !shared.apply(&ticket, index, Transition::Begin) {
            tracing::debug!(run_id = %ticket.run_id, step = %step_id, "Run no longer active");
            return;
        }

        let delay = shared.schedule.sample_step_delay();
        tracing::debug!(
            run_id = %ticket.run_id,
            step = %step_id,
            delay_ms = delay.as_millis() as u64,
            "Step processing"
        );
        if !shared.pause(&ticket, delay).await {
            tracing::debug!(run_id = %ticket.run_id, step = %step_id, "Delay cancelled");
            return;
        }

        let result = shared
            .results
            .result_for(index)
            .unwrap_or_else(|| StepResult::text(""));
        if !shared.apply(&ticket, index, Transition::Complete(result)) {
            return;
        }
        tracing::info!(run_id = %ticket.run_id, step = %step_id, "Step completed");

        if index + 1 < total && !shared.pause(&ticket, shared.schedule.inter_step_pause()).await {
            return;
        }
    }

    if shared.finish(&ticket) {
        tracing::info!(run_id = %ticket.run_id, steps = total, "Claims run completed");
    }
}
