//! Simulated processing latency
//!
//! A run pauses for a base delay plus random jitter while each step is
//! "processing", then briefly between steps. The numbers live in a
//! [`DelaySchedule`]; the waiting itself goes through the [`Sleeper`] port so
//! tests can swap in an immediate implementation or drive Tokio's paused
//! clock.

use async_trait::async_trait;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use core_kernel::{CoreError, DomainPort};

/// Timing of a simulated run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DelaySchedule {
    /// Minimum time a step spends processing
    pub base_delay_ms: u64,
    /// Upper bound of the uniform random extra delay per step
    pub jitter_ms: u64,
    /// Pause between one step completing and the next one starting
    pub inter_step_pause_ms: u64,
}

impl Default for DelaySchedule {
    fn default() -> Self {
        Self {
            base_delay_ms: 2000,
            jitter_ms: 1000,
            inter_step_pause_ms: 500,
        }
    }
}

impl DelaySchedule {
    /// A schedule with no waiting at all
    pub fn immediate() -> Self {
        Self {
            base_delay_ms: 0,
            jitter_ms: 0,
            inter_step_pause_ms: 0,
        }
    }

    /// A schedule without jitter, for reproducible timing
    pub fn fixed(step_delay_ms: u64, inter_step_pause_ms: u64) -> Self {
        Self {
            base_delay_ms: step_delay_ms,
            jitter_ms: 0,
            inter_step_pause_ms,
        }
    }

    /// Checks that the longest possible step delay is representable
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Configuration` if `base_delay_ms + jitter_ms` overflows.
    pub fn validate(&self) -> Result<(), CoreError> {
        self.base_delay_ms
            .checked_add(self.jitter_ms)
            .map(|_| ())
            .ok_or_else(|| {
                CoreError::configuration(format!(
                    "base delay {}ms plus jitter {}ms overflows",
                    self.base_delay_ms, self.jitter_ms
                ))
            })
    }

    /// Draws one step delay using the thread-local RNG
    pub fn sample_step_delay(&self) -> Duration {
        self.step_delay_with(&mut rand::thread_rng())
    }

    /// Draws one step delay from `rng`
    pub fn step_delay_with<R: Rng>(&self, rng: &mut R) -> Duration {
        let jitter = if self.jitter_ms == 0 {
            0
        } else {
            rng.gen_range(0..=self.jitter_ms)
        };
        Duration::from_millis(self.base_delay_ms.saturating_add(jitter))
    }

    pub fn inter_step_pause(&self) -> Duration {
        Duration::from_millis(self.inter_step_pause_ms)
    }

    /// The longest a single step can take
    pub fn max_step_delay(&self) -> Duration {
        Duration::from_millis(self.base_delay_ms.saturating_add(self.jitter_ms))
    }
}

/// Port for suspending the driver task
#[async_trait]
pub trait Sleeper: DomainPort {
    async fn sleep(&self, duration: Duration);
}

/// Sleeps on the Tokio timer
///
/// Honours `tokio::time::pause`, so paused-clock tests stay deterministic.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

impl DomainPort for TokioSleeper {}

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        if duration.is_zero() {
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(duration).await;
        }
    }
}

/// Never waits; yields once so other tasks still get to observe each step
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmediateSleeper;

impl DomainPort for ImmediateSleeper {}

#[async_trait]
impl Sleeper for ImmediateSleeper {
    async fn sleep(&self, _duration: Duration) {
        tokio::task::yield_now().await;
    }
}
