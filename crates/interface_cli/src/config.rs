//! Workbench configuration

use serde::Deserialize;

use domain_claims::{DelaySchedule, DEFAULT_EVENT_CAPACITY};

/// Workbench configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WorkbenchConfig {
    /// Log level
    pub log_level: String,
    /// Minimum simulated processing time per step
    pub base_delay_ms: u64,
    /// Random extra processing time per step, upper bound
    pub jitter_ms: u64,
    /// Pause between steps
    pub inter_step_pause_ms: u64,
    /// Event channel buffer size
    pub event_capacity: usize,
}

impl Default for WorkbenchConfig {
    fn default() -> Self {
        let schedule = DelaySchedule::default();
        Self {
            log_level: "info".to_string(),
            base_delay_ms: schedule.base_delay_ms,
            jitter_ms: schedule.jitter_ms,
            inter_step_pause_ms: schedule.inter_step_pause_ms,
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}

impl WorkbenchConfig {
    /// Loads configuration from `WORKBENCH_*` environment variables
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::from_source(config::Environment::with_prefix("WORKBENCH").try_parsing(true))
    }

    /// Loads configuration from an explicit variable map, as if it were the environment
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, config::ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self::from_source(
            config::Environment::with_prefix("WORKBENCH")
                .try_parsing(true)
                .source(Some(vars)),
        )
    }

    fn from_source(source: config::Environment) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()
    }

    /// Returns the simulated timing
    pub fn schedule(&self) -> DelaySchedule {
        DelaySchedule {
            base_delay_ms: self.base_delay_ms,
            jitter_ms: self.jitter_ms,
            inter_step_pause_ms: self.inter_step_pause_ms,
        }
    }

    /// Drops every delay, for demos and scripted use
    pub fn without_delays(mut self) -> Self {
        let immediate = DelaySchedule::immediate();
        self.base_delay_ms = immediate.base_delay_ms;
        self.jitter_ms = immediate.jitter_ms;
        self.inter_step_pause_ms = immediate.inter_step_pause_ms;
        self
    }
}
