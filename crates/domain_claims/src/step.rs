//! Workflow steps and their status machine

use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::CoreError;

use crate::error::WorkflowError;

/// Ordinal identifier of a step, 1-based and stable across runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct StepId(u32);

impl StepId {
    /// Returns the id for the step at `index` in the catalog
    pub fn from_index(index: usize) -> Self {
        Self(index as u32 + 1)
    }

    /// Returns the zero-based catalog index
    pub fn index(&self) -> usize {
        self.0 as usize - 1
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for StepId {
    type Error = CoreError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        if value == 0 {
            return Err(CoreError::validation("step ids start at 1"));
        }
        Ok(Self(value))
    }
}

impl From<StepId> for u32 {
    fn from(id: StepId) -> u32 {
        id.0
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Step status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    /// Not yet reached in the current run
    Pending,
    /// The single step currently being worked on
    Processing,
    /// Finished, result attached
    Completed,
    /// Reserved for failed steps. The runner never sets it today.
    Error,
}

impl StepStatus {
    /// Returns true if the step will not change again during this run
    pub fn is_terminal(&self) -> bool {
        matches!(self, StepStatus::Completed | StepStatus::Error)
    }

    /// Label shown next to the step in progress views
    pub fn label(&self) -> &'static str {
        match self {
            StepStatus::Pending => "Pending",
            StepStatus::Processing => "Processing...",
            StepStatus::Completed => "Completed",
            StepStatus::Error => "Error",
        }
    }
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StepStatus::Pending => "pending",
            StepStatus::Processing => "processing",
            StepStatus::Completed => "completed",
            StepStatus::Error => "error",
        };
        f.write_str(name)
    }
}

/// A labelled value in a structured step result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultField {
    pub label: String,
    pub value: String,
}

impl ResultField {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Payload attached to a completed step
///
/// The workflow never interprets it; presentation is up to the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum StepResult {
    /// Free-form report text
    Text(String),
    /// Key/value rows, in display order
    Fields(Vec<ResultField>),
}

impl StepResult {
    pub fn text(text: impl Into<String>) -> Self {
        StepResult::Text(text.into())
    }

    /// Builds a field list from `(label, value)` pairs
    pub fn fields<L, V>(pairs: impl IntoIterator<Item = (L, V)>) -> Self
    where
        L: Into<String>,
        V: Into<String>,
    {
        StepResult::Fields(
            pairs
                .into_iter()
                .map(|(label, value)| ResultField::new(label, value))
                .collect(),
        )
    }

    /// Returns true if the payload text or any field contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        match self {
            StepResult::Text(text) => text.contains(needle),
            StepResult::Fields(fields) => fields
                .iter()
                .any(|f| f.label.contains(needle) || f.value.contains(needle)),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            StepResult::Text(text) => text.is_empty(),
            StepResult::Fields(fields) => fields.is_empty(),
        }
    }
}

impl fmt::Display for StepResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepResult::Text(text) => f.write_str(text),
            StepResult::Fields(fields) => {
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{}: {}", field.label, field.value)?;
                }
                Ok(())
            }
        }
    }
}

/// Static display text for one step of the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepDefinition {
    pub title: String,
    pub description: String,
}

impl StepDefinition {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// A step as seen during a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub id: StepId,
    pub title: String,
    pub description: String,
    pub status: StepStatus,
    pub result: Option<StepResult>,
}

impl Step {
    /// Creates a pending step for the definition at `index`
    pub fn pending(index: usize, definition: &StepDefinition) -> Self {
        Self {
            id: StepId::from_index(index),
            title: definition.title.clone(),
            description: definition.description.clone(),
            status: StepStatus::Pending,
            result: None,
        }
    }

    /// Pending -> Processing
    pub fn begin(&mut self) -> Result<(), WorkflowError> {
        self.transition(StepStatus::Processing)
    }

    /// Processing -> Completed, attaching the result
    pub fn complete(&mut self, result: StepResult) -> Result<(), WorkflowError> {
        self.transition(StepStatus::Completed)?;
        self.result = Some(result);
        Ok(())
    }

    /// Processing -> Error
    ///
    /// Kept so the status machine covers every status a renderer may show.
    /// Nothing in the runner calls it.
    pub fn fail(&mut self) -> Result<(), WorkflowError> {
        self.transition(StepStatus::Error)
    }

    /// Back to pending from any status, dropping the result
    pub fn reset(&mut self) {
        self.status = StepStatus::Pending;
        self.result = None;
    }

    pub fn is_completed(&self) -> bool {
        self.status == StepStatus::Completed
    }

    pub fn is_processing(&self) -> bool {
        self.status == StepStatus::Processing
    }

    fn transition(&mut self, to: StepStatus) -> Result<(), WorkflowError> {
        let valid = matches!(
            (self.status, to),
            (StepStatus::Pending, StepStatus::Processing)
                | (StepStatus::Processing, StepStatus::Completed)
                | (StepStatus::Processing, StepStatus::Error)
        );

        if !valid {
            return Err(WorkflowError::InvalidStatusTransition {
                from: self.status,
                to,
            });
        }

        self.status = to;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intake() -> Step {
        Step::pending(0, &StepDefinition::new("Claim Intake", "Extract claim details"))
    }

    #[test]
    fn test_step_ids_are_one_based() {
        let id = StepId::from_index(0);
        assert_eq!(id.value(), 1);
        assert_eq!(id.index(), 0);
        assert_eq!(StepId::from_index(3).to_string(), "4");
    }

    #[test]
    fn test_step_id_zero_is_rejected() {
        assert!(serde_json::from_str::<StepId>("0").is_err());
        assert!(matches!(StepId::try_from(0), Err(CoreError::Validation(_))));

        let id: StepId = serde_json::from_str("2").unwrap();
        assert_eq!(id.index(), 1);
        assert_eq!(serde_json::to_string(&id).unwrap(), "2");
    }

    #[test]
    fn test_happy_path_transitions() {
        let mut step = intake();
        assert_eq!(step.status, StepStatus::Pending);

        step.begin().unwrap();
        assert!(step.is_processing());
        assert!(step.result.is_none());

        step.complete(StepResult::text("done")).unwrap();
        assert!(step.is_completed());
        assert_eq!(step.result, Some(StepResult::text("done")));
    }

    #[test]
    fn test_cannot_complete_pending_step() {
        let mut step = intake();
        let err = step.complete(StepResult::text("early")).unwrap_err();

        assert!(matches!(
            err,
            WorkflowError::InvalidStatusTransition {
                from: StepStatus::Pending,
                to: StepStatus::Completed,
            }
        ));
        assert!(step.result.is_none());
    }

    #[test]
    fn test_cannot_begin_twice() {
        let mut step = intake();
        step.begin().unwrap();
        assert!(step.begin().is_err());
    }

    #[test]
    fn test_error_is_reachable_from_processing_only() {
        let mut step = intake();
        assert!(step.fail().is_err());

        step.begin().unwrap();
        step.fail().unwrap();
        assert_eq!(step.status, StepStatus::Error);
        assert!(step.status.is_terminal());
        assert!(step.result.is_none());
    }

    #[test]
    fn test_reset_clears_result() {
        let mut step = intake();
        step.begin().unwrap();
        step.complete(StepResult::text("done")).unwrap();

        step.reset();
        assert_eq!(step.status, StepStatus::Pending);
        assert!(step.result.is_none());
        step.begin().unwrap();
    }

    #[test]
    fn test_fields_display() {
        let result = StepResult::fields([("Deductible", "$500"), ("Net Payout", "$2,750")]);
        assert_eq!(result.to_string(), "Deductible: $500\nNet Payout: $2,750");
        assert!(result.contains("$2,750"));
        assert!(!result.contains("$9,999"));
    }

    #[test]
    fn test_result_serialization_shape() {
        let json = serde_json::to_value(StepResult::text("hello")).unwrap();
        assert_eq!(json["kind"], "text");
        assert_eq!(json["value"], "hello");
    }

    #[test]
    fn test_status_display() {
        assert_eq!(StepStatus::Processing.to_string(), "processing");
        assert_eq!(StepStatus::Processing.label(), "Processing...");
    }
}
