//! Step catalog
//!
//! The ordered, fixed list of steps a run walks through. A catalog is built
//! once and never resized; runs only mutate the statuses of the steps
//! created from it.

use serde::{Deserialize, Serialize};

use core_kernel::CoreError;

use crate::step::{Step, StepDefinition};

/// An ordered, non-empty list of step definitions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CatalogRecord")]
pub struct StepCatalog {
    definitions: Vec<StepDefinition>,
}

/// Serialized form, validated through [`StepCatalog::new`]
#[derive(Deserialize)]
struct CatalogRecord {
    definitions: Vec<StepDefinition>,
}

impl TryFrom<CatalogRecord> for StepCatalog {
    type Error = CoreError;

    fn try_from(record: CatalogRecord) -> Result<Self, Self::Error> {
        Self::new(record.definitions)
    }
}

impl StepCatalog {
    /// Creates a catalog from definitions in execution order
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if `definitions` is empty.
    pub fn new(definitions: Vec<StepDefinition>) -> Result<Self, CoreError> {
        if definitions.is_empty() {
            return Err(CoreError::validation(
                "a step catalog must contain at least one step",
            ));
        }
        Ok(Self { definitions })
    }

    /// The four-stage claims pipeline: intake, coverage, damage, settlement
    pub fn claims_processing() -> Self {
        Self {
            definitions: vec![
                StepDefinition::new(
                    "Claim Intake",
                    "Extract claim details and validate policy",
                ),
                StepDefinition::new(
                    "Coverage Verification",
                    "Check policy coverage against claim",
                ),
                StepDefinition::new(
                    "Damage Assessment",
                    "Analyze damage and repair costs",
                ),
                StepDefinition::new(
                    "Settlement Calculation",
                    "Calculate payout and generate communication",
                ),
            ],
        }
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Always false, construction rejects empty catalogs
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn definitions(&self) -> &[StepDefinition] {
        &self.definitions
    }

    /// Materializes every definition as a pending step
    pub fn pending_steps(&self) -> Vec<Step> {
        self.definitions
            .iter()
            .enumerate()
            .map(|(index, definition)| Step::pending(index, definition))
            .collect()
    }
}

impl Default for StepCatalog {
    fn default() -> Self {
        Self::claims_processing()
    }
}
