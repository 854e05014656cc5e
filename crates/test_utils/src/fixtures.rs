//! Pre-built Test Fixtures
//!
//! Ready-to-use documents, catalogs, and result tables. Names and sizes are
//! fixed so failures are easy to read.

use domain_claims::{DocumentDescriptor, StaticResults, StepCatalog, StepDefinition, StepResult};

/// Fixture for claim documents
pub struct DocumentFixtures;

impl DocumentFixtures {
    /// The ACORD loss notice that opens a vehicle claim
    pub fn acord_form() -> DocumentDescriptor {
        DocumentDescriptor::new("acord-auto-loss-notice.pdf")
            .with_size(184_320)
            .with_media_type("application/pdf")
    }

    /// A photo of the damaged rear bumper
    pub fn damage_photo() -> DocumentDescriptor {
        DocumentDescriptor::new("rear-bumper.jpg")
            .with_size(2_457_600)
            .with_media_type("image/jpeg")
    }

    /// A body shop repair estimate
    pub fn repair_estimate() -> DocumentDescriptor {
        DocumentDescriptor::new("repair-estimate.xlsx").with_size(24_576)
    }

    /// Everything a typical collision claim is filed with
    pub fn claim_packet() -> Vec<DocumentDescriptor> {
        vec![Self::acord_form(), Self::damage_photo(), Self::repair_estimate()]
    }
}

/// Fixture for step catalogs and result tables
pub struct CatalogFixtures;

impl CatalogFixtures {
    /// The standard four-step claims catalog
    pub fn claims() -> StepCatalog {
        StepCatalog::claims_processing()
    }

    /// A catalog of `n` steps titled "Step 1", "Step 2", ...
    ///
    /// # Panics
    ///
    /// Panics if `n` is zero.
    pub fn numbered(n: usize) -> StepCatalog {
        let definitions = (1..=n)
            .map(|i| StepDefinition::new(format!("Step {i}"), format!("Numbered step {i}")))
            .collect();
        StepCatalog::new(definitions).expect("numbered catalog needs at least one step")
    }

    /// Results `"result 1"`, `"result 2"`, ... for a catalog of `n` steps
    pub fn numbered_results(n: usize) -> StaticResults {
        StaticResults::new((1..=n).map(|i| StepResult::text(format!("result {i}"))).collect())
    }

    /// Key/value results shaped like a settlement table
    pub fn settlement_table() -> StaticResults {
        StaticResults::new(vec![StepResult::fields([
            ("Total Claim Amount", "$3,250"),
            ("Policy Deductible", "$500"),
            ("Net Payout Amount", "$2,750"),
        ])])
        .with_summary("Settlement table ready")
    }
}
