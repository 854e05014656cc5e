//! Property-Based Test Generators
//!
//! Proptest strategies for documents and step catalogs.

use domain_claims::{DocumentDescriptor, StepCatalog, StepDefinition};
use proptest::prelude::*;

/// Strategy for plausible document file names
pub fn document_name_strategy() -> impl Strategy<Value = String> {
    ("[a-z][a-z0-9-]{0,15}", prop_oneof![Just("pdf"), Just("jpg"), Just("png"), Just("docx")])
        .prop_map(|(stem, ext)| format!("{stem}.{ext}"))
}

/// Strategy for a single document descriptor
pub fn document_strategy() -> impl Strategy<Value = DocumentDescriptor> {
    (document_name_strategy(), proptest::option::of(0u64..50_000_000)).prop_map(|(name, size)| {
        let document = DocumentDescriptor::new(name);
        match size {
            Some(size) => document.with_size(size),
            None => document,
        }
    })
}

/// Strategy for a non-empty document batch
pub fn documents_strategy(max: usize) -> impl Strategy<Value = Vec<DocumentDescriptor>> {
    proptest::collection::vec(document_strategy(), 1..=max.max(1))
}

/// Strategy for a step definition
pub fn step_definition_strategy() -> impl Strategy<Value = StepDefinition> {
    ("[A-Z][a-z]{2,10}( [A-Z][a-z]{2,10})?", "[a-z ]{5,30}")
        .prop_map(|(title, description)| StepDefinition::new(title, description))
}

/// Strategy for catalogs of 1 to `max_steps` steps
pub fn catalog_strategy(max_steps: usize) -> impl Strategy<Value = StepCatalog> {
    proptest::collection::vec(step_definition_strategy(), 1..=max_steps.max(1)).prop_map(
        |definitions| StepCatalog::new(definitions).expect("strategy never yields an empty catalog"),
    )
}
