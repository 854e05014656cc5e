//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! claims workbench test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built documents and catalogs
//! - `builders`: Builder patterns for runners and documents
//! - `notifications`: A notification sink that records what it receives
//! - `events`: Helpers for draining a runner's event channel
//! - `assertions`: Custom assertion helpers for snapshots and event streams
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod notifications;
pub mod events;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use notifications::*;
pub use events::*;
pub use assertions::*;
pub use generators::*;
