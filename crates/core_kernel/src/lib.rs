//! Core Kernel - Foundational types for the claims workbench
//!
//! This crate provides the building blocks shared by the workflow domain and
//! the command line interface:
//! - Strongly-typed identifiers for runs and uploaded documents
//! - The kernel error type used for validation and configuration failures
//! - The marker trait every domain port extends

pub mod identifiers;
pub mod error;
pub mod ports;

pub use identifiers::{RunId, DocumentId};
pub use error::CoreError;
pub use ports::DomainPort;
