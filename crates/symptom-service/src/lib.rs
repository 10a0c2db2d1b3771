//! # symptom-service
//!
//! Condition check facade over the symptom checker reference store.
//!
//! A [`SymptomChecker`] wraps a loaded [`ReferenceStore`](symptom_loader::ReferenceStore)
//! and turns a [`CheckRequest`] (patient profile plus selected names) into a
//! [`CheckReport`] with named disease predictions and suggested medications.
//! The `symptom-check` binary runs one check from a JSON request and prints
//! the report.

#![warn(missing_docs)]

mod checker;
mod error;
mod report;

pub use checker::SymptomChecker;
pub use error::{ServiceError, ServiceResult};
pub use report::{CheckOutcome, CheckReport, CheckRequest, NamedPrediction, UnresolvedName};

// Re-export the loader for convenience
pub use symptom_loader;
