//! # symptom-loader
//!
//! Reference data store and inference core for the symptom checker.
//!
//! Loads the entity and mapping tables from JSON documents or per-table CSV
//! files into an immutable [`ReferenceStore`], then answers three pure
//! queries over it:
//!
//! - [`resolve_ids`] / [`ReferenceStore::resolve_ids`]: display names to identifiers
//! - [`ReferenceStore::predict_diseases`]: symptom identifiers to scored diseases
//! - [`ReferenceStore::suggest_medications`]: disease identifiers to medications
//!
//! ## Usage
//!
//! ```ignore
//! use symptom_loader::{LoadConfig, ReferenceStore};
//! use symptom_types::EntityKind;
//!
//! let store = ReferenceStore::from_directory("data", &LoadConfig::default())?;
//!
//! let symptoms = store.resolve_ids(EntityKind::Symptom, &["Fever", "Cough"]);
//! for prediction in store.predict_diseases(&symptoms) {
//!     println!("{} {:.2}", store.display_name(EntityKind::Disease, &prediction.disease_id), prediction.probability);
//! }
//! ```
//!
//! ## Features
//!
//! - `parallel` (default): enables [`ReferenceStore::load_all_parallel`] via rayon.

#![warn(missing_docs)]

mod advisor;
pub mod json;
mod loader;
pub mod parser;
mod predictor;
mod resolver;
mod store;
mod types;

pub use loader::{discover_reference_files, KNOWLEDGE_BASE_FILE, MEDICAL_DATA_FILE};
pub use parser::{CsvTable, FieldSource, TableRecord};
pub use resolver::resolve_ids;
pub use store::{ReferenceStore, UNKNOWN_NAME};
pub use types::{
    LoadConfig, LoadError, LoadResult, LoadStats, ReferenceFiles, ReferenceLayout,
};

// Re-export symptom-types for convenience
pub use symptom_types;
