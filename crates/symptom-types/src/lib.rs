//! # symptom-types
//!
//! Type definitions for symptom checker reference data.
//!
//! This crate provides the entity, mapping and prediction types shared by the
//! loader/inference crate and the service facade: symptoms, diseases,
//! medications, allergies, lifestyle factors and medical conditions, the
//! symptom→disease and disease→medication edges between them, and the
//! caller-owned selection sets and patient profile.
//!
//! ## Features
//!
//! - `serde` (default): Enables serialization/deserialization support via serde.
//!   Disable this feature for zero-dependency usage.
//!
//! ## Usage
//!
//! ```rust
//! use symptom_types::{Entity, EntityKind, SymptomDiseaseEdge, SelectionCategory, SelectionSet};
//!
//! let fever = Entity::new(EntityKind::Symptom, 1u64, "Fever");
//! let edge = SymptomDiseaseEdge::new(1u64, 10u64);
//! assert_eq!(edge.symptom_id, fever.id);
//!
//! let mut selections = SelectionSet::new();
//! selections.add(SelectionCategory::Symptoms, "Fever");
//! assert_eq!(selections.len(), 1);
//! ```

#![warn(missing_docs)]

mod entity;
mod id;
mod kind;
mod mapping;
mod patient;
mod prediction;
mod selection;

// Re-export all public types at crate root
pub use entity::{Entity, Named};
pub use id::EntityId;
pub use kind::EntityKind;
pub use mapping::{DiseaseMedicationEdge, SymptomDiseaseEdge};
pub use patient::{BloodType, Gender, PatientProfile, ProfileError, Region};
pub use prediction::DiseasePrediction;
pub use selection::{SelectionCategory, SelectionSet};
