//! Mapping (edge) types between entity tables.

use crate::EntityId;

/// A symptom → disease co-occurrence edge.
///
/// Edges are kept exactly as listed in the reference data; a repeated edge
/// counts once per occurrence when diseases are scored.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SymptomDiseaseEdge {
    /// The reported symptom.
    #[cfg_attr(feature = "serde", serde(rename = "SymptomID"))]
    pub symptom_id: EntityId,
    /// The disease it points to.
    #[cfg_attr(feature = "serde", serde(rename = "DiseaseID"))]
    pub disease_id: EntityId,
}

impl SymptomDiseaseEdge {
    /// Name of the table holding these edges.
    pub const TABLE: &'static str = "SymptomDiseaseMapping";
    /// Field naming the symptom.
    pub const SYMPTOM_FIELD: &'static str = "SymptomID";
    /// Field naming the disease.
    pub const DISEASE_FIELD: &'static str = "DiseaseID";

    /// Creates a new edge.
    pub fn new(symptom_id: impl Into<EntityId>, disease_id: impl Into<EntityId>) -> Self {
        Self {
            symptom_id: symptom_id.into(),
            disease_id: disease_id.into(),
        }
    }
}

/// A disease → medication edge. Treated as a set by the medication advisor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiseaseMedicationEdge {
    /// The disease.
    #[cfg_attr(feature = "serde", serde(rename = "DiseaseID"))]
    pub disease_id: EntityId,
    /// A medication suggested for it.
    #[cfg_attr(feature = "serde", serde(rename = "MedicationID"))]
    pub medication_id: EntityId,
}

impl DiseaseMedicationEdge {
    /// Name of the table holding these edges.
    pub const TABLE: &'static str = "DiseaseMedicationMapping";
    /// Field naming the disease.
    pub const DISEASE_FIELD: &'static str = "DiseaseID";
    /// Field naming the medication.
    pub const MEDICATION_FIELD: &'static str = "MedicationID";

    /// Creates a new edge.
    pub fn new(disease_id: impl Into<EntityId>, medication_id: impl Into<EntityId>) -> Self {
        Self {
            disease_id: disease_id.into(),
            medication_id: medication_id.into(),
        }
    }
}
