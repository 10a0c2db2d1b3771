//! Entity kinds and their record schemas.
//!
//! Every reference table stores its records with explicitly named fields,
//! e.g. `SymptomID` / `SymptomName`. The field names live here so loaders
//! never depend on field order.

use std::fmt;

/// The kind of a reference-data entity.
///
/// # Examples
///
/// ```
/// use symptom_types::EntityKind;
///
/// let kind = EntityKind::LifestyleFactor;
/// assert_eq!(kind.table_name(), "LifestyleFactors");
/// assert_eq!(kind.id_field(), "LifestyleFactorID");
/// assert_eq!(kind.name_field(), "LifestyleFactorName");
/// assert_eq!(EntityKind::from_table_name("Diseases"), Some(EntityKind::Disease));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EntityKind {
    /// A reportable symptom.
    Symptom,
    /// A disease that symptoms map to.
    Disease,
    /// A medication that diseases map to.
    Medication,
    /// A food or medicine allergy.
    Allergy,
    /// A lifestyle factor (smoking, diet, ...).
    LifestyleFactor,
    /// A prior medical condition.
    MedicalCondition,
}

impl EntityKind {
    /// All entity kinds, in reference-document order.
    pub const ALL: [EntityKind; 6] = [
        EntityKind::Symptom,
        EntityKind::Disease,
        EntityKind::Medication,
        EntityKind::Allergy,
        EntityKind::LifestyleFactor,
        EntityKind::MedicalCondition,
    ];

    /// Name of the table holding this kind of entity.
    pub fn table_name(self) -> &'static str {
        match self {
            Self::Symptom => "Symptoms",
            Self::Disease => "Diseases",
            Self::Medication => "Medications",
            Self::Allergy => "Allergies",
            Self::LifestyleFactor => "LifestyleFactors",
            Self::MedicalCondition => "MedicalConditions",
        }
    }

    /// Name of the identifier field in this kind's records.
    pub fn id_field(self) -> &'static str {
        match self {
            Self::Symptom => "SymptomID",
            Self::Disease => "DiseaseID",
            Self::Medication => "MedicationID",
            Self::Allergy => "AllergyID",
            Self::LifestyleFactor => "LifestyleFactorID",
            Self::MedicalCondition => "MedicalConditionID",
        }
    }

    /// Name of the display-name field in this kind's records.
    pub fn name_field(self) -> &'static str {
        match self {
            Self::Symptom => "SymptomName",
            Self::Disease => "DiseaseName",
            Self::Medication => "MedicationName",
            Self::Allergy => "AllergyName",
            Self::LifestyleFactor => "LifestyleFactorName",
            Self::MedicalCondition => "MedicalConditionName",
        }
    }

    /// Looks up a kind by its table name.
    pub fn from_table_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.table_name() == name)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Symptom => "symptom",
            Self::Disease => "disease",
            Self::Medication => "medication",
            Self::Allergy => "allergy",
            Self::LifestyleFactor => "lifestyle factor",
            Self::MedicalCondition => "medical condition",
        };
        f.write_str(label)
    }
}
