//! Check request and report types.

use std::fmt;
use std::io::Read;

use serde::{Deserialize, Serialize};
use symptom_types::{Entity, EntityId, PatientProfile, SelectionCategory, SelectionSet};

use crate::error::ServiceResult;

/// Input to a condition check: the intake profile plus the session's
/// accumulated selections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckRequest {
    /// Patient intake profile.
    pub profile: PatientProfile,
    /// Selected names per category.
    pub selections: SelectionSet,
}

impl CheckRequest {
    /// Creates a request with a default profile.
    pub fn new(selections: SelectionSet) -> Self {
        Self {
            profile: PatientProfile::default(),
            selections,
        }
    }

    /// Reads a JSON request. Repeated selections are collapsed.
    pub fn from_reader<R: Read>(reader: R) -> ServiceResult<Self> {
        let mut request: CheckRequest = serde_json::from_reader(reader)?;
        request.selections.dedup();
        Ok(request)
    }
}

/// How a check turned out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckOutcome {
    /// At least one disease was predicted.
    Predicted,
    /// No selected symptom resolved to a known symptom.
    NoSymptoms,
    /// Symptoms resolved, but none maps to a disease.
    NoMatches,
}

/// A disease prediction with display names filled in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedPrediction {
    /// The predicted disease.
    pub disease_id: EntityId,
    /// Its display name, or `unknown` if the ID has no disease record.
    pub disease_name: String,
    /// Normalized match count.
    pub probability: f64,
    /// Names of the reported symptoms that matched.
    pub supporting_symptoms: Vec<String>,
}

impl NamedPrediction {
    /// One-line summary, e.g. `Flu (Probability: 0.50)`.
    pub fn summary(&self) -> String {
        format!("{} (Probability: {:.2})", self.disease_name, self.probability)
    }
}

/// A selected name that matched no entity in its category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnresolvedName {
    /// Category the name was selected in.
    pub category: SelectionCategory,
    /// The name as selected.
    pub name: String,
}

/// Result of a condition check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckReport {
    /// Echo of the request profile.
    pub profile: PatientProfile,
    /// Overall outcome.
    pub outcome: CheckOutcome,
    /// Predicted diseases, highest probability first.
    pub predictions: Vec<NamedPrediction>,
    /// Suggested medications.
    pub medications: Vec<Entity>,
    /// Resolved food allergies.
    pub food_allergies: Vec<Entity>,
    /// Resolved medicine allergies.
    pub medicine_allergies: Vec<Entity>,
    /// Resolved lifestyle factors.
    pub lifestyle_factors: Vec<Entity>,
    /// Resolved medical conditions.
    pub medical_conditions: Vec<Entity>,
    /// Selected names that did not resolve.
    pub unresolved: Vec<UnresolvedName>,
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Predicted Diseases")?;
        match self.outcome {
            CheckOutcome::NoSymptoms => writeln!(f, "  no symptoms supplied")?,
            CheckOutcome::NoMatches => writeln!(f, "  no diseases predicted")?,
            CheckOutcome::Predicted => {
                for prediction in &self.predictions {
                    writeln!(f, "  {}", prediction.summary())?;
                }
            }
        }

        writeln!(f, "Suggested Medications")?;
        if self.medications.is_empty() {
            writeln!(f, "  none")?;
        }
        for medication in &self.medications {
            writeln!(f, "  {}", medication.name)?;
        }

        for unresolved in &self.unresolved {
            writeln!(
                f,
                "Ignored unknown {} entry: {}",
                unresolved.category.label(),
                unresolved.name
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use symptom_types::EntityKind;

    #[test]
    fn test_summary_format() {
        let prediction = NamedPrediction {
            disease_id: EntityId::from("D1"),
            disease_name: "Flu".to_string(),
            probability: 0.5,
            supporting_symptoms: vec!["Fever".to_string()],
        };
        assert_eq!(prediction.summary(), "Flu (Probability: 0.50)");
    }

    fn report(outcome: CheckOutcome) -> CheckReport {
        CheckReport {
            profile: PatientProfile::default(),
            outcome,
            predictions: Vec::new(),
            medications: Vec::new(),
            food_allergies: Vec::new(),
            medicine_allergies: Vec::new(),
            lifestyle_factors: Vec::new(),
            medical_conditions: Vec::new(),
            unresolved: Vec::new(),
        }
    }

    fn prediction(id: &str, name: &str, probability: f64) -> NamedPrediction {
        NamedPrediction {
            disease_id: EntityId::from(id),
            disease_name: name.to_string(),
            probability,
            supporting_symptoms: Vec::new(),
        }
    }

    #[test]
    fn test_text_report_predicted() {
        let mut report = report(CheckOutcome::Predicted);
        report.predictions = vec![
            prediction("D1", "Flu", 1.0),
            prediction("D2", "Measles", 0.5),
        ];
        report.medications = vec![
            Entity::new(EntityKind::Medication, "M1", "Paracetamol"),
            Entity::new(EntityKind::Medication, "M2", "Vitamin A"),
        ];

        assert_eq!(
            report.to_string(),
            concat!(
                "Predicted Diseases\n",
                "  Flu (Probability: 1.00)\n",
                "  Measles (Probability: 0.50)\n",
                "Suggested Medications\n",
                "  Paracetamol\n",
                "  Vitamin A\n",
            )
        );
    }

    #[test]
    fn test_text_report_no_symptoms() {
        assert_eq!(
            report(CheckOutcome::NoSymptoms).to_string(),
            "Predicted Diseases\n  no symptoms supplied\nSuggested Medications\n  none\n"
        );
    }

    #[test]
    fn test_text_report_no_matches_lists_unresolved() {
        let mut report = report(CheckOutcome::NoMatches);
        report.unresolved = vec![UnresolvedName {
            category: SelectionCategory::FoodAllergies,
            name: "Shellfish".to_string(),
        }];

        assert_eq!(
            report.to_string(),
            "Predicted Diseases\n  no diseases predicted\nSuggested Medications\n  none\n\
             Ignored unknown Food Allergies entry: Shellfish\n"
        );
    }

    #[test]
    fn test_request_from_reader_dedups() {
        let json = r#"{
            "profile": {"age": 40, "region": "UK"},
            "selections": {"symptoms": ["Fever", "Cough", "Fever"]}
        }"#;
        let request = CheckRequest::from_reader(json.as_bytes()).unwrap();
        assert_eq!(request.profile.age, 40);
        assert_eq!(request.selections.symptoms, vec!["Fever", "Cough"]);
    }

    #[test]
    fn test_empty_request_uses_defaults() {
        let request = CheckRequest::from_reader("{}".as_bytes()).unwrap();
        assert_eq!(request, CheckRequest::default());
    }

    #[test]
    fn test_invalid_request() {
        assert!(CheckRequest::from_reader("{\"selections\": 3}".as_bytes()).is_err());
    }
}
