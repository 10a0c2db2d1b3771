//! Condition check facade.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use symptom_loader::{discover_reference_files, LoadConfig, ReferenceStore};
use symptom_types::{Entity, EntityKind, SelectionCategory, SelectionSet};

use crate::error::ServiceResult;
use crate::report::{CheckOutcome, CheckReport, CheckRequest, NamedPrediction, UnresolvedName};

/// Runs condition checks against a shared, read-only reference store.
///
/// Cloning is cheap; clones share the same store and may be used from
/// multiple threads at once.
#[derive(Clone)]
pub struct SymptomChecker {
    store: Arc<ReferenceStore>,
}

impl SymptomChecker {
    /// Creates a checker that owns the given store.
    pub fn new(store: ReferenceStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Creates a checker over an already shared store.
    pub fn from_shared(store: Arc<ReferenceStore>) -> Self {
        Self { store }
    }

    /// Discovers and loads reference data from a directory.
    pub fn load<P: AsRef<Path>>(path: P, config: &LoadConfig) -> ServiceResult<Self> {
        let files = discover_reference_files(path)?;
        tracing::info!("Discovered reference files: {:?}", files.layout());

        let mut store = ReferenceStore::new();
        store.load_all_parallel(&files, config)?;

        Ok(Self::new(store))
    }

    /// Returns a reference to the store.
    pub fn store(&self) -> &ReferenceStore {
        &self.store
    }

    /// Names offered for selection in a category.
    pub fn vocabulary(&self, category: SelectionCategory) -> Vec<&str> {
        self.store.vocabulary(category.entity_kind())
    }

    /// Adds a name to a selection set if it is a known entity name for
    /// the category. Returns true if the set changed.
    pub fn select(
        &self,
        selections: &mut SelectionSet,
        category: SelectionCategory,
        name: &str,
    ) -> bool {
        selections.add_from_vocabulary(category, name, self.vocabulary(category))
    }

    /// Runs a condition check.
    ///
    /// Unknown names are reported in [`CheckReport::unresolved`] rather than
    /// failing the check. Only an out-of-range profile is an error.
    pub fn check(&self, request: &CheckRequest) -> ServiceResult<CheckReport> {
        request.profile.validate()?;
        let start = Instant::now();
        let selections = &request.selections;

        let symptom_ids = self
            .store
            .resolve_ids(EntityKind::Symptom, &selections.symptoms);
        let predictions = self.store.predict_diseases(&symptom_ids);
        let medications = self.store.suggest_for_predictions(&predictions);

        let mut named: Vec<NamedPrediction> = predictions
            .iter()
            .map(|prediction| NamedPrediction {
                disease_id: prediction.disease_id.clone(),
                disease_name: self
                    .store
                    .display_name(EntityKind::Disease, &prediction.disease_id)
                    .to_string(),
                probability: prediction.probability,
                supporting_symptoms: prediction
                    .supporting_symptoms
                    .iter()
                    .map(|id| self.store.display_name(EntityKind::Symptom, id).to_string())
                    .collect(),
            })
            .collect();
        named.sort_by(|a, b| b.probability.total_cmp(&a.probability));

        let outcome = if symptom_ids.is_empty() {
            CheckOutcome::NoSymptoms
        } else if named.is_empty() {
            CheckOutcome::NoMatches
        } else {
            CheckOutcome::Predicted
        };

        let unresolved = self.unresolved(selections);
        if !unresolved.is_empty() {
            tracing::warn!("{} selected names did not match any entity", unresolved.len());
        }

        tracing::debug!(
            "Checked {} symptoms: {} predictions, {} medications in {:?}",
            symptom_ids.len(),
            named.len(),
            medications.len(),
            start.elapsed()
        );

        Ok(CheckReport {
            profile: request.profile.clone(),
            outcome,
            predictions: named,
            medications,
            food_allergies: self.selected_entities(selections, SelectionCategory::FoodAllergies),
            medicine_allergies: self
                .selected_entities(selections, SelectionCategory::MedicineAllergies),
            lifestyle_factors: self
                .selected_entities(selections, SelectionCategory::LifestyleFactors),
            medical_conditions: self
                .selected_entities(selections, SelectionCategory::MedicalConditions),
            unresolved,
        })
    }

    fn selected_entities(
        &self,
        selections: &SelectionSet,
        category: SelectionCategory,
    ) -> Vec<Entity> {
        let kind = category.entity_kind();
        self.store
            .resolve_ids(kind, selections.names(category))
            .iter()
            .filter_map(|id| self.store.get_entity(kind, id))
            .cloned()
            .collect()
    }

    fn unresolved(&self, selections: &SelectionSet) -> Vec<UnresolvedName> {
        SelectionCategory::ALL
            .iter()
            .flat_map(move |&category| {
                self.store
                    .unresolved_names(category.entity_kind(), selections.names(category))
                    .into_iter()
                    .map(move |name| UnresolvedName {
                        category,
                        name: name.to_string(),
                    })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::thread;

    use symptom_types::{DiseaseMedicationEdge, EntityId, PatientProfile, SymptomDiseaseEdge};
    use tempfile::TempDir;

    use crate::error::ServiceError;

    fn store() -> ReferenceStore {
        let mut store = ReferenceStore::new();
        store.insert_entities([
            Entity::new(EntityKind::Symptom, "S1", "Fever"),
            Entity::new(EntityKind::Symptom, "S2", "Cough"),
            Entity::new(EntityKind::Symptom, "S3", "Rash"),
            Entity::new(EntityKind::Disease, "D1", "Flu"),
            Entity::new(EntityKind::Disease, "D2", "Measles"),
            Entity::new(EntityKind::Medication, "M1", "Paracetamol"),
            Entity::new(EntityKind::Medication, "M2", "Vitamin A"),
            Entity::new(EntityKind::Allergy, "A1", "Peanuts"),
            Entity::new(EntityKind::Allergy, "A2", "Penicillin"),
            Entity::new(EntityKind::LifestyleFactor, "L1", "Smoking"),
        ]);
        store.insert_symptom_disease_edges([
            SymptomDiseaseEdge::new("S1", "D1"),
            SymptomDiseaseEdge::new("S2", "D1"),
            SymptomDiseaseEdge::new("S1", "D2"),
            SymptomDiseaseEdge::new("S3", "D2"),
        ]);
        store.insert_disease_medication_edges([
            DiseaseMedicationEdge::new("D1", "M1"),
            DiseaseMedicationEdge::new("D2", "M2"),
            DiseaseMedicationEdge::new("D2", "M1"),
        ]);
        store
    }

    fn request(symptoms: &[&str]) -> CheckRequest {
        let mut selections = SelectionSet::new();
        for symptom in symptoms {
            selections.add(SelectionCategory::Symptoms, *symptom);
        }
        CheckRequest::new(selections)
    }

    #[test]
    fn test_flu_check() {
        let checker = SymptomChecker::new(store());
        let report = checker.check(&request(&["Fever", "Cough"])).unwrap();

        assert_eq!(report.outcome, CheckOutcome::Predicted);
        let summaries: Vec<String> = report.predictions.iter().map(|p| p.summary()).collect();
        assert_eq!(
            summaries,
            vec!["Flu (Probability: 1.00)", "Measles (Probability: 0.50)"]
        );
        assert_eq!(report.predictions[0].supporting_symptoms, vec!["Fever", "Cough"]);

        let medications: Vec<&str> = report.medications.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(medications, vec!["Paracetamol", "Vitamin A"]);
        assert!(report.unresolved.is_empty());
    }

    #[test]
    fn test_predictions_sorted_by_probability() {
        let checker = SymptomChecker::new(store());
        let report = checker.check(&request(&["Cough", "Rash", "Fever"])).unwrap();

        let names: Vec<&str> = report
            .predictions
            .iter()
            .map(|p| p.disease_name.as_str())
            .collect();
        // Equal scores keep first-match order
        assert_eq!(names, vec!["Flu", "Measles"]);
        assert!(report
            .predictions
            .windows(2)
            .all(|pair| pair[0].probability >= pair[1].probability));
    }

    #[test]
    fn test_no_symptoms() {
        let checker = SymptomChecker::new(store());
        let report = checker.check(&CheckRequest::default()).unwrap();
        assert_eq!(report.outcome, CheckOutcome::NoSymptoms);
        assert!(report.predictions.is_empty());
        assert!(report.medications.is_empty());
    }

    #[test]
    fn test_only_unknown_symptoms() {
        let checker = SymptomChecker::new(store());
        let report = checker.check(&request(&["Levitation"])).unwrap();
        assert_eq!(report.outcome, CheckOutcome::NoSymptoms);
        assert_eq!(
            report.unresolved,
            vec![UnresolvedName {
                category: SelectionCategory::Symptoms,
                name: "Levitation".to_string(),
            }]
        );
    }

    #[test]
    fn test_no_matches() {
        let mut store = store();
        store.insert_entities([Entity::new(EntityKind::Symptom, "S9", "Hiccups")]);
        let checker = SymptomChecker::new(store);

        let report = checker.check(&request(&["Hiccups"])).unwrap();
        assert_eq!(report.outcome, CheckOutcome::NoMatches);
    }

    #[test]
    fn test_context_selections_resolved() {
        let checker = SymptomChecker::new(store());
        let mut selections = SelectionSet::new();
        selections.add(SelectionCategory::Symptoms, "Fever");
        selections.add(SelectionCategory::FoodAllergies, "Peanuts");
        selections.add(SelectionCategory::MedicineAllergies, "Penicillin");
        selections.add(SelectionCategory::LifestyleFactors, "Smoking");
        selections.add(SelectionCategory::MedicalConditions, "Asthma");

        let report = checker.check(&CheckRequest::new(selections)).unwrap();
        assert_eq!(report.food_allergies[0].id, EntityId::from("A1"));
        assert_eq!(report.medicine_allergies[0].id, EntityId::from("A2"));
        assert_eq!(report.lifestyle_factors[0].name, "Smoking");
        assert!(report.medical_conditions.is_empty());
        assert_eq!(report.unresolved.len(), 1);
        assert_eq!(report.unresolved[0].category, SelectionCategory::MedicalConditions);
    }

    #[test]
    fn test_invalid_profile_rejected() {
        let checker = SymptomChecker::new(store());
        let mut request = request(&["Fever"]);
        request.profile = PatientProfile {
            age: 500,
            ..PatientProfile::default()
        };
        assert!(matches!(checker.check(&request), Err(ServiceError::Profile(_))));
    }

    #[test]
    fn test_select_uses_vocabulary() {
        let checker = SymptomChecker::new(store());
        let mut selections = SelectionSet::new();
        assert!(checker.select(&mut selections, SelectionCategory::Symptoms, "Fever"));
        assert!(!checker.select(&mut selections, SelectionCategory::Symptoms, "Fever"));
        assert!(!checker.select(&mut selections, SelectionCategory::Symptoms, "Flu"));
        assert!(checker.select(&mut selections, SelectionCategory::FoodAllergies, "Peanuts"));
        assert_eq!(selections.len(), 2);
    }

    #[test]
    fn test_concurrent_checks_agree() {
        let checker = SymptomChecker::from_shared(Arc::new(store()));
        let expected = checker.check(&request(&["Fever", "Rash"])).unwrap();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let checker = checker.clone();
                thread::spawn(move || checker.check(&request(&["Fever", "Rash"])).unwrap())
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    }

    #[test]
    fn test_load_from_directory() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("medical_data.json"),
            r#"{
                "Symptoms": [{"SymptomID": 1, "SymptomName": "Fever"}],
                "Diseases": [{"DiseaseID": 10, "DiseaseName": "Flu"}],
                "Medications": [{"MedicationID": 100, "MedicationName": "Paracetamol"}]
            }"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("knowledge_base.json"),
            r#"{
                "SymptomDiseaseMapping": [{"SymptomID": 1, "DiseaseID": 10}],
                "DiseaseMedicationMapping": [{"DiseaseID": 10, "MedicationID": 100}]
            }"#,
        )
        .unwrap();

        let checker = SymptomChecker::load(dir.path(), &LoadConfig::default()).unwrap();
        let report = checker.check(&request(&["Fever"])).unwrap();
        assert_eq!(report.predictions[0].summary(), "Flu (Probability: 1.00)");
        assert_eq!(report.medications[0].id, EntityId::Int(100));
    }

    #[test]
    fn test_load_missing_directory() {
        let result = SymptomChecker::load("/nonexistent/reference/data", &LoadConfig::default());
        assert!(matches!(result, Err(ServiceError::Load(_))));
    }
}
