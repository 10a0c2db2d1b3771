//! Disease → medication aggregation.

use std::collections::HashSet;

use symptom_types::{DiseasePrediction, Entity, EntityId, EntityKind};

use crate::store::ReferenceStore;

impl ReferenceStore {
    /// Suggests medications for a list of disease IDs.
    ///
    /// Returns the union of medications linked to any of the diseases, each
    /// once, in medication table order. Medication IDs missing from the
    /// medication table are dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use symptom_loader::ReferenceStore;
    /// use symptom_types::{DiseaseMedicationEdge, Entity, EntityId, EntityKind};
    ///
    /// let mut store = ReferenceStore::new();
    /// store.insert_entities([Entity::new(EntityKind::Medication, "M1", "Paracetamol")]);
    /// store.insert_disease_medication_edges([
    ///     DiseaseMedicationEdge::new("D1", "M1"),
    ///     DiseaseMedicationEdge::new("D2", "M1"),
    /// ]);
    ///
    /// let medications = store.suggest_medications(&[EntityId::from("D1"), EntityId::from("D2")]);
    /// assert_eq!(medications.len(), 1);
    /// assert_eq!(medications[0].name, "Paracetamol");
    /// ```
    pub fn suggest_medications(&self, disease_ids: &[EntityId]) -> Vec<Entity> {
        let mut medication_ids: HashSet<&EntityId> = disease_ids
            .iter()
            .flat_map(|disease_id| self.medications_for_disease(disease_id))
            .collect();

        if medication_ids.is_empty() {
            return Vec::new();
        }

        // Each ID is taken once, so a repeated row keeps its first occurrence
        let medications: Vec<Entity> = self
            .entities(EntityKind::Medication)
            .iter()
            .filter(|medication| medication_ids.remove(&medication.id))
            .cloned()
            .collect();

        if !medication_ids.is_empty() {
            tracing::debug!(
                "{} suggested medication IDs have no medication record",
                medication_ids.len()
            );
        }

        medications
    }

    /// Suggests medications for the diseases in a prediction set.
    pub fn suggest_for_predictions(&self, predictions: &[DiseasePrediction]) -> Vec<Entity> {
        let disease_ids: Vec<EntityId> = predictions
            .iter()
            .map(|prediction| prediction.disease_id.clone())
            .collect();
        self.suggest_medications(&disease_ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use symptom_types::{DiseaseMedicationEdge, SymptomDiseaseEdge};

    fn id(value: &str) -> EntityId {
        EntityId::from(value)
    }

    fn store() -> ReferenceStore {
        let mut store = ReferenceStore::new();
        store.insert_entities([
            Entity::new(EntityKind::Medication, "M1", "Paracetamol"),
            Entity::new(EntityKind::Medication, "M2", "Ibuprofen"),
            Entity::new(EntityKind::Medication, "M3", "Salbutamol"),
        ]);
        store.insert_disease_medication_edges([
            DiseaseMedicationEdge::new("D2", "M2"),
            DiseaseMedicationEdge::new("D1", "M1"),
            DiseaseMedicationEdge::new("D1", "M1"),
            DiseaseMedicationEdge::new("D2", "M1"),
            DiseaseMedicationEdge::new("D3", "M404"),
        ]);
        store
    }

    #[test]
    fn test_empty_input() {
        assert!(store().suggest_medications(&[]).is_empty());
        assert!(store().suggest_for_predictions(&[]).is_empty());
    }

    #[test]
    fn test_single_disease() {
        let medications = store().suggest_medications(&[id("D1")]);
        assert_eq!(medications, vec![Entity::new(EntityKind::Medication, "M1", "Paracetamol")]);
    }

    #[test]
    fn test_union_is_deduplicated_in_table_order() {
        let store = store();
        let disease_ids = [id("D2"), id("D1")];
        let medications = store.suggest_medications(&disease_ids);

        let names: Vec<&str> = medications.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Paracetamol", "Ibuprofen"]);

        // Every suggestion is backed by an edge from one of the diseases
        for medication in &medications {
            assert!(store.disease_medication_edges().iter().any(|edge| {
                edge.medication_id == medication.id && disease_ids.contains(&edge.disease_id)
            }));
        }
    }

    #[test]
    fn test_dangling_medication_dropped() {
        assert!(store().suggest_medications(&[id("D3")]).is_empty());
    }

    #[test]
    fn test_repeated_medication_row_suggested_once() {
        let mut store = ReferenceStore::new();
        store.insert_entities([
            Entity::new(EntityKind::Medication, "M1", "Paracetamol"),
            Entity::new(EntityKind::Medication, "M1", "Acetaminophen"),
        ]);
        store.insert_disease_medication_edges([DiseaseMedicationEdge::new("D1", "M1")]);

        let medications = store.suggest_medications(&[id("D1")]);
        assert_eq!(medications.len(), 1);
        assert_eq!(medications[0].name, "Paracetamol");
        assert_eq!(
            store.get_entity(EntityKind::Medication, &id("M1")),
            Some(&medications[0])
        );
    }

    #[test]
    fn test_unknown_disease() {
        assert!(store().suggest_medications(&[id("D99")]).is_empty());
    }

    #[test]
    fn test_end_to_end_flu_scenario() {
        let mut store = ReferenceStore::new();
        store.insert_entities([
            Entity::new(EntityKind::Symptom, "S1", "Fever"),
            Entity::new(EntityKind::Symptom, "S2", "Cough"),
            Entity::new(EntityKind::Disease, "D1", "Flu"),
            Entity::new(EntityKind::Medication, "M1", "Paracetamol"),
        ]);
        store.insert_symptom_disease_edges([
            SymptomDiseaseEdge::new("S1", "D1"),
            SymptomDiseaseEdge::new("S2", "D1"),
        ]);
        store.insert_disease_medication_edges([DiseaseMedicationEdge::new("D1", "M1")]);

        let symptom_ids = store.resolve_ids(EntityKind::Symptom, &["Fever", "Cough"]);
        let predictions = store.predict_diseases(&symptom_ids);
        assert_eq!(predictions.len(), 1);
        assert_eq!(predictions[0].probability, 1.0);

        let medications = store.suggest_for_predictions(&predictions);
        assert_eq!(medications.len(), 1);
        assert_eq!(medications[0].id, id("M1"));
    }
}
