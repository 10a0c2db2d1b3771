//! Symptom → disease scoring.
//!
//! Scores are normalized match counts: for each reported symptom, every
//! symptom→disease edge leaving it adds one to the disease's count, and the
//! count is divided by the number of reported symptoms. Repeated symptoms and
//! repeated edges both count every time they occur.

use std::collections::HashMap;

use symptom_types::{DiseasePrediction, EntityId};

use crate::store::ReferenceStore;

impl ReferenceStore {
    /// Scores candidate diseases for a list of reported symptom IDs.
    ///
    /// Predictions come back in the order their diseases were first matched.
    /// An empty input yields an empty result. Symptom IDs with no edges
    /// contribute nothing but still count toward the denominator.
    ///
    /// # Examples
    ///
    /// ```
    /// use symptom_loader::ReferenceStore;
    /// use symptom_types::{EntityId, SymptomDiseaseEdge};
    ///
    /// let mut store = ReferenceStore::new();
    /// store.insert_symptom_disease_edges([
    ///     SymptomDiseaseEdge::new("S1", "D1"),
    ///     SymptomDiseaseEdge::new("S2", "D1"),
    ///     SymptomDiseaseEdge::new("S2", "D2"),
    /// ]);
    ///
    /// let predictions = store.predict_diseases(&[EntityId::from("S1"), EntityId::from("S2")]);
    /// assert_eq!(predictions.len(), 2);
    /// assert_eq!(predictions[0].probability, 1.0);
    /// assert_eq!(predictions[1].probability, 0.5);
    /// ```
    pub fn predict_diseases(&self, symptom_ids: &[EntityId]) -> Vec<DiseasePrediction> {
        if symptom_ids.is_empty() {
            tracing::debug!("No symptoms supplied; nothing to predict");
            return Vec::new();
        }

        let mut predictions: Vec<DiseasePrediction> = Vec::new();
        let mut positions: HashMap<&EntityId, usize> = HashMap::new();

        for symptom_id in symptom_ids {
            for disease_id in self.diseases_for_symptom(symptom_id) {
                let position = *positions.entry(disease_id).or_insert_with(|| {
                    predictions.push(DiseasePrediction {
                        disease_id: disease_id.clone(),
                        probability: 0.0,
                        match_count: 0,
                        supporting_symptoms: Vec::new(),
                    });
                    predictions.len() - 1
                });

                let prediction = &mut predictions[position];
                prediction.match_count += 1;
                if !prediction.supporting_symptoms.contains(symptom_id) {
                    prediction.supporting_symptoms.push(symptom_id.clone());
                }
            }
        }

        let total = symptom_ids.len() as f64;
        for prediction in &mut predictions {
            prediction.probability = prediction.match_count as f64 / total;
        }

        tracing::debug!(
            "Scored {} candidate diseases from {} symptoms",
            predictions.len(),
            symptom_ids.len()
        );

        predictions
    }
}
