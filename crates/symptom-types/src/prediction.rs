//! Disease prediction output type.

use crate::EntityId;

/// A candidate disease scored from a set of reported symptoms.
///
/// `probability` is a normalized match count, not a conditional
/// probability: the number of matching symptom→disease edges divided by the
/// number of reported symptoms. Duplicate edges in the reference data can
/// push it above 1.0.
///
/// # Examples
///
/// ```
/// use symptom_types::{DiseasePrediction, EntityId};
///
/// let prediction = DiseasePrediction {
///     disease_id: EntityId::from("D1"),
///     probability: 0.5,
///     match_count: 1,
///     supporting_symptoms: vec![EntityId::from("S1")],
/// };
/// assert_eq!(prediction.supporting_symptoms, [EntityId::from("S1")]);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiseasePrediction {
    /// The predicted disease.
    pub disease_id: EntityId,
    /// Matching edge count divided by the number of reported symptoms.
    pub probability: f64,
    /// Number of matching symptom→disease edges.
    pub match_count: usize,
    /// Distinct reported symptoms that matched, in first-match order.
    pub supporting_symptoms: Vec<EntityId>,
}
