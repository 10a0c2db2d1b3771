//! Per-session selection sets.
//!
//! A [`SelectionSet`] accumulates the display names a user has picked in each
//! category. It is owned by the caller and passed into each check; the
//! inference core never keeps it.

use crate::EntityKind;

/// A category of user selections.
///
/// Food and medicine allergies are separate categories that both draw their
/// vocabulary from the allergy table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SelectionCategory {
    /// Reported symptoms.
    Symptoms,
    /// Food allergies.
    FoodAllergies,
    /// Medicine allergies.
    MedicineAllergies,
    /// Lifestyle factors.
    LifestyleFactors,
    /// Prior medical conditions.
    MedicalConditions,
}

impl SelectionCategory {
    /// All categories, in form order.
    pub const ALL: [SelectionCategory; 5] = [
        SelectionCategory::Symptoms,
        SelectionCategory::FoodAllergies,
        SelectionCategory::MedicineAllergies,
        SelectionCategory::LifestyleFactors,
        SelectionCategory::MedicalConditions,
    ];

    /// The entity table this category's vocabulary comes from.
    pub fn entity_kind(self) -> EntityKind {
        match self {
            Self::Symptoms => EntityKind::Symptom,
            Self::FoodAllergies | Self::MedicineAllergies => EntityKind::Allergy,
            Self::LifestyleFactors => EntityKind::LifestyleFactor,
            Self::MedicalConditions => EntityKind::MedicalCondition,
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Symptoms => "Symptoms",
            Self::FoodAllergies => "Food Allergies",
            Self::MedicineAllergies => "Medicine Allergies",
            Self::LifestyleFactors => "Lifestyle Factors",
            Self::MedicalConditions => "Medical Conditions",
        }
    }
}

/// Ordered, de-duplicated display names per selection category.
///
/// # Examples
///
/// ```
/// use symptom_types::{SelectionCategory, SelectionSet};
///
/// let mut selections = SelectionSet::new();
/// assert!(selections.add(SelectionCategory::Symptoms, "Fever"));
/// assert!(selections.add(SelectionCategory::Symptoms, "Cough"));
/// assert!(!selections.add(SelectionCategory::Symptoms, "Fever"));
///
/// assert_eq!(selections.names(SelectionCategory::Symptoms), ["Fever", "Cough"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SelectionSet {
    /// Selected symptom names.
    pub symptoms: Vec<String>,
    /// Selected food allergy names.
    pub food_allergies: Vec<String>,
    /// Selected medicine allergy names.
    pub medicine_allergies: Vec<String>,
    /// Selected lifestyle factor names.
    pub lifestyle_factors: Vec<String>,
    /// Selected medical condition names.
    pub medical_conditions: Vec<String>,
}

impl SelectionSet {
    /// Creates an empty selection set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the names selected in a category, in insertion order.
    pub fn names(&self, category: SelectionCategory) -> &[String] {
        match category {
            SelectionCategory::Symptoms => &self.symptoms,
            SelectionCategory::FoodAllergies => &self.food_allergies,
            SelectionCategory::MedicineAllergies => &self.medicine_allergies,
            SelectionCategory::LifestyleFactors => &self.lifestyle_factors,
            SelectionCategory::MedicalConditions => &self.medical_conditions,
        }
    }

    fn names_mut(&mut self, category: SelectionCategory) -> &mut Vec<String> {
        match category {
            SelectionCategory::Symptoms => &mut self.symptoms,
            SelectionCategory::FoodAllergies => &mut self.food_allergies,
            SelectionCategory::MedicineAllergies => &mut self.medicine_allergies,
            SelectionCategory::LifestyleFactors => &mut self.lifestyle_factors,
            SelectionCategory::MedicalConditions => &mut self.medical_conditions,
        }
    }

    /// Adds a name to a category.
    ///
    /// Returns false if the name was already selected.
    pub fn add(&mut self, category: SelectionCategory, name: impl Into<String>) -> bool {
        let name = name.into();
        let names = self.names_mut(category);
        if names.contains(&name) {
            return false;
        }
        names.push(name);
        true
    }

    /// Adds a name only if it appears in the given vocabulary.
    ///
    /// Returns false if the name is unknown or already selected.
    pub fn add_from_vocabulary<'a, I>(
        &mut self,
        category: SelectionCategory,
        name: &str,
        vocabulary: I,
    ) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        if !vocabulary.into_iter().any(|known| known == name) {
            return false;
        }
        self.add(category, name)
    }

    /// Removes a name from a category. Returns true if it was present.
    pub fn remove(&mut self, category: SelectionCategory, name: &str) -> bool {
        let names = self.names_mut(category);
        let before = names.len();
        names.retain(|n| n != name);
        names.len() != before
    }

    /// Clears one category.
    pub fn clear(&mut self, category: SelectionCategory) {
        self.names_mut(category).clear();
    }

    /// Total number of selections across all categories.
    pub fn len(&self) -> usize {
        SelectionCategory::ALL
            .iter()
            .map(|c| self.names(*c).len())
            .sum()
    }

    /// Returns true if nothing has been selected.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops repeated names in every category, keeping first occurrences.
    ///
    /// Useful after deserializing a set that was assembled elsewhere.
    pub fn dedup(&mut self) {
        for category in SelectionCategory::ALL {
            let names = self.names_mut(category);
            let mut seen = Vec::with_capacity(names.len());
            names.retain(|name| {
                if seen.contains(name) {
                    false
                } else {
                    seen.push(name.clone());
                    true
                }
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allergy_categories_share_vocabulary() {
        assert_eq!(
            SelectionCategory::FoodAllergies.entity_kind(),
            SelectionCategory::MedicineAllergies.entity_kind()
        );
        assert_eq!(
            SelectionCategory::Symptoms.entity_kind(),
            EntityKind::Symptom
        );
    }

    #[test]
    fn test_add_from_vocabulary() {
        let vocabulary = ["Peanuts", "Penicillin"];
        let mut selections = SelectionSet::new();

        assert!(selections.add_from_vocabulary(
            SelectionCategory::FoodAllergies,
            "Peanuts",
            vocabulary
        ));
        assert!(!selections.add_from_vocabulary(
            SelectionCategory::FoodAllergies,
            "Shellfish",
            vocabulary
        ));
        assert_eq!(selections.food_allergies, vec!["Peanuts"]);
        assert!(selections.medicine_allergies.is_empty());
    }

    #[test]
    fn test_remove_and_clear() {
        let mut selections = SelectionSet::new();
        selections.add(SelectionCategory::LifestyleFactors, "Smoking");
        selections.add(SelectionCategory::LifestyleFactors, "Sedentary");
        selections.add(SelectionCategory::MedicalConditions, "Asthma");
        assert_eq!(selections.len(), 3);

        assert!(selections.remove(SelectionCategory::LifestyleFactors, "Smoking"));
        assert!(!selections.remove(SelectionCategory::LifestyleFactors, "Smoking"));
        assert_eq!(selections.lifestyle_factors, vec!["Sedentary"]);

        selections.clear(SelectionCategory::LifestyleFactors);
        selections.clear(SelectionCategory::MedicalConditions);
        assert!(selections.is_empty());
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let mut selections = SelectionSet {
            symptoms: vec!["Cough".into(), "Fever".into(), "Cough".into()],
            ..Default::default()
        };
        selections.dedup();
        assert_eq!(selections.symptoms, vec!["Cough", "Fever"]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_partial_json_uses_defaults() {
        let selections: SelectionSet =
            serde_json::from_str(r#"{"symptoms": ["Fever"]}"#).unwrap();
        assert_eq!(selections.symptoms, vec!["Fever"]);
        assert!(selections.food_allergies.is_empty());
    }
}
