//! Display name to identifier resolution.

use symptom_types::{EntityId, EntityKind, Named};

use crate::store::ReferenceStore;

/// Resolves display names to identifiers.
///
/// Output follows input order. Names with no matching record are dropped.
/// A name shared by several records resolves to all of their identifiers,
/// in table order; choosing between them is left to the caller.
///
/// # Examples
///
/// ```
/// use symptom_loader::resolve_ids;
/// use symptom_types::{Entity, EntityId, EntityKind};
///
/// let symptoms = [
///     Entity::new(EntityKind::Symptom, 1u64, "Fever"),
///     Entity::new(EntityKind::Symptom, 2u64, "Cough"),
/// ];
///
/// let ids = resolve_ids(&["Cough", "Sneezing", "Fever"], &symptoms);
/// assert_eq!(ids, vec![EntityId::Int(2), EntityId::Int(1)]);
/// ```
pub fn resolve_ids<S, T>(names: &[S], records: &[T]) -> Vec<EntityId>
where
    S: AsRef<str>,
    T: Named,
{
    names
        .iter()
        .flat_map(move |name| {
            let name = name.as_ref();
            records
                .iter()
                .filter(move |record| record.name() == name)
                .map(|record| record.id().clone())
        })
        .collect()
}

impl ReferenceStore {
    /// Resolves display names against one entity table.
    pub fn resolve_ids<S: AsRef<str>>(&self, kind: EntityKind, names: &[S]) -> Vec<EntityId> {
        resolve_ids(names, self.entities(kind))
    }

    /// Returns the names that do not match any entity of `kind`.
    pub fn unresolved_names<'a, S: AsRef<str>>(
        &self,
        kind: EntityKind,
        names: &'a [S],
    ) -> Vec<&'a str> {
        let entities = self.entities(kind);
        names
            .iter()
            .map(|name| name.as_ref())
            .filter(|name| !entities.iter().any(|entity| entity.is_named(name)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use symptom_types::Entity;

    fn symptoms() -> Vec<Entity> {
        vec![
            Entity::new(EntityKind::Symptom, "S1", "Fever"),
            Entity::new(EntityKind::Symptom, "S2", "Cough"),
            Entity::new(EntityKind::Symptom, "S3", "Headache"),
        ]
    }

    #[test]
    fn test_resolve_empty() {
        let names: [&str; 0] = [];
        assert!(resolve_ids(&names, &symptoms()).is_empty());
    }

    #[test]
    fn test_resolve_preserves_input_order() {
        let ids = resolve_ids(&["Headache", "Fever", "Cough"], &symptoms());
        assert_eq!(
            ids,
            vec![EntityId::from("S3"), EntityId::from("S1"), EntityId::from("S2")]
        );
    }

    #[test]
    fn test_resolve_drops_unknown_names() {
        let names = vec!["Fever".to_string(), "fever".to_string(), "Rash".to_string()];
        assert_eq!(resolve_ids(&names, &symptoms()), vec![EntityId::from("S1")]);
    }

    #[test]
    fn test_resolve_ambiguous_name_returns_all() {
        let mut records = symptoms();
        records.push(Entity::new(EntityKind::Symptom, "S9", "Fever"));

        let ids = resolve_ids(&["Fever"], &records);
        assert_eq!(ids, vec![EntityId::from("S1"), EntityId::from("S9")]);
    }

    #[test]
    fn test_resolve_repeated_name() {
        let ids = resolve_ids(&["Cough", "Cough"], &symptoms());
        assert_eq!(ids, vec![EntityId::from("S2"), EntityId::from("S2")]);
    }

    #[test]
    fn test_store_resolution() {
        let mut store = ReferenceStore::new();
        store.insert_entities(symptoms());
        store.insert_entities([Entity::new(EntityKind::Allergy, "A1", "Fever")]);

        assert_eq!(
            store.resolve_ids(EntityKind::Symptom, &["Cough"]),
            vec![EntityId::from("S2")]
        );
        assert_eq!(
            store.resolve_ids(EntityKind::Allergy, &["Fever"]),
            vec![EntityId::from("A1")]
        );
        assert_eq!(
            store.unresolved_names(EntityKind::Symptom, &["Cough", "Rash"]),
            vec!["Rash"]
        );
    }
}
