//! Reference-data entity type.

use crate::{EntityId, EntityKind};

/// A reference-data record: a symptom, disease, medication, allergy,
/// lifestyle factor or medical condition.
///
/// Entities are loaded once and never mutated.
///
/// # Examples
///
/// ```
/// use symptom_types::{Entity, EntityKind};
///
/// let fever = Entity::new(EntityKind::Symptom, 1u64, "Fever");
/// assert_eq!(fever.id.to_string(), "1");
/// assert!(fever.is_named("Fever"));
/// assert!(!fever.is_named("fever"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entity {
    /// Which table this entity belongs to.
    pub kind: EntityKind,
    /// Stable identifier, unique within the kind.
    pub id: EntityId,
    /// Display name shown to users and used for name resolution.
    pub name: String,
}

impl Entity {
    /// Creates a new entity.
    pub fn new(kind: EntityKind, id: impl Into<EntityId>, name: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
            name: name.into(),
        }
    }

    /// Returns true if the display name matches exactly.
    pub fn is_named(&self, name: &str) -> bool {
        self.name == name
    }
}

/// Anything with an identifier and a display name.
///
/// Name resolution works over any slice of `Named` records, so callers can
/// resolve against their own record types as well as [`Entity`].
pub trait Named {
    /// The record's identifier.
    fn id(&self) -> &EntityId;
    /// The record's display name.
    fn name(&self) -> &str;
}

impl Named for Entity {
    fn id(&self) -> &EntityId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}
