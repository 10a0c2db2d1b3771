//! Entity identifier type.
//!
//! Reference tables key their records either by integer or by string
//! identifiers. [`EntityId`] holds both forms and normalizes canonical
//! decimal strings to integers so `"12"` and `12` name the same entity.

use std::fmt;

/// Identifier of a reference-data entity.
///
/// # Examples
///
/// ```
/// use symptom_types::EntityId;
///
/// assert_eq!(EntityId::parse("12"), Some(EntityId::Int(12)));
/// assert_eq!(EntityId::parse("S1"), Some(EntityId::Text("S1".to_string())));
/// assert_eq!(EntityId::parse("   "), None);
/// assert_eq!(EntityId::from("12"), EntityId::from(12u64));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged, from = "RawEntityId")
)]
pub enum EntityId {
    /// Integer identifier.
    Int(u64),
    /// Free-form string identifier.
    Text(String),
}

impl EntityId {
    /// Parses an identifier from a text field.
    ///
    /// Surrounding whitespace is ignored. Returns `None` for blank input.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        Some(Self::from(value))
    }
}

impl From<u64> for EntityId {
    fn from(id: u64) -> Self {
        Self::Int(id)
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        // Only canonical decimals collapse to Int, so "007" keeps its spelling.
        match value.parse::<u64>() {
            Ok(id) if id.to_string() == value => Self::Int(id),
            _ => Self::Text(value.to_string()),
        }
    }
}

impl From<String> for EntityId {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(id) => write!(f, "{}", id),
            Self::Text(id) => f.write_str(id),
        }
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum RawEntityId {
    Int(u64),
    Text(String),
}

#[cfg(feature = "serde")]
impl From<RawEntityId> for EntityId {
    fn from(raw: RawEntityId) -> Self {
        match raw {
            RawEntityId::Int(id) => Self::Int(id),
            RawEntityId::Text(text) => Self::from(text),
        }
    }
}
