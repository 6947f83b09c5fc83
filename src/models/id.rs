// src/models/id.rs

use std::fmt;

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, Visitor},
};

/// Identifier of a question or choice.
///
/// Ids reach us as JSON strings from some clients and as numbers from others.
/// Every id is normalized to its canonical string form on the way in, so `5`
/// and `"5"` compare equal and hash to the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for EntityId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<i64> for EntityId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl Serialize for EntityId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

struct EntityIdVisitor;

impl<'de> Visitor<'de> for EntityIdVisitor {
    type Value = EntityId;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a string or numeric identifier")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(EntityId::from(v))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(EntityId(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(EntityId(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(EntityId(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        // 5.0 must match "5"
        if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 {
            Ok(EntityId(format!("{}", v as i64)))
        } else {
            Ok(EntityId(v.to_string()))
        }
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(EntityIdVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_and_string_ids_are_equal() {
        let from_number: EntityId = serde_json::from_str("5").unwrap();
        let from_string: EntityId = serde_json::from_str("\"5\"").unwrap();
        assert_eq!(from_number, from_string);
        assert_eq!(from_number, EntityId::from(5));
    }

    #[test]
    fn test_integral_float_drops_fraction() {
        let id: EntityId = serde_json::from_str("7.0").unwrap();
        assert_eq!(id.as_str(), "7");

        let id: EntityId = serde_json::from_str("7.5").unwrap();
        assert_eq!(id.as_str(), "7.5");
    }

    #[test]
    fn test_serializes_as_string() {
        let json = serde_json::to_string(&EntityId::from(42)).unwrap();
        assert_eq!(json, "\"42\"");
    }

    #[test]
    fn test_rejects_non_scalar() {
        assert!(serde_json::from_str::<EntityId>("[1]").is_err());
        assert!(serde_json::from_str::<EntityId>("true").is_err());
    }

    #[test]
    fn test_nullable_id() {
        let id: Option<EntityId> = serde_json::from_str("null").unwrap();
        assert!(id.is_none());
    }
}
