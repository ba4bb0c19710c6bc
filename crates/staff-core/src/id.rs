use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifier of a backend record.
///
/// The backend mixes integer ids and numeric strings across endpoints, so
/// numeric strings are folded into [`EntityId::Number`] to keep joins by
/// foreign key working.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Number(i64),
    Text(String),
}

impl EntityId {
    /// Read an id from a JSON value.
    ///
    /// Accepts integers, integral floats, non-blank strings, and reference
    /// objects of the form `{"id": ..}` or `{"user": {"id": ..}}`.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| {
                    n.as_f64()
                        .filter(|f| f.fract() == 0.0 && f.abs() < 9.0e15)
                        .map(|f| f as i64)
                })
                .map(Self::Number),
            Value::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else if let Ok(n) = trimmed.parse::<i64>() {
                    Some(Self::Number(n))
                } else {
                    Some(Self::Text(trimmed.to_string()))
                }
            }
            Value::Object(map) => map
                .get("id")
                .and_then(Self::from_value)
                .or_else(|| map.get("user").and_then(|u| u.get("id")).and_then(Self::from_value)),
            _ => None,
        }
    }

    /// Path segment form used when building nested resource URLs.
    #[must_use]
    pub fn as_path_segment(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for EntityId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn numeric_strings_fold_into_numbers() {
        assert_eq!(EntityId::from_value(&json!("42")), Some(EntityId::Number(42)));
        assert_eq!(EntityId::from_value(&json!(42)), Some(EntityId::Number(42)));
        assert_eq!(EntityId::from_value(&json!(42.0)), Some(EntityId::Number(42)));
    }

    #[test]
    fn text_ids_are_trimmed() {
        assert_eq!(
            EntityId::from_value(&json!("  emp-7 ")),
            Some(EntityId::Text("emp-7".into()))
        );
    }

    #[test]
    fn blank_and_null_are_absent() {
        assert_eq!(EntityId::from_value(&json!("   ")), None);
        assert_eq!(EntityId::from_value(&Value::Null), None);
        assert_eq!(EntityId::from_value(&json!(true)), None);
    }

    #[test]
    fn reference_objects_resolve_to_their_id() {
        assert_eq!(
            EntityId::from_value(&json!({"id": 3, "name": "Ada"})),
            Some(EntityId::Number(3))
        );
        assert_eq!(
            EntityId::from_value(&json!({"user": {"id": "9"}})),
            Some(EntityId::Number(9))
        );
    }

    #[test]
    fn serializes_untagged() {
        assert_eq!(serde_json::to_value(EntityId::Number(5)).unwrap(), json!(5));
        assert_eq!(
            serde_json::to_value(EntityId::Text("x".into())).unwrap(),
            json!("x")
        );
    }
}
