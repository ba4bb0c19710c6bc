//! Structured per-field validation errors returned by the backend.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The backend's validation error object, kept exactly as received.
///
/// Typical shape: `{"email": ["already taken"], "non_field_errors": ["..."]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(pub Map<String, Value>);

impl FieldErrors {
    /// Parse a response body. Only JSON objects qualify.
    #[must_use]
    pub fn from_body(body: &str) -> Option<Self> {
        match serde_json::from_str::<Value>(body).ok()? {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// First message for `field`, whether the backend sent a string or a list.
    #[must_use]
    pub fn first(&self, field: &str) -> Option<&str> {
        match self.0.get(field)? {
            Value::String(s) => Some(s.as_str()),
            Value::Array(items) => items.iter().find_map(Value::as_str),
            _ => None,
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for field in self.fields() {
            if !first {
                f.write_str("; ")?;
            }
            first = false;
            match self.first(field) {
                Some(message) => write!(f, "{field}: {message}")?,
                None => write!(f, "{field}: {}", self.0[field])?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_object_bodies_only() {
        assert!(FieldErrors::from_body(r#"{"email": ["taken"]}"#).is_some());
        assert!(FieldErrors::from_body("[1,2]").is_none());
        assert!(FieldErrors::from_body("<html>").is_none());
    }

    #[test]
    fn first_reads_lists_and_strings() {
        let errors =
            FieldErrors::from_body(r#"{"email": ["taken", "invalid"], "detail": "nope"}"#).unwrap();
        assert_eq!(errors.first("email"), Some("taken"));
        assert_eq!(errors.first("detail"), Some("nope"));
        assert_eq!(errors.first("phone"), None);
    }

    #[test]
    fn display_lists_each_field() {
        let errors = FieldErrors::from_body(r#"{"email": ["taken"]}"#).unwrap();
        assert_eq!(errors.to_string(), "email: taken");
    }
}
