//! Fallback-table primitives.
//!
//! Normalizers describe each canonical field as an ordered list of [`Probe`]s.
//! The first probe that yields a present value wins.

use serde_json::Value;

use crate::EntityId;

/// One entry of a fallback chain.
#[derive(Debug, Clone, Copy)]
pub enum Probe {
    /// A single field addressed by a dotted path, e.g. `user.phone`.
    Field(&'static str),
    /// Several fields joined with a single space, skipping absent parts.
    Joined(&'static [&'static str]),
}

/// Resolve a dotted path inside a JSON value.
#[must_use]
pub fn lookup<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(record, |value, key| value.get(key))
}

/// Read a present text value at `path`.
///
/// Blank strings count as absent; numbers are rendered as text.
#[must_use]
pub fn text_at(record: &Value, path: &str) -> Option<String> {
    match lookup(record, path)? {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Evaluate one probe.
#[must_use]
pub fn probe(record: &Value, probe: Probe) -> Option<String> {
    match probe {
        Probe::Field(path) => text_at(record, path),
        Probe::Joined(paths) => {
            let parts: Vec<String> = paths.iter().filter_map(|p| text_at(record, p)).collect();
            (!parts.is_empty()).then(|| parts.join(" "))
        }
    }
}

/// First present value along `chain`.
#[must_use]
pub fn first_text(record: &Value, chain: &[Probe]) -> Option<String> {
    chain.iter().find_map(|p| probe(record, *p))
}

/// First resolvable id among `paths`.
#[must_use]
pub fn first_id(record: &Value, paths: &[&str]) -> Option<EntityId> {
    paths
        .iter()
        .find_map(|path| lookup(record, path).and_then(EntityId::from_value))
}

/// Resolve a record's identity, falling back to its 1-based `position`.
///
/// Returns the id and whether it is provisional. A record that already went
/// through this fallback keeps its `provisional_id` marker.
#[must_use]
pub fn identity(record: &Value, paths: &[&str], position: usize) -> (EntityId, bool) {
    match first_id(record, paths) {
        Some(id) => {
            let provisional = record
                .get("provisional_id")
                .and_then(Value::as_bool)
                .unwrap_or(false);
            (id, provisional)
        }
        None => (
            EntityId::Number(i64::try_from(position).unwrap_or(i64::MAX)),
            true,
        ),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn lookup_walks_nested_objects() {
        let v = json!({"user": {"phone": "555"}});
        assert_eq!(lookup(&v, "user.phone"), Some(&json!("555")));
        assert_eq!(lookup(&v, "user.email"), None);
        assert_eq!(lookup(&json!(null), "user.phone"), None);
    }

    #[test]
    fn joined_skips_absent_parts() {
        let v = json!({"first_name": "Ada", "last_name": ""});
        assert_eq!(
            probe(&v, Probe::Joined(&["first_name", "last_name"])).as_deref(),
            Some("Ada")
        );
        assert_eq!(probe(&json!({}), Probe::Joined(&["first_name", "last_name"])), None);
    }

    #[test]
    fn numbers_render_as_text() {
        assert_eq!(text_at(&json!({"phone": 5551234}), "phone").as_deref(), Some("5551234"));
        assert_eq!(text_at(&json!({"phone": true}), "phone"), None);
    }

    #[test]
    fn identity_falls_back_to_position() {
        assert_eq!(identity(&json!({}), &["id"], 4), (EntityId::Number(4), true));
        assert_eq!(identity(&json!({"id": 9}), &["id"], 4), (EntityId::Number(9), false));
        assert_eq!(
            identity(&json!({"id": 4, "provisional_id": true}), &["id"], 4),
            (EntityId::Number(4), true)
        );
    }
}
