//! Client-side sorting of already-fetched rows.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use staff_core::normalize::probe::lookup;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Prefix for the `ordering` query parameter.
    #[must_use]
    pub const fn ordering_prefix(self) -> &'static str {
        match self {
            Self::Asc => "",
            Self::Desc => "-",
        }
    }
}

/// Header-click rule: the same field flips direction, a new field starts ascending.
#[must_use]
pub fn toggle(current_field: &str, current: SortDirection, clicked: &str) -> (String, SortDirection) {
    if current_field == clicked {
        (clicked.to_string(), current.flipped())
    } else {
        (clicked.to_string(), SortDirection::Asc)
    }
}

#[derive(Debug, PartialEq, PartialOrd)]
enum Key<'a> {
    Missing,
    Number(f64),
    Text(&'a str),
    Other(String),
}

fn key(value: Option<&Value>) -> Key<'_> {
    match value {
        None | Some(Value::Null) => Key::Missing,
        Some(Value::Bool(b)) => Key::Number(if *b { 1.0 } else { 0.0 }),
        Some(Value::Number(n)) => n.as_f64().map_or(Key::Missing, Key::Number),
        Some(Value::String(s)) => Key::Text(s),
        Some(other) => Key::Other(other.to_string()),
    }
}

/// Compare two cells. Missing and null cells are equal to each other and
/// less than anything else; booleans compare as 1/0.
#[must_use]
pub fn compare_cells(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (key(a), key(b)) {
        (Key::Number(x), Key::Number(y)) => x.total_cmp(&y),
        (ka, kb) => ka.partial_cmp(&kb).unwrap_or(Ordering::Equal),
    }
}

/// Stable sort of JSON rows by `field` (dotted paths allowed).
pub fn sort_rows(rows: &mut [Value], field: &str, direction: SortDirection) {
    rows.sort_by(|a, b| {
        let ord = compare_cells(lookup(a, field), lookup(b, field));
        match direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
}
