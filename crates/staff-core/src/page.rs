//! The list-endpoint pagination envelope.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `{count, next, previous, results}` as returned by paginated list endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            count: 0,
            next: None,
            previous: None,
            results: Vec::new(),
        }
    }
}

impl Page<Value> {
    /// Interpret a raw response body as a page.
    ///
    /// A bare array becomes a single page with `count = len` and no cursors.
    /// An envelope missing `count` falls back to the number of results. Any
    /// other shape (including the empty body of a 204) is an empty page.
    #[must_use]
    pub fn from_value(body: Value) -> Self {
        match body {
            Value::Array(results) => Self {
                count: results.len() as u64,
                next: None,
                previous: None,
                results,
            },
            Value::Object(mut map) => {
                let results = match map.remove("results") {
                    Some(Value::Array(items)) => items,
                    _ => Vec::new(),
                };
                let count = map
                    .get("count")
                    .and_then(Value::as_u64)
                    .unwrap_or(results.len() as u64);
                Self {
                    count,
                    next: cursor(map.get("next")),
                    previous: cursor(map.get("previous")),
                    results,
                }
            }
            _ => Self::default(),
        }
    }
}

impl<T> Page<T> {
    /// Map the results while keeping count and cursors.
    pub fn map<U>(self, f: impl FnOnce(Vec<T>) -> Vec<U>) -> Page<U> {
        Page {
            count: self.count,
            next: self.next,
            previous: self.previous,
            results: f(self.results),
        }
    }

    /// `ceil(count / page_size)`, with a floor of one page.
    #[must_use]
    pub fn total_pages(&self, page_size: u64) -> u64 {
        if page_size == 0 {
            return 1;
        }
        self.count.div_ceil(page_size).max(1)
    }
}

fn cursor(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn envelope_is_read_as_is() {
        let page = Page::from_value(json!({
            "count": 95,
            "next": "http://api/employees/?limit=10&offset=10",
            "previous": null,
            "results": [{"id": 1}, {"id": 2}]
        }));
        assert_eq!(page.count, 95);
        assert_eq!(
            page.next.as_deref(),
            Some("http://api/employees/?limit=10&offset=10")
        );
        assert_eq!(page.previous, None);
        assert_eq!(page.results.len(), 2);
        assert_eq!(page.total_pages(10), 10);
    }

    #[test]
    fn bare_array_becomes_single_page() {
        let page = Page::from_value(json!([{"id": 1}, {"id": 2}, {"id": 3}]));
        assert_eq!(page.count, 3);
        assert_eq!(page.next, None);
        assert_eq!(page.previous, None);
        assert_eq!(page.results.len(), 3);
    }

    #[test]
    fn missing_count_uses_result_length() {
        let page = Page::from_value(json!({"results": [{"id": 1}]}));
        assert_eq!(page.count, 1);
    }

    #[test]
    fn unexpected_shapes_are_empty() {
        assert_eq!(Page::from_value(Value::Null), Page::default());
        assert_eq!(Page::from_value(json!("oops")), Page::default());
        assert_eq!(Page::from_value(json!({"detail": "x"})).results.len(), 0);
    }

    #[test]
    fn total_pages_has_floor_of_one() {
        let empty: Page<Value> = Page::default();
        assert_eq!(empty.total_pages(10), 1);
        let page = Page::<Value> {
            count: 100,
            ..Page::default()
        };
        assert_eq!(page.total_pages(10), 10);
        assert_eq!(page.total_pages(0), 1);
    }

    #[test]
    fn empty_cursor_strings_are_absent() {
        let page = Page::from_value(json!({"count": 1, "next": "", "results": []}));
        assert_eq!(page.next, None);
    }
}
