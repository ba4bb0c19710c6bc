//! Downgraded secondary failures.

use std::fmt;

use serde::Serialize;
use serde_json::Value;
use staff_core::Page;

/// A non-critical fetch that failed and was replaced with empty or default data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartialDataWarning {
    /// What was being fetched, e.g. `departments` or `tasks of project 7`.
    pub resource: String,
    pub reason: String,
}

impl fmt::Display for PartialDataWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.resource, self.reason)
    }
}

/// Unwrap a list response into its records, or record a warning and yield none.
pub(crate) fn records_or_warn<E: fmt::Display>(
    resource: &str,
    result: Result<Value, E>,
    warnings: &mut Vec<PartialDataWarning>,
) -> Vec<Value> {
    match result {
        Ok(body) => Page::from_value(body).results,
        Err(e) => {
            tracing::warn!(resource, %e, "fetch failed; continuing without it");
            warnings.push(PartialDataWarning {
                resource: resource.to_string(),
                reason: e.to_string(),
            });
            Vec::new()
        }
    }
}
