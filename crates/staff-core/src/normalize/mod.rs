//! Entity normalizer.
//!
//! One total function per entity kind maps an arbitrary backend payload onto
//! its canonical record. Missing fields resolve through ordered fallback
//! tables and end in a literal default, so no input shape makes these fail.
//! Each function is idempotent: normalizing a serialized canonical record at
//! the same position yields the same record.

mod department;
mod employee;
mod leave;
pub mod probe;
mod project;
mod task;

use serde_json::Value;

pub use department::department;
pub use employee::{UNKNOWN_EMPLOYEE, UNKNOWN_PHONE, employee};
pub use leave::leave_request;
pub use project::{member_ref, project};
pub use task::task;

/// Normalize a whole collection, giving each record its 1-based position for
/// the identity fallback.
pub fn collection<T>(raw: &[Value], normalize: impl Fn(&Value, usize) -> T) -> Vec<T> {
    raw.iter()
        .enumerate()
        .map(|(idx, record)| normalize(record, idx + 1))
        .collect()
}
