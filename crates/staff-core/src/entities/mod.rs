//! Canonical entity records.
//!
//! Every record is produced by [`crate::normalize`]. Field names double as the
//! first entry of each normalizer fallback chain, so a serialized record
//! normalizes back to itself.

pub mod department;
pub mod employee;
pub mod leave;
pub mod project;
pub mod task;

pub use department::Department;
pub use employee::Employee;
pub use leave::LeaveRequest;
pub use project::{MemberRef, Project};
pub use task::Task;

#[allow(clippy::trivially_copy_pass_by_ref)]
pub(crate) const fn is_false(value: &bool) -> bool {
    !*value
}
