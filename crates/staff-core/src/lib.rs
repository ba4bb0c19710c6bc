//! # staff-core
//!
//! Core types shared by every staffdesk crate:
//! - Canonical entity records (employees, projects, tasks, leave requests, departments)
//! - [`EntityId`] with numeric/text reconciliation for client-side joins
//! - The entity normalizer, which maps the backend's inconsistent payload shapes
//!   onto the canonical records through ordered fallback tables
//! - The `{count, next, previous, results}` pagination envelope
//! - [`FieldErrors`], the backend's per-field validation error object

pub mod entities;
pub mod field_errors;
pub mod id;
pub mod normalize;
pub mod page;

pub use entities::{Department, Employee, LeaveRequest, MemberRef, Project, Task};
pub use field_errors::FieldErrors;
pub use id::EntityId;
pub use page::Page;
