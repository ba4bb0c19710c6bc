//! # staff-dashboard
//!
//! Composite views built on top of [`staff_api::AuthenticatedClient`]:
//!
//! - [`AggregationEngine`]: the admin dashboard. Parallel top-level fetches,
//!   a bounded per-project task fan-out, client-side joins, and derived
//!   summary fields. Secondary failures degrade to empty data plus a
//!   [`PartialDataWarning`].
//! - [`EmployeeWorkspace`]: the signed-in employee's projects and their
//!   high-priority tasks.
//! - [`PaginatedListController`]: a searchable, sortable, server-paginated
//!   collection with debounced search.
//! - [`table`]: stable client-side sorting of already-fetched rows.

pub mod directory;
pub mod engine;
pub mod error;
mod fanout;
pub mod table;
pub mod warning;
pub mod workspace;

pub use directory::{PageState, PaginatedListController};
pub use engine::{AggregationEngine, DashboardView};
pub use error::DashboardError;
pub use table::SortDirection;
pub use warning::PartialDataWarning;
pub use workspace::{EmployeeView, EmployeeWorkspace};
