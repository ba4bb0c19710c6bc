//! # staff-api
//!
//! HTTP access to the staffdesk backend.
//!
//! [`AuthenticatedClient`] attaches the current access token to every request,
//! and on a 401 exchanges the refresh token exactly once no matter how many
//! requests hit the expiry together, then replays the original request.
//! The crate also carries the endpoint table and leave request submission.

pub mod client;
pub mod endpoints;
pub mod error;
mod http;
pub mod leave;
mod refresh;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use client::AuthenticatedClient;
pub use endpoints::Endpoints;
pub use error::{ClientError, SubmitError};
pub use leave::{LeaveRequestDraft, submit_leave_request};
