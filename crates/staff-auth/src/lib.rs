//! # staff-auth
//!
//! Session lifecycle for staffdesk.
//!
//! Provides the [`Session`] record and role routing, the shared in-memory
//! [`TokenStore`], JSON-file persistence of the session between runs, unverified
//! JWT claim decoding, and the login/signup flows.

pub mod claims;
pub mod error;
pub mod login;
pub mod session;
pub mod session_file;
pub mod token_store;

use std::path::Path;

pub use error::AuthError;
pub use login::{LoginOutcome, SignupRequest};
pub use session::{DashboardRoute, Role, Session};
pub use token_store::TokenStore;

/// Restore a persisted session into a fresh store.
#[must_use]
pub fn restore(path: &Path) -> TokenStore {
    session_file::load(path).map_or_else(TokenStore::new, TokenStore::with_session)
}

/// Clear the in-memory session and its persisted copy.
///
/// # Errors
///
/// Returns `AuthError::SessionStore` if the session file cannot be removed.
pub fn logout(store: &TokenStore, path: &Path) -> Result<(), AuthError> {
    store.clear();
    session_file::delete(path)
}
