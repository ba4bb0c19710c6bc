//! Process-wide holder of the current [`Session`].
//!
//! A `TokenStore` is created once and handed to every component that needs
//! credentials. Clones share the same slot, so a refresh performed through
//! one handle is observed by all of them.

use std::sync::{Arc, PoisonError, RwLock};

use crate::session::Session;

#[derive(Debug, Clone, Default)]
pub struct TokenStore {
    slot: Arc<RwLock<Option<Session>>>,
}

impl TokenStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that starts signed in.
    #[must_use]
    pub fn with_session(session: Session) -> Self {
        let store = Self::new();
        store.set(session);
        store
    }

    /// Snapshot of the current session.
    #[must_use]
    pub fn get(&self) -> Option<Session> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the current session.
    ///
    /// A session with an empty access token is never active, so setting one
    /// clears the store instead.
    pub fn set(&self, session: Session) {
        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        if session.access_token.trim().is_empty() {
            tracing::warn!("refusing to store a session without an access token; clearing");
            *slot = None;
        } else {
            *slot = Some(session);
        }
    }

    pub fn clear(&self) {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Install a refreshed access token (and a rotated refresh token, if the
    /// backend issued one) into the current session.
    ///
    /// Returns `false` when there is no session to update or `access` is empty.
    pub fn replace_credentials(&self, access: &str, refresh: Option<&str>) -> bool {
        if access.trim().is_empty() {
            return false;
        }
        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        match slot.as_mut() {
            Some(session) => {
                session.access_token = access.to_string();
                if let Some(refresh) = refresh.filter(|r| !r.trim().is_empty()) {
                    session.refresh_token = Some(refresh.to_string());
                }
                true
            }
            None => false,
        }
    }
}
