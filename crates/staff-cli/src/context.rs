//! Per-invocation state: configuration, the restored session, and the client.

use std::path::PathBuf;

use anyhow::Context;
use staff_api::{AuthenticatedClient, ClientError, SubmitError};
use staff_auth::{Session, TokenStore, session_file};
use staff_config::StaffConfig;
use staff_dashboard::DashboardError;

pub struct AppContext {
    pub config: StaffConfig,
    pub session_path: PathBuf,
    pub client: AuthenticatedClient,
}

impl AppContext {
    pub fn init(config: StaffConfig) -> anyhow::Result<Self> {
        let session_path = config.session.resolved_path().context(
            "cannot locate the session file; set STAFFDESK_SESSION__CREDENTIALS_PATH",
        )?;
        let tokens = staff_auth::restore(&session_path);
        let client = AuthenticatedClient::from_config(&config.api, tokens)
            .context("failed to build HTTP client")?;
        Ok(Self {
            config,
            session_path,
            client,
        })
    }

    pub fn tokens(&self) -> &TokenStore {
        self.client.tokens()
    }

    pub fn require_session(&self) -> anyhow::Result<Session> {
        self.tokens()
            .get()
            .context("not signed in; run `staffdesk auth login`")
    }

    /// Persist whatever the session became during the command: refreshed
    /// tokens are saved, and a session that could not be refreshed is removed.
    pub fn finish(&self, result: &anyhow::Result<()>) -> anyhow::Result<()> {
        if result.as_ref().is_err_and(session_lost) {
            tracing::info!("session expired; clearing stored credentials");
            return staff_auth::logout(self.tokens(), &self.session_path)
                .context("failed to clear expired session");
        }
        match self.tokens().get() {
            Some(session) => session_file::store(&self.session_path, &session)
                .context("failed to save session"),
            None => Ok(()),
        }
    }
}

fn session_lost(error: &anyhow::Error) -> bool {
    error.chain().any(|cause| {
        cause
            .downcast_ref::<ClientError>()
            .is_some_and(|e| matches!(e, ClientError::SessionExpired))
            || cause
                .downcast_ref::<DashboardError>()
                .is_some_and(|e| matches!(e, DashboardError::Session(ClientError::SessionExpired)))
            || cause
                .downcast_ref::<SubmitError>()
                .is_some_and(|e| matches!(e, SubmitError::Session(ClientError::SessionExpired)))
    })
}
