//! Single-flight access token refresh.
//!
//! Every request that sees a 401 calls [`RefreshGate::refresh_after`] with the
//! token it was rejected with. Callers serialize on one async mutex; the first
//! performs the exchange, and everyone who was rejected with the same token
//! reuses its recorded outcome instead of issuing another exchange.

use serde_json::{Value, json};
use staff_auth::TokenStore;
use staff_core::normalize::probe::{Probe, first_text};
use tokio::sync::Mutex;

use crate::endpoints::Endpoints;
use crate::error::ClientError;

const ACCESS: &[Probe] = &[Probe::Field("access"), Probe::Field("access_token")];
const REFRESH: &[Probe] = &[Probe::Field("refresh"), Probe::Field("refresh_token")];

/// Outcome of the most recent exchange, keyed by the token it replaced.
#[derive(Debug)]
struct Outcome {
    stale: String,
    fresh: Option<String>,
}

#[derive(Debug, Default)]
pub struct RefreshGate {
    last: Mutex<Option<Outcome>>,
}

impl RefreshGate {
    /// Obtain a usable access token after `stale` was rejected.
    ///
    /// # Errors
    ///
    /// `ClientError::SessionExpired` when the exchange fails, when no refresh
    /// token is held, or when the session was cleared in the meantime.
    pub async fn refresh_after(
        &self,
        stale: &str,
        http: &reqwest::Client,
        endpoints: &Endpoints,
        tokens: &TokenStore,
    ) -> Result<String, ClientError> {
        let mut last = self.last.lock().await;

        if let Some(outcome) = last.as_ref().filter(|o| o.stale == stale) {
            tracing::debug!("reusing in-flight refresh outcome");
            return outcome.fresh.clone().ok_or(ClientError::SessionExpired);
        }

        let session = tokens.get().ok_or(ClientError::SessionExpired)?;
        if session.access_token != stale {
            // Replaced since this request was sent (re-login or an earlier refresh).
            return Ok(session.access_token);
        }

        let fresh = match exchange(http, endpoints, session.refresh_token.as_deref()).await {
            Ok((access, rotated)) => {
                if tokens.replace_credentials(&access, rotated.as_deref()) {
                    tracing::info!(rotated = rotated.is_some(), "access token refreshed");
                    Some(access)
                } else {
                    tracing::warn!("session cleared during refresh");
                    None
                }
            }
            Err(reason) => {
                tracing::warn!(%reason, "token refresh failed");
                None
            }
        };

        *last = Some(Outcome {
            stale: stale.to_string(),
            fresh: fresh.clone(),
        });
        fresh.ok_or(ClientError::SessionExpired)
    }
}

async fn exchange(
    http: &reqwest::Client,
    endpoints: &Endpoints,
    refresh: Option<&str>,
) -> Result<(String, Option<String>), String> {
    let refresh = refresh
        .filter(|r| !r.trim().is_empty())
        .ok_or_else(|| "no refresh token held".to_string())?;

    let resp = http
        .post(endpoints.token_refresh())
        .json(&json!({ "refresh": refresh }))
        .send()
        .await
        .map_err(|e| e.to_string())?;
    let status = resp.status();
    if !status.is_success() {
        return Err(format!("refresh endpoint returned {status}"));
    }
    let body: Value = resp.json().await.map_err(|e| e.to_string())?;
    let access =
        first_text(&body, ACCESS).ok_or_else(|| "refresh response has no access token".to_string())?;
    Ok((access, first_text(&body, REFRESH)))
}
