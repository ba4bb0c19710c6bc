//! Unverified JWT payload decoding.
//!
//! The backend is the authority on token validity; these helpers only read
//! identity hints out of the access token when the login response omits them.

use base64::Engine as _;
use serde_json::Value;
use staff_core::EntityId;
use staff_core::normalize::probe::{Probe, first_id, first_text};

use crate::error::AuthError;

/// Decode the payload segment of a JWT without verifying its signature.
///
/// # Errors
///
/// Returns `AuthError::Decode` if the token is not three dot-separated
/// segments or the payload is not base64url-encoded JSON.
pub fn decode_payload(jwt: &str) -> Result<Value, AuthError> {
    let parts: Vec<&str> = jwt.split('.').collect();
    if parts.len() != 3 {
        return Err(AuthError::Decode("invalid JWT format".into()));
    }
    let payload = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(parts[1].trim_end_matches('='))
        .map_err(|e| AuthError::Decode(format!("base64 decode failed: {e}")))?;
    serde_json::from_slice(&payload)
        .map_err(|e| AuthError::Decode(format!("JSON parse failed: {e}")))
}

/// User id claim (`user_id`, `id`, or `uid`).
#[must_use]
pub fn user_id(jwt: &str) -> Option<EntityId> {
    let payload = decode_payload(jwt).ok()?;
    first_id(&payload, &["user_id", "id", "uid"])
}

/// Email claim (`email`, `user_email`, or `username`).
#[must_use]
pub fn email(jwt: &str) -> Option<String> {
    let payload = decode_payload(jwt).ok()?;
    first_text(
        &payload,
        &[
            Probe::Field("email"),
            Probe::Field("user_email"),
            Probe::Field("username"),
        ],
    )
}

/// `exp` claim as a timestamp.
#[must_use]
pub fn expires_at(jwt: &str) -> Option<chrono::DateTime<chrono::Utc>> {
    let exp = decode_payload(jwt).ok()?.get("exp")?.as_i64()?;
    chrono::DateTime::from_timestamp(exp, 0)
}

#[cfg(test)]
pub(crate) fn make_jwt(payload: &str) -> String {
    let engine = base64::engine::general_purpose::URL_SAFE_NO_PAD;
    format!(
        "{}.{}.{}",
        engine.encode(r#"{"alg":"HS256"}"#),
        engine.encode(payload),
        engine.encode("fake_sig")
    )
}
