//! Login and signup against the backend's unauthenticated auth endpoints.

use serde::Serialize;
use serde_json::{Value, json};
use staff_core::FieldErrors;
use staff_core::normalize::probe::{Probe, first_id, first_text};

use crate::error::AuthError;
use crate::session::{DashboardRoute, Role, Session};

pub const LOGIN_PATH: &str = "/auth/login/";
pub const SIGNUP_PATH: &str = "/auth/signup/";

const ACCESS: &[Probe] = &[Probe::Field("access"), Probe::Field("access_token")];
const REFRESH: &[Probe] = &[Probe::Field("refresh"), Probe::Field("refresh_token")];
const USER_ID: &[&str] = &["user_id", "user.id", "id"];

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub session: Session,
    pub route: DashboardRoute,
}

/// Registration form.
#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

/// Exchange email and password for a session.
///
/// # Errors
///
/// - `AuthError::Rejected` with the backend's field errors on a refused login
/// - `AuthError::MissingAccessToken` if a 2xx body has no access token
/// - `AuthError::Network` / `AuthError::Decode` on transport or body failures
pub async fn login(
    http: &reqwest::Client,
    base_url: &str,
    email: &str,
    password: &str,
) -> Result<LoginOutcome, AuthError> {
    let url = format!("{}{LOGIN_PATH}", base_url.trim_end_matches('/'));
    let body = post_json(http, &url, &json!({ "email": email, "password": password })).await?;
    let session = session_from_login_body(&body)?;
    let route = DashboardRoute::for_role(session.role);
    tracing::info!(role = %session.role, route = route.path(), "signed in");
    Ok(LoginOutcome { session, route })
}

/// Create an account. Sign-in is a separate step.
///
/// # Errors
///
/// `AuthError::Rejected` carries per-field messages such as
/// `{"email": ["already registered"]}`; `AuthError::Network` means the
/// request never reached the server.
pub async fn signup(
    http: &reqwest::Client,
    base_url: &str,
    request: &SignupRequest,
) -> Result<(), AuthError> {
    let url = format!("{}{SIGNUP_PATH}", base_url.trim_end_matches('/'));
    let body = serde_json::to_value(request).map_err(|e| AuthError::Decode(e.to_string()))?;
    post_json(http, &url, &body).await?;
    tracing::info!(email = %request.email, "account created");
    Ok(())
}

/// Build a session from a login response body.
///
/// Accepts `access`/`access_token` and `refresh`/`refresh_token`, a numeric or
/// named `role`, and a user id from the body or, failing that, the token claims.
///
/// # Errors
///
/// Returns `AuthError::MissingAccessToken` when no access token is present.
pub fn session_from_login_body(body: &Value) -> Result<Session, AuthError> {
    let access = first_text(body, ACCESS).ok_or(AuthError::MissingAccessToken)?;
    let refresh = first_text(body, REFRESH);
    let role = Role::from_value(body.get("role").or_else(|| body.pointer("/user/role")));

    let mut session = Session::new(access, refresh, role);
    if let Some(uid) = first_id(body, USER_ID).or_else(|| crate::claims::user_id(&session.access_token)) {
        session = session.with_user_id(uid);
    }
    if let Some(user) = body.get("user").filter(|u| u.is_object()) {
        session = session.with_profile(user.clone());
    }
    Ok(session)
}

async fn post_json(http: &reqwest::Client, url: &str, body: &Value) -> Result<Value, AuthError> {
    let resp = http
        .post(url)
        .json(body)
        .send()
        .await
        .map_err(|e| AuthError::Network(e.to_string()))?;
    let status = resp.status();
    let text = resp
        .text()
        .await
        .map_err(|e| AuthError::Network(e.to_string()))?;
    tracing::debug!(url, status = status.as_u16(), "auth request");

    if !status.is_success() {
        return Err(match FieldErrors::from_body(&text) {
            Some(errors) => AuthError::Rejected(errors),
            None => AuthError::Http {
                status: status.as_u16(),
                body: text,
            },
        });
    }
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&text).map_err(|e| AuthError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use staff_core::EntityId;

    use super::*;

    #[test]
    fn hr_login_body_routes_to_hr() {
        let body = json!({"status": 200, "access_token": "a", "role": 3});
        let session = session_from_login_body(&body).unwrap();
        assert_eq!(session.access_token, "a");
        assert_eq!(session.role, Role::Hr);
        assert_eq!(DashboardRoute::for_role(session.role), DashboardRoute::Hr);
    }

    #[test]
    fn reads_refresh_and_user() {
        let body = json!({
            "access": "acc",
            "refresh": "ref",
            "role": "admin",
            "user": {"id": 12, "email": "root@example.com"}
        });
        let session = session_from_login_body(&body).unwrap();
        assert_eq!(session.refresh_token.as_deref(), Some("ref"));
        assert_eq!(session.user_id, Some(EntityId::Number(12)));
        assert_eq!(session.role, Role::Admin);
        assert_eq!(session.email().as_deref(), Some("root@example.com"));
    }

    #[test]
    fn user_id_falls_back_to_token_claims() {
        let jwt = crate::claims::make_jwt(r#"{"user_id": 99}"#);
        let session = session_from_login_body(&json!({ "access": jwt })).unwrap();
        assert_eq!(session.user_id, Some(EntityId::Number(99)));
        assert_eq!(session.role, Role::Unknown);
    }

    #[test]
    fn missing_access_token_is_an_error() {
        let err = session_from_login_body(&json!({"refresh": "r"})).unwrap_err();
        assert!(matches!(err, AuthError::MissingAccessToken));
    }
}
