//! Client error types.

use staff_core::FieldErrors;
use thiserror::Error;

/// Errors from [`crate::AuthenticatedClient::request`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// No session is stored.
    #[error("not signed in")]
    Unauthenticated,

    /// The access token was rejected and could not be refreshed.
    #[error("session expired; sign in again")]
    SessionExpired,

    /// The backend answered with a non-success status other than a
    /// recoverable 401.
    #[error("HTTP {status}: {body}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body, verbatim.
        body: String,
    },

    /// A success response whose body is not valid JSON.
    #[error("malformed response body: {0}")]
    Decode(String),

    /// Connection, TLS, or timeout failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ClientError {
    /// Errors that require the user to sign in again.
    #[must_use]
    pub const fn is_session_error(&self) -> bool {
        matches!(self, Self::Unauthenticated | Self::SessionExpired)
    }
}

/// Errors from form submissions such as leave requests.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Required fields were blank; nothing was sent.
    #[error("missing required fields: {}", .0.join(", "))]
    Incomplete(Vec<&'static str>),

    /// The backend refused the submission. Messages are per field, as sent.
    #[error("rejected: {0}")]
    Rejected(FieldErrors),

    /// Sign-in is required before submitting.
    #[error(transparent)]
    Session(ClientError),

    /// The submission did not reach the backend or failed without field errors.
    #[error("submission failed: {0}")]
    Failed(String),
}

impl From<ClientError> for SubmitError {
    fn from(error: ClientError) -> Self {
        match error {
            e if e.is_session_error() => Self::Session(e),
            ClientError::Http { status, body } if (400..500).contains(&status) => {
                match FieldErrors::from_body(&body) {
                    Some(errors) => Self::Rejected(errors),
                    None => Self::Failed(format!("HTTP {status}: {body}")),
                }
            }
            other => Self::Failed(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_errors_pass_through_unmodified() {
        let err = SubmitError::from(ClientError::Http {
            status: 400,
            body: r#"{"start_date": ["Date has wrong format."]}"#.into(),
        });
        match err {
            SubmitError::Rejected(errors) => {
                assert_eq!(errors.first("start_date"), Some("Date has wrong format."));
            }
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[test]
    fn server_errors_are_generic_failures() {
        let err = SubmitError::from(ClientError::Http {
            status: 500,
            body: r#"{"detail": "boom"}"#.into(),
        });
        assert!(matches!(err, SubmitError::Failed(_)));
    }

    #[test]
    fn session_errors_stay_distinct() {
        assert!(matches!(
            SubmitError::from(ClientError::SessionExpired),
            SubmitError::Session(ClientError::SessionExpired)
        ));
    }

    #[test]
    fn decode_errors_are_generic_failures() {
        assert!(matches!(
            SubmitError::from(ClientError::Decode("eof".into())),
            SubmitError::Failed(_)
        ));
    }
}
