use staff_core::FieldErrors;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    /// The backend refused the credentials or form; messages are per field.
    #[error("rejected by server: {0}")]
    Rejected(FieldErrors),

    #[error("login response carried no access token")]
    MissingAccessToken,

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("unable to reach server: {0}")]
    Network(String),

    #[error("malformed response: {0}")]
    Decode(String),

    #[error("session store error: {0}")]
    SessionStore(String),
}
