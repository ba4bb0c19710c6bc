use staff_api::ClientError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    /// The primary request could not be authorized; the user must sign in again.
    #[error("sign-in required: {0}")]
    Session(ClientError),

    #[error(transparent)]
    Client(ClientError),

    /// The page's offset does not fit the query parameter.
    #[error("page {page} is out of range")]
    PageOutOfRange { page: u64 },
}

impl From<ClientError> for DashboardError {
    fn from(error: ClientError) -> Self {
        if error.is_session_error() {
            Self::Session(error)
        } else {
            Self::Client(error)
        }
    }
}

impl DashboardError {
    #[must_use]
    pub const fn requires_login(&self) -> bool {
        matches!(self, Self::Session(_))
    }
}
