//! Session error types

use informado_domain::InformadoError;
use thiserror::Error;

/// Failure reported by an [`AuthApi`](super::ports::AuthApi) adapter
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthApiError {
    /// The backend answered with a non-2xx status
    #[error("Backend rejected the request with status {status}: {message}")]
    Rejected { status: u16, message: String },

    /// The backend could not be reached
    #[error("Transport error: {0}")]
    Transport(String),

    /// The backend answered 2xx with a body we could not read
    #[error("Malformed response: {0}")]
    Decode(String),
}

impl AuthApiError {
    /// Whether the request never got an answer from the backend.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

/// Why a login attempt did not produce a session
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginError {
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("Authentication service unavailable: {0}")]
    Unavailable(String),

    #[error("Could not persist session: {0}")]
    Storage(#[from] InformadoError),
}

impl From<AuthApiError> for LoginError {
    fn from(err: AuthApiError) -> Self {
        match err {
            AuthApiError::Rejected { .. } => Self::InvalidCredentials(err.to_string()),
            AuthApiError::Transport(_) | AuthApiError::Decode(_) => {
                Self::Unavailable(err.to_string())
            }
        }
    }
}
