//! Error types used throughout the client

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for the Informado client
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum InformadoError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl InformadoError {
    /// Stable label suitable for structured log fields.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Network(_) => "network",
            Self::Auth(_) => "auth",
            Self::Storage(_) => "storage",
            Self::InvalidInput(_) => "invalid_input",
            Self::Internal(_) => "internal",
        }
    }
}

/// Result type alias for Informado operations
pub type Result<T> = std::result::Result<T, InformadoError>;
