//! API-specific error types
//!
//! Provides error classification for calls made through the gateway.

use std::time::Duration;

use informado_domain::InformadoError;
use reqwest::StatusCode;
use thiserror::Error;

/// Categories of API errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCategory {
    /// Authentication errors (401, 403, or no session)
    Authentication,
    /// Rate limiting errors (429)
    RateLimit,
    /// Server errors (5xx)
    Server,
    /// Client errors (4xx except auth), including undecodable bodies
    Client,
    /// Network/connection errors
    Network,
    /// Configuration errors
    Config,
}

/// API operation errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Client error: {0}")]
    Client(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),
}

impl ApiError {
    /// Get the error category for this error
    #[must_use]
    pub const fn category(&self) -> ApiErrorCategory {
        match self {
            Self::Auth(_) => ApiErrorCategory::Authentication,
            Self::RateLimit(_) => ApiErrorCategory::RateLimit,
            Self::Server(_) => ApiErrorCategory::Server,
            Self::Client(_) => ApiErrorCategory::Client,
            Self::Network(_) | Self::Timeout(_) => ApiErrorCategory::Network,
            Self::Config(_) => ApiErrorCategory::Config,
        }
    }

    /// Classify a non-success response.
    #[must_use]
    pub fn from_status(status: StatusCode, url: &str, body: &str) -> Self {
        let message = if body.is_empty() {
            format!("{url} returned status {status}")
        } else {
            format!("{url} returned status {status}: {body}")
        };

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            Self::Auth(message)
        } else if status == StatusCode::TOO_MANY_REQUESTS {
            Self::RateLimit(message)
        } else if status.is_server_error() {
            Self::Server(message)
        } else if status.is_client_error() {
            Self::Client(message)
        } else {
            Self::Network(message)
        }
    }
}

impl From<InformadoError> for ApiError {
    fn from(err: InformadoError) -> Self {
        match err {
            InformadoError::Network(message) => Self::Network(message),
            InformadoError::Auth(message) => Self::Auth(message),
            InformadoError::Config(message) => Self::Config(message),
            InformadoError::InvalidInput(message) => Self::Client(message),
            InformadoError::Storage(message) | InformadoError::Internal(message) => {
                Self::Server(message)
            }
        }
    }
}

/// Failure of the authenticated request gateway itself.
///
/// HTTP error statuses are not errors here; they come back as responses.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// No access token was stored; the session has been ended.
    #[error("Not authenticated")]
    Unauthenticated,

    /// The backend did not answer within the client timeout.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// The request could not be built or sent.
    #[error(transparent)]
    Request(#[from] InformadoError),
}

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Unauthenticated => Self::Auth("no active session".to_string()),
            GatewayError::Timeout(after) => Self::Timeout(after),
            GatewayError::Request(inner) => inner.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        assert_eq!(ApiError::Auth("test".to_string()).category(), ApiErrorCategory::Authentication);
        assert_eq!(ApiError::RateLimit("test".to_string()).category(), ApiErrorCategory::RateLimit);
        assert_eq!(ApiError::Server("test".to_string()).category(), ApiErrorCategory::Server);
        assert_eq!(
            ApiError::Timeout(Duration::from_secs(30)).category(),
            ApiErrorCategory::Network
        );
    }

    #[test]
    fn test_from_status() {
        let url = "http://localhost/reportes";
        assert!(matches!(ApiError::from_status(StatusCode::FORBIDDEN, url, ""), ApiError::Auth(_)));
        assert!(matches!(
            ApiError::from_status(StatusCode::TOO_MANY_REQUESTS, url, "slow down"),
            ApiError::RateLimit(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::BAD_GATEWAY, url, ""),
            ApiError::Server(_)
        ));
        match ApiError::from_status(StatusCode::NOT_FOUND, url, "missing") {
            ApiError::Client(msg) => assert!(msg.contains("404") && msg.contains("missing")),
            other => panic!("expected client error, got {other:?}"),
        }
    }

    #[test]
    fn test_unauthenticated_gateway_error_is_auth() {
        let err: ApiError = GatewayError::Unauthenticated.into();
        assert_eq!(err.category(), ApiErrorCategory::Authentication);

        let err: ApiError = GatewayError::Request(InformadoError::Network("down".into())).into();
        assert_eq!(err.category(), ApiErrorCategory::Network);
    }

    #[test]
    fn test_gateway_timeout_keeps_duration() {
        let err: ApiError = GatewayError::Timeout(Duration::from_secs(5)).into();
        assert!(matches!(err, ApiError::Timeout(after) if after == Duration::from_secs(5)));
        assert_eq!(err.category(), ApiErrorCategory::Network);
    }
}
