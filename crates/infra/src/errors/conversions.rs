//! Conversions from external infrastructure errors into domain errors.

use std::io::{Error as IoError, ErrorKind};

use informado_domain::InformadoError;
use keyring::Error as KeyringError;
use reqwest::Error as HttpError;
use serde_json::Error as JsonError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub InformadoError);

impl From<InfraError> for InformadoError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<InformadoError> for InfraError {
    fn from(value: InformadoError) -> Self {
        Self(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoInformadoError {
    fn into_informado(self) -> InformadoError;
}

/* -------------------------------------------------------------------------- */
/* std::io::Error → InformadoError */
/* -------------------------------------------------------------------------- */

impl IntoInformadoError for IoError {
    fn into_informado(self) -> InformadoError {
        match self.kind() {
            ErrorKind::PermissionDenied => {
                InformadoError::Storage(format!("permission denied: {self}"))
            }
            ErrorKind::NotFound => InformadoError::Storage(format!("path not found: {self}")),
            _ => InformadoError::Storage(self.to_string()),
        }
    }
}

impl From<IoError> for InfraError {
    fn from(value: IoError) -> Self {
        Self(value.into_informado())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → InformadoError */
/* -------------------------------------------------------------------------- */

impl IntoInformadoError for JsonError {
    fn into_informado(self) -> InformadoError {
        if self.is_io() {
            InformadoError::Storage(self.to_string())
        } else {
            InformadoError::InvalidInput(format!("malformed JSON: {self}"))
        }
    }
}

impl From<JsonError> for InfraError {
    fn from(value: JsonError) -> Self {
        Self(value.into_informado())
    }
}

/* -------------------------------------------------------------------------- */
/* keyring::Error → InformadoError */
/* -------------------------------------------------------------------------- */

impl IntoInformadoError for KeyringError {
    fn into_informado(self) -> InformadoError {
        let description = self.to_string();

        match self {
            KeyringError::NoEntry => InformadoError::Storage("keychain entry not found".into()),
            KeyringError::BadEncoding(_) => {
                InformadoError::Storage("credential in keychain is not valid UTF-8".into())
            }
            KeyringError::TooLong(name, limit) => InformadoError::Storage(format!(
                "keychain attribute '{name}' exceeds platform limit ({limit})"
            )),
            KeyringError::PlatformFailure(err) => {
                InformadoError::Storage(format!("keychain platform error: {err}"))
            }
            KeyringError::NoStorageAccess(err) => {
                InformadoError::Storage(format!("unable to access secure storage: {err}"))
            }
            _ => InformadoError::Storage(description),
        }
    }
}

impl From<KeyringError> for InfraError {
    fn from(value: KeyringError) -> Self {
        Self(value.into_informado())
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → InformadoError */
/* -------------------------------------------------------------------------- */

impl IntoInformadoError for HttpError {
    fn into_informado(self) -> InformadoError {
        if self.is_timeout() {
            return InformadoError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return InformadoError::Network("HTTP connection failure".into());
        }

        if self.is_builder() {
            return InformadoError::InvalidInput(format!("invalid HTTP request: {self}"));
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return match code {
                401 | 403 => InformadoError::Auth(message),
                400..=499 => InformadoError::InvalidInput(message),
                _ => InformadoError::Network(message),
            };
        }

        InformadoError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        Self(value.into_informado())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
