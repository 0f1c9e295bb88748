//! Client configuration structures
//!
//! Loaded by `informado_infra::config` from the environment or a JSON/TOML
//! file. Every section has defaults so a partial file is enough.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_KEYCHAIN_SERVICE, DEFAULT_LOGIN_PATH, DEFAULT_REFRESH_PATH,
    DEFAULT_SESSION_FILE, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
};
use crate::errors::{InformadoError, Result};

/// Top-level client configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api: ApiConfig,
    pub storage: StorageConfig,
    /// Allow the local development login fallback (localhost backends only)
    pub dev_fallback: bool,
}

impl ClientConfig {
    /// Check the values that cannot be caught by deserialization.
    ///
    /// # Errors
    /// Returns `InformadoError::Config` for an unparseable base URL, a
    /// non-HTTP scheme, a zero timeout, or endpoint paths without a leading
    /// slash.
    pub fn validate(&self) -> Result<()> {
        let url = self.api.parsed_base_url()?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(InformadoError::Config(format!(
                "Unsupported API scheme: {}",
                url.scheme()
            )));
        }
        if self.api.timeout_secs == 0 {
            return Err(InformadoError::Config("API timeout must be positive".to_string()));
        }
        for path in [&self.api.login_path, &self.api.refresh_path] {
            if !path.starts_with('/') {
                return Err(InformadoError::Config(format!(
                    "Endpoint path must start with '/': {path}"
                )));
            }
        }
        Ok(())
    }
}

/// Backend connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub login_path: String,
    pub refresh_path: String,
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            refresh_path: DEFAULT_REFRESH_PATH.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ApiConfig {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Base URL with any trailing slash removed.
    #[must_use]
    pub fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Absolute URL for an API path such as `/reportes`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base(), path)
    }

    /// # Errors
    /// Returns `InformadoError::Config` if the base URL does not parse.
    pub fn parsed_base_url(&self) -> Result<Url> {
        Url::parse(&self.base_url)
            .map_err(|e| InformadoError::Config(format!("Invalid API base URL: {e}")))
    }

    /// Whether the backend runs on this machine.
    #[must_use]
    pub fn is_local(&self) -> bool {
        self.parsed_base_url()
            .ok()
            .and_then(|url| url.host_str().map(|host| matches!(host, "localhost" | "127.0.0.1")))
            .unwrap_or(false)
    }
}

/// Where the session is persisted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process memory only; the session ends with the process
    Memory,
    /// JSON file on disk
    #[default]
    File,
    /// Platform keychain
    Keychain,
}

impl std::str::FromStr for StorageBackend {
    type Err = InformadoError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "file" => Ok(Self::File),
            "keychain" => Ok(Self::Keychain),
            other => Err(InformadoError::Config(format!("Unknown storage backend: {other}"))),
        }
    }
}

/// Session storage settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub path: PathBuf,
    pub keychain_service: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            path: PathBuf::from(DEFAULT_SESSION_FILE),
            keychain_service: DEFAULT_KEYCHAIN_SERVICE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = ClientConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.api.is_local());
        assert!(!config.dev_fallback);
        assert_eq!(config.storage.backend, StorageBackend::File);
    }

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let api = ApiConfig { base_url: "https://api.example.com/v1/".to_string(), ..ApiConfig::default() };
        assert_eq!(api.endpoint("/reportes"), "https://api.example.com/v1/reportes");
        assert!(!api.is_local());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = ClientConfig::default();
        config.api.base_url = "not a url".to_string();
        assert!(matches!(config.validate(), Err(InformadoError::Config(_))));

        let mut config = ClientConfig::default();
        config.api.timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = ClientConfig::default();
        config.api.base_url = "ftp://files.example.com".to_string();
        assert!(config.validate().is_err());

        let mut config = ClientConfig::default();
        config.api.refresh_path = "auth/refresh".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_storage_backend_from_str() {
        assert_eq!("Keychain".parse::<StorageBackend>().unwrap(), StorageBackend::Keychain);
        assert!("cloud".parse::<StorageBackend>().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: ClientConfig = toml::from_str(
            r#"
            dev_fallback = true

            [api]
            base_url = "https://informado.example.com/api/v1"
            "#,
        )
        .unwrap();
        assert!(config.dev_fallback);
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.api.login_path, "/auth/autenticar");
        assert_eq!(config.storage, StorageConfig::default());
    }
}
