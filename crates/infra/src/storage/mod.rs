//! Token store adapters
//!
//! Every backend persists the same three logical keys (`accessToken`,
//! `refreshToken`, `userRole`) and writes them as one unit.

pub mod file;
pub mod keychain;
pub mod memory;

use std::sync::Arc;

use informado_core::TokenStore;
use informado_domain::{CredentialPair, Result, StorageBackend, StorageConfig};
use serde::{Deserialize, Serialize};

use crate::errors::InfraError;

pub use file::FileTokenStore;
pub use keychain::KeychainTokenStore;
pub use memory::MemoryTokenStore;

/// Serialized form shared by the file and keychain backends.
///
/// Fields are optional so that a hand-edited or truncated document reads as
/// "no session" instead of failing.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredSession {
    #[serde(rename = "accessToken", skip_serializing_if = "Option::is_none")]
    access_token: Option<String>,
    #[serde(rename = "refreshToken", skip_serializing_if = "Option::is_none")]
    refresh_token: Option<String>,
    #[serde(rename = "userRole", skip_serializing_if = "Option::is_none")]
    role: Option<String>,
}

impl From<&CredentialPair> for StoredSession {
    fn from(pair: &CredentialPair) -> Self {
        Self {
            access_token: Some(pair.access_token.clone()),
            refresh_token: Some(pair.refresh_token.clone()),
            role: Some(pair.role.clone()),
        }
    }
}

impl StoredSession {
    fn encode(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|err| InfraError::from(err).into())
    }

    fn decode(raw: &str) -> Option<Self> {
        match serde_json::from_str(raw) {
            Ok(session) => Some(session),
            Err(err) => {
                tracing::warn!(error = %err, "Ignoring unreadable stored session");
                None
            }
        }
    }
}

/// Open the store selected by the configuration.
///
/// # Errors
/// Returns `InformadoError::Storage` if the keychain entry cannot be created.
pub fn open_store(config: &StorageConfig) -> Result<Arc<dyn TokenStore>> {
    let store: Arc<dyn TokenStore> = match config.backend {
        StorageBackend::Memory => Arc::new(MemoryTokenStore::new()),
        StorageBackend::File => Arc::new(FileTokenStore::new(&config.path)),
        StorageBackend::Keychain => Arc::new(KeychainTokenStore::new(&config.keychain_service)?),
    };
    tracing::debug!(backend = ?config.backend, "Opened token store");
    Ok(store)
}
