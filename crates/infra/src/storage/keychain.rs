//! Platform keychain token store
//!
//! Uses the OS credential store through `keyring`. The whole session is one
//! secret (the same JSON document the file store writes) so the three fields
//! are replaced together.

use informado_core::TokenStore;
use informado_domain::{CredentialPair, Result};
use keyring::Entry;
use tracing::{debug, warn};

use super::StoredSession;
use crate::errors::InfraError;

const SESSION_ACCOUNT: &str = "session";

/// Session persisted in the platform keychain.
pub struct KeychainTokenStore {
    service: String,
    entry: Entry,
}

impl KeychainTokenStore {
    /// Open the session entry of `service`.
    ///
    /// # Errors
    /// Returns `InformadoError::Storage` if the platform rejects the entry
    /// attributes.
    pub fn new(service: impl Into<String>) -> Result<Self> {
        let service = service.into();
        let entry = Entry::new(&service, SESSION_ACCOUNT).map_err(InfraError::from)?;
        Ok(Self { service, entry })
    }

    fn read(&self) -> StoredSession {
        match self.entry.get_password() {
            Ok(raw) => StoredSession::decode(&raw).unwrap_or_default(),
            Err(keyring::Error::NoEntry) => StoredSession::default(),
            Err(err) => {
                warn!(service = %self.service, error = %err, "Failed to read keychain session");
                StoredSession::default()
            }
        }
    }
}

impl std::fmt::Debug for KeychainTokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeychainTokenStore").field("service", &self.service).finish_non_exhaustive()
    }
}

impl TokenStore for KeychainTokenStore {
    fn save(&self, pair: &CredentialPair) -> Result<()> {
        let contents = StoredSession::from(pair).encode()?;
        self.entry.set_password(&contents).map_err(InfraError::from)?;
        debug!(service = %self.service, "Session stored in keychain");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match self.entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => {
                debug!(service = %self.service, "Keychain session removed");
                Ok(())
            }
            Err(err) => Err(InfraError::from(err).into()),
        }
    }

    fn access_token(&self) -> Option<String> {
        self.read().access_token
    }

    fn refresh_token(&self) -> Option<String> {
        self.read().refresh_token
    }

    fn role(&self) -> Option<String> {
        self.read().role
    }

    fn load(&self) -> Option<CredentialPair> {
        let session = self.read();
        Some(CredentialPair {
            access_token: session.access_token?,
            refresh_token: session.refresh_token?,
            role: session.role?,
        })
    }
}
