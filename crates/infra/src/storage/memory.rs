//! In-process token store

use informado_core::TokenStore;
use informado_domain::{CredentialPair, Result};
use parking_lot::RwLock;

/// Session kept in memory for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    pair: RwLock<Option<CredentialPair>>,
}

impl MemoryTokenStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a session.
    #[must_use]
    pub fn with_pair(pair: CredentialPair) -> Self {
        Self { pair: RwLock::new(Some(pair)) }
    }
}

impl TokenStore for MemoryTokenStore {
    fn save(&self, pair: &CredentialPair) -> Result<()> {
        *self.pair.write() = Some(pair.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.pair.write() = None;
        Ok(())
    }

    fn access_token(&self) -> Option<String> {
        self.pair.read().as_ref().map(|p| p.access_token.clone())
    }

    fn refresh_token(&self) -> Option<String> {
        self.pair.read().as_ref().map(|p| p.refresh_token.clone())
    }

    fn role(&self) -> Option<String> {
        self.pair.read().as_ref().map(|p| p.role.clone())
    }

    fn load(&self) -> Option<CredentialPair> {
        self.pair.read().clone()
    }
}
