//! Port interfaces for session management
//!
//! These traits define the boundaries between the session logic and the
//! adapters that persist credentials, talk to the backend, and move the user
//! around the application.

use async_trait::async_trait;
use informado_domain::{CredentialPair, Destination, Result as DomainResult, TokenPair};

use super::errors::AuthApiError;

/// Durable, synchronous storage for the credential pair
///
/// Implementations write all three fields as a unit: a reader running after
/// `save` returns sees either the whole new pair or nothing.
pub trait TokenStore: Send + Sync {
    /// Persist the whole pair, replacing any previous one.
    ///
    /// # Errors
    /// Returns `InformadoError::Storage` if the backend cannot be written.
    fn save(&self, pair: &CredentialPair) -> DomainResult<()>;

    /// Remove all three fields. Clearing an empty store is a no-op.
    ///
    /// # Errors
    /// Returns `InformadoError::Storage` if the backend cannot be written.
    fn clear(&self) -> DomainResult<()>;

    /// Stored access token.
    fn access_token(&self) -> Option<String>;

    /// Stored refresh token.
    fn refresh_token(&self) -> Option<String>;

    /// Stored role, exactly as it was saved.
    fn role(&self) -> Option<String>;

    /// The complete pair, or `None` when any field is missing.
    fn load(&self) -> Option<CredentialPair> {
        Some(CredentialPair {
            access_token: self.access_token()?,
            refresh_token: self.refresh_token()?,
            role: self.role()?,
        })
    }
}

/// Backend authentication endpoints
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchange e-mail and password for a full credential pair.
    async fn login(&self, email: &str, password: &str) -> Result<CredentialPair, AuthApiError>;

    /// Exchange a refresh token for a new token pair. The role is not part of
    /// the response.
    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AuthApiError>;
}

/// Capability to move the client to another place after a session change
///
/// The browser client redirected the page; other front ends log, print or
/// emit an event.
pub trait SessionNavigator: Send + Sync {
    /// Send the client to `destination`.
    fn navigate(&self, destination: Destination);
}
