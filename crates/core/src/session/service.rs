//! Session service - login, logout and the refresh procedure
//!
//! Owns the credential lifecycle:
//! - Login stores a fresh pair and routes to the role's dashboard
//! - Refresh swaps the token pair and keeps the stored role
//! - Logout clears the store and routes to the login page
//!
//! Refreshes are single-flight: callers that observed the same rejected
//! access token wait for one refresh call and share its outcome.

use std::sync::Arc;

use informado_domain::{CredentialPair, CurrentUser, Destination, Role};
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use super::claims;
use super::dev_fallback::dev_credentials;
use super::errors::LoginError;
use super::ports::{AuthApi, SessionNavigator, TokenStore};

/// Result of the refresh procedure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The store now holds a usable access token
    Refreshed,
    /// The session was cleared; the caller must not retry
    SessionEnded,
}

impl RefreshOutcome {
    #[must_use]
    pub const fn is_refreshed(self) -> bool {
        matches!(self, Self::Refreshed)
    }
}

/// Result of checking the session against the role a page expects
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    /// Session present and role matches
    Granted(String),
    /// Session present with another role; sent to that role's dashboard
    Redirected(String),
    /// No session; logged out
    Denied,
}

/// Session lifecycle orchestrator
pub struct SessionService {
    api: Arc<dyn AuthApi>,
    store: Arc<dyn TokenStore>,
    navigator: Arc<dyn SessionNavigator>,
    refresh_gate: Mutex<()>,
    dev_fallback: bool,
}

impl SessionService {
    /// Create a new session service
    pub fn new(
        api: Arc<dyn AuthApi>,
        store: Arc<dyn TokenStore>,
        navigator: Arc<dyn SessionNavigator>,
    ) -> Self {
        Self { api, store, navigator, refresh_gate: Mutex::new(()), dev_fallback: false }
    }

    /// Enable the development login fallback.
    ///
    /// Only pass `true` for a backend on localhost; see
    /// `ApiConfig::is_local`.
    #[must_use]
    pub fn with_dev_fallback(mut self, enabled: bool) -> Self {
        self.dev_fallback = enabled;
        self
    }

    /// Current access token, if any.
    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        self.store.access_token()
    }

    /// Whether a complete credential pair is stored.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.store.load().is_some()
    }

    /// Authenticate against the backend and start a session.
    ///
    /// On success the pair is stored and the client is routed to the role's
    /// dashboard. On any failure the store is cleared.
    ///
    /// # Errors
    /// - `LoginError::InvalidCredentials` when the backend rejects the login
    /// - `LoginError::Unavailable` when the backend cannot be reached or
    ///   answers garbage (and the dev fallback does not apply)
    /// - `LoginError::Storage` when the pair cannot be persisted
    pub async fn login(&self, email: &str, password: &str) -> Result<CredentialPair, LoginError> {
        let pair = match self.api.login(email, password).await {
            Ok(pair) => pair,
            Err(err) if err.is_transport() && self.dev_fallback => {
                match dev_credentials(email, password) {
                    Some(pair) => {
                        warn!(role = %pair.role, "Backend unreachable, using development session");
                        pair
                    }
                    None => return Err(self.abort_login(err.into())),
                }
            }
            Err(err) => return Err(self.abort_login(err.into())),
        };

        if let Err(err) = self.store.save(&pair) {
            return Err(self.abort_login(err.into()));
        }

        info!(role = %pair.role, "Login successful");
        self.navigator.navigate(Destination::for_role(&pair.role));
        Ok(pair)
    }

    fn abort_login(&self, err: LoginError) -> LoginError {
        error!(error = %err, "Login failed");
        if let Err(clear_err) = self.store.clear() {
            warn!(error = %clear_err, "Failed to clear session after login failure");
        }
        err
    }

    /// End the session: clear the store, then route to the login page.
    ///
    /// Always runs to completion; a storage error is logged, never returned.
    /// Calling it on an empty store is harmless.
    pub fn logout(&self) {
        if let Err(err) = self.store.clear() {
            error!(error = %err, "Failed to clear stored session during logout");
        }
        info!("Session ended, redirecting to login");
        self.navigator.navigate(Destination::Login);
    }

    /// Refresh the token pair unconditionally.
    pub async fn refresh(&self) -> RefreshOutcome {
        self.run_refresh(None).await
    }

    /// Refresh after the backend rejected `rejected_token`.
    ///
    /// If another caller already replaced that token while this one waited,
    /// no new refresh call is made.
    pub async fn refresh_rejected(&self, rejected_token: &str) -> RefreshOutcome {
        self.run_refresh(Some(rejected_token)).await
    }

    async fn run_refresh(&self, rejected_token: Option<&str>) -> RefreshOutcome {
        let _gate = self.refresh_gate.lock().await;

        if let Some(rejected) = rejected_token {
            match self.store.access_token() {
                Some(current) if current != rejected => {
                    debug!("Access token already replaced by a concurrent refresh");
                    return RefreshOutcome::Refreshed;
                }
                // A concurrent refresh failed and already logged out.
                None => return RefreshOutcome::SessionEnded,
                Some(_) => {}
            }
        }

        let Some(refresh_token) = self.store.refresh_token() else {
            warn!("No refresh token stored, ending session");
            self.logout();
            return RefreshOutcome::SessionEnded;
        };

        info!("Refreshing access token");
        let tokens = match self.api.refresh(&refresh_token).await {
            Ok(tokens) => tokens,
            Err(err) => {
                error!(error = %err, "Token refresh failed, ending session");
                self.logout();
                return RefreshOutcome::SessionEnded;
            }
        };

        let Some(role) = self.store.role() else {
            warn!("Stored session has no role, ending session");
            self.logout();
            return RefreshOutcome::SessionEnded;
        };

        if let Err(err) = self.store.save(&tokens.with_role(role)) {
            error!(error = %err, "Failed to persist refreshed tokens, ending session");
            self.logout();
            return RefreshOutcome::SessionEnded;
        }

        info!("Access token refreshed");
        RefreshOutcome::Refreshed
    }

    /// Check the stored session against the role a page expects.
    ///
    /// Missing session ends it; a different role is sent to its own
    /// dashboard. Role comparison ignores ASCII case.
    #[must_use]
    pub fn check_access(&self, expected: Role) -> AccessDecision {
        let (Some(_), Some(role)) = (self.store.access_token(), self.store.role()) else {
            warn!("Not authenticated, redirecting to login");
            self.logout();
            return AccessDecision::Denied;
        };

        if role.eq_ignore_ascii_case(expected.as_wire_str()) {
            return AccessDecision::Granted(role);
        }

        warn!(role = %role, expected = %expected, "Wrong role for this page, redirecting");
        self.navigator.navigate(Destination::for_role(&role));
        AccessDecision::Redirected(role)
    }

    /// The signed-in user as far as the stored session tells.
    #[must_use]
    pub fn current_user(&self) -> CurrentUser {
        claims::current_user(self.store.access_token().as_deref(), self.store.role())
    }
}
