//! Mock port implementations for testing

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use informado_core::{AuthApi, AuthApiError, SessionNavigator, TokenStore};
use informado_domain::constants::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, ROLE_KEY};
use informado_domain::{CredentialPair, Destination, InformadoError, Result as DomainResult, TokenPair};
use parking_lot::Mutex;

/// In-memory mock for `TokenStore`.
///
/// Keeps the three fields under their logical keys so tests can seed
/// partial state, and can be told to fail writes.
#[derive(Default)]
pub struct MockTokenStore {
    entries: Mutex<HashMap<&'static str, String>>,
    fail_saves: Mutex<bool>,
    clears: AtomicUsize,
}

impl MockTokenStore {
    pub fn with_pair(pair: &CredentialPair) -> Self {
        let store = Self::default();
        store.save(pair).unwrap();
        store
    }

    pub fn set_raw(&self, key: &'static str, value: &str) {
        self.entries.lock().insert(key, value.to_string());
    }

    pub fn fail_saves(&self, fail: bool) {
        *self.fail_saves.lock() = fail;
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn clear_count(&self) -> usize {
        self.clears.load(Ordering::SeqCst)
    }
}

impl TokenStore for MockTokenStore {
    fn save(&self, pair: &CredentialPair) -> DomainResult<()> {
        if *self.fail_saves.lock() {
            return Err(InformadoError::Storage("quota exceeded".to_string()));
        }
        let mut entries = self.entries.lock();
        entries.insert(ACCESS_TOKEN_KEY, pair.access_token.clone());
        entries.insert(REFRESH_TOKEN_KEY, pair.refresh_token.clone());
        entries.insert(ROLE_KEY, pair.role.clone());
        Ok(())
    }

    fn clear(&self) -> DomainResult<()> {
        self.clears.fetch_add(1, Ordering::SeqCst);
        self.entries.lock().clear();
        Ok(())
    }

    fn access_token(&self) -> Option<String> {
        self.entries.lock().get(ACCESS_TOKEN_KEY).cloned()
    }

    fn refresh_token(&self) -> Option<String> {
        self.entries.lock().get(REFRESH_TOKEN_KEY).cloned()
    }

    fn role(&self) -> Option<String> {
        self.entries.lock().get(ROLE_KEY).cloned()
    }
}

/// Navigator that records every destination it is sent to.
#[derive(Default)]
pub struct RecordingNavigator {
    visits: Mutex<Vec<Destination>>,
}

impl RecordingNavigator {
    pub fn visits(&self) -> Vec<Destination> {
        self.visits.lock().clone()
    }

    pub fn logins(&self) -> usize {
        self.visits.lock().iter().filter(|d| **d == Destination::Login).count()
    }
}

impl SessionNavigator for RecordingNavigator {
    fn navigate(&self, destination: Destination) {
        self.visits.lock().push(destination);
    }
}

/// Auth backend that replays scripted answers and counts calls.
#[derive(Default)]
pub struct ScriptedAuthApi {
    logins: Mutex<VecDeque<Result<CredentialPair, AuthApiError>>>,
    refreshes: Mutex<VecDeque<Result<TokenPair, AuthApiError>>>,
    refresh_delay: Mutex<Option<Duration>>,
    login_calls: AtomicUsize,
    refresh_calls: AtomicUsize,
    last_refresh_token: Mutex<Option<String>>,
}

impl ScriptedAuthApi {
    pub fn push_login(&self, answer: Result<CredentialPair, AuthApiError>) {
        self.logins.lock().push_back(answer);
    }

    pub fn push_refresh(&self, answer: Result<TokenPair, AuthApiError>) {
        self.refreshes.lock().push_back(answer);
    }

    pub fn delay_refresh(&self, delay: Duration) {
        *self.refresh_delay.lock() = Some(delay);
    }

    pub fn login_calls(&self) -> usize {
        self.login_calls.load(Ordering::SeqCst)
    }

    pub fn refresh_calls(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }

    pub fn last_refresh_token(&self) -> Option<String> {
        self.last_refresh_token.lock().clone()
    }
}

#[async_trait]
impl AuthApi for ScriptedAuthApi {
    async fn login(&self, _email: &str, _password: &str) -> Result<CredentialPair, AuthApiError> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        self.logins
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(AuthApiError::Transport("no scripted login".to_string())))
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AuthApiError> {
        self.refresh_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_refresh_token.lock() = Some(refresh_token.to_string());
        let delay = *self.refresh_delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.refreshes
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(AuthApiError::Transport("no scripted refresh".to_string())))
    }
}

/// Token pair as the refresh endpoint would return it.
pub fn token_pair(access: &str, refresh: &str) -> TokenPair {
    serde_json::from_value(serde_json::json!({
        "accessToken": access,
        "refreshToken": refresh,
    }))
    .unwrap()
}

/// Wire up a service over fresh mocks.
pub fn harness(
    store: MockTokenStore,
) -> (informado_core::SessionService, Arc<ScriptedAuthApi>, Arc<MockTokenStore>, Arc<RecordingNavigator>)
{
    let api = Arc::new(ScriptedAuthApi::default());
    let store = Arc::new(store);
    let navigator = Arc::new(RecordingNavigator::default());
    let service =
        informado_core::SessionService::new(api.clone(), store.clone(), navigator.clone());
    (service, api, store, navigator)
}
