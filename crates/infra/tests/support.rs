//! Shared helpers for infra integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use informado_core::{SessionNavigator, SessionService, TokenStore};
use informado_domain::{ApiConfig, CredentialPair, Destination};
use informado_infra::{AuthGateway, HttpAuthApi, HttpClient, MemoryTokenStore};
use parking_lot::Mutex;
use wiremock::MockServer;

/// Navigator that records where the session sent the user.
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

/// Gateway wired to a mock backend with an in-memory session.
pub struct TestClient {
    pub gateway: Arc<AuthGateway>,
    pub store: Arc<MemoryTokenStore>,
    pub navigator: Arc<RecordingNavigator>,
}

impl TestClient {
    pub fn new(server: &MockServer, session: Option<CredentialPair>) -> Self {
        Self::with_api(server, session, |_| {})
    }

    /// Like [`new`](Self::new), with the API settings adjusted first.
    pub fn with_api(
        server: &MockServer,
        session: Option<CredentialPair>,
        configure: impl FnOnce(&mut ApiConfig),
    ) -> Self {
        let mut config =
            ApiConfig { base_url: format!("{}/api/v1", server.uri()), ..ApiConfig::default() };
        configure(&mut config);
        let http = HttpClient::from_config(&config).expect("http client");

        let store = Arc::new(session.map_or_else(MemoryTokenStore::new, MemoryTokenStore::with_pair));
        let navigator = Arc::new(RecordingNavigator::default());
        let api = Arc::new(HttpAuthApi::new(http.clone(), &config));
        let service = SessionService::new(api, store.clone(), navigator.clone());
        let gateway = Arc::new(AuthGateway::new(http, Arc::new(service), &config));

        Self { gateway, store, navigator }
    }

    pub fn stored(&self) -> Option<CredentialPair> {
        self.store.load()
    }
}
