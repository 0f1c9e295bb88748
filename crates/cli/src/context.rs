//! Wiring of the session, gateway and report client from configuration

use std::sync::Arc;

use anyhow::{Context, Result};
use informado_core::SessionService;
use informado_infra::{config, open_store, AuthGateway, HttpAuthApi, HttpClient, ReportsApi};
use tracing::{debug, warn};

use crate::cli::Cli;
use crate::navigator::LoggingNavigator;

/// Everything a command needs.
pub struct AppContext {
    pub session: Arc<SessionService>,
    pub gateway: Arc<AuthGateway>,
    pub reports: ReportsApi,
    pub navigator: Arc<LoggingNavigator>,
}

impl AppContext {
    pub fn new(cli: &Cli) -> Result<Self> {
        let mut config = config::load_with(cli.config.clone())?;
        if let Some(base_url) = &cli.base_url {
            config.api.base_url.clone_from(base_url);
        }
        if let Some(backend) = cli.storage {
            config.storage.backend = backend;
        }
        config.validate().context("invalid configuration")?;

        let dev_fallback = config.dev_fallback && config.api.is_local();
        if config.dev_fallback && !dev_fallback {
            warn!(base_url = %config.api.base_url, "Development login ignored for remote backend");
        }

        let http = HttpClient::from_config(&config.api)?;
        let store = open_store(&config.storage)?;
        let navigator = Arc::new(LoggingNavigator::default());
        let auth_api = Arc::new(HttpAuthApi::new(http.clone(), &config.api));
        let session = Arc::new(
            SessionService::new(auth_api, store, navigator.clone()).with_dev_fallback(dev_fallback),
        );
        let gateway = Arc::new(AuthGateway::new(http, session.clone(), &config.api));
        let reports = ReportsApi::new(gateway.clone());

        debug!(base_url = %config.api.base_url, backend = ?config.storage.backend, "Client ready");
        Ok(Self { session, gateway, reports, navigator })
    }
}
