use std::time::Duration;

use informado_domain::constants::{DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
use informado_domain::{ApiConfig, InformadoError};
use reqwest::header::HeaderMap;
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use tracing::debug;

use crate::errors::InfraError;

/// HTTP client with a per-request timeout.
///
/// Sends each request exactly once. Retrying is the caller's decision; the
/// gateway retries a request at most once, after a token refresh.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
    timeout: Duration,
}

impl HttpClient {
    /// Start building a new HTTP client.
    #[must_use]
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Convenience constructor with default configuration.
    ///
    /// # Errors
    /// Returns `InformadoError::Network` if the TLS backend fails to initialise.
    pub fn new() -> Result<Self, InformadoError> {
        Self::builder().build()
    }

    /// Client configured from the backend settings.
    ///
    /// # Errors
    /// See [`HttpClientBuilder::build`].
    pub fn from_config(config: &ApiConfig) -> Result<Self, InformadoError> {
        Self::builder().timeout(config.timeout()).user_agent(&config.user_agent).build()
    }

    /// Per-request timeout applied to every call.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Create a request builder using the underlying reqwest client.
    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Execute the provided request builder.
    ///
    /// Any received response is returned as is, whatever its status.
    ///
    /// # Errors
    /// - `InformadoError::InvalidInput` if the request cannot be built
    /// - `InformadoError::Network` on connection failures and timeouts
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, InformadoError> {
        self.execute(builder).await.map_err(|err| InfraError::from(err).into())
    }

    /// Like [`send`](Self::send), keeping the raw reqwest error so callers
    /// can tell timeouts apart.
    ///
    /// # Errors
    /// Returns the reqwest error when the request cannot be built or sent.
    pub async fn execute(&self, builder: RequestBuilder) -> Result<Response, reqwest::Error> {
        let request = builder.build()?;

        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, %url, "sending HTTP request");

        match self.client.execute(request).await {
            Ok(response) => {
                debug!(%method, %url, status = %response.status(), "received HTTP response");
                Ok(response)
            }
            Err(err) => {
                debug!(%method, %url, error = %err, timeout = err.is_timeout(), "HTTP request failed");
                Err(err)
            }
        }
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    user_agent: Option<String>,
    default_headers: Option<HeaderMap>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: Some(DEFAULT_USER_AGENT.to_string()),
            default_headers: None,
        }
    }
}

impl HttpClientBuilder {
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    #[must_use]
    pub fn default_headers(mut self, headers: HeaderMap) -> Self {
        self.default_headers = Some(headers);
        self
    }

    /// # Errors
    /// Returns `InformadoError::Network` if reqwest cannot build its client.
    pub fn build(self) -> Result<HttpClient, InformadoError> {
        let mut builder = ReqwestClient::builder().timeout(self.timeout).no_proxy();

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        if let Some(headers) = self.default_headers {
            builder = builder.default_headers(headers);
        }

        let client = builder.build().map_err(|err| InformadoError::from(InfraError::from(err)))?;

        Ok(HttpClient { client, timeout: self.timeout })
    }
}
