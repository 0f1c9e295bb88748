//! Authenticated request gateway
//!
//! Wraps every protected call with:
//! - bearer token injection from the session store
//! - a single refresh-and-retry when the backend answers 401
//! - a forced logout when there is no session or it cannot be refreshed
//!
//! The access token is read once per call and once more after a successful
//! refresh. HTTP error statuses are returned as responses, never as errors.

use std::sync::Arc;

use informado_core::{RefreshOutcome, SessionService};
use informado_domain::{ApiConfig, InformadoError};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use super::errors::GatewayError;
use super::multipart::MultipartBody;
use super::response::ApiResponse;
use crate::errors::InfraError;
use crate::http::HttpClient;

/// Caller-supplied headers and body for one request.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    headers: HeaderMap,
    body: Option<RequestBody>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum RequestBody {
    Bytes(Vec<u8>),
    Multipart(MultipartBody),
}

impl RequestOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a header. A caller `Authorization` header is always replaced.
    #[must_use]
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Raw request body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(RequestBody::Bytes(body.into()));
        self
    }

    /// `multipart/form-data` body. The boundary content type replaces any
    /// caller `Content-Type`.
    #[must_use]
    pub fn multipart(mut self, form: MultipartBody) -> Self {
        self.body = Some(RequestBody::Multipart(form));
        self
    }

    /// Serialize `value` as the JSON body.
    ///
    /// # Errors
    /// Returns `InformadoError::InvalidInput` if `value` cannot be serialized.
    pub fn json<T: Serialize + ?Sized>(self, value: &T) -> Result<Self, InformadoError> {
        let body = serde_json::to_vec(value).map_err(InfraError::from)?;
        Ok(self.body(body))
    }
}

/// HTTP front door for every call that needs the session.
pub struct AuthGateway {
    http: HttpClient,
    session: Arc<SessionService>,
    base_url: String,
}

impl AuthGateway {
    #[must_use]
    pub fn new(http: HttpClient, session: Arc<SessionService>, config: &ApiConfig) -> Self {
        Self { http, session, base_url: config.base().to_string() }
    }

    #[must_use]
    pub fn session(&self) -> &Arc<SessionService> {
        &self.session
    }

    /// Absolute URL for `url`; paths are joined to the API base.
    #[must_use]
    pub fn resolve(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else if url.starts_with('/') {
            format!("{}{url}", self.base_url)
        } else {
            format!("{}/{url}", self.base_url)
        }
    }

    /// Issue an authenticated request.
    ///
    /// # Errors
    /// - `GatewayError::Unauthenticated` when no access token is stored; the
    ///   session is ended and nothing is sent
    /// - `GatewayError::Timeout` when the backend does not answer in time
    /// - `GatewayError::Request` when the request cannot be built or sent
    ///
    /// A failed refresh is not an error: it yields a synthesized 401.
    #[instrument(skip(self, options))]
    pub async fn request(
        &self,
        method: Method,
        url: &str,
        options: RequestOptions,
    ) -> Result<ApiResponse, GatewayError> {
        let Some(token) = self.session.access_token() else {
            warn!("No access token, ending session");
            self.session.logout();
            return Err(GatewayError::Unauthenticated);
        };

        let url = self.resolve(url);
        let RequestOptions { mut headers, body } = options;
        if matches!(body, Some(RequestBody::Multipart(_))) {
            headers.remove(CONTENT_TYPE);
        } else if !headers.contains_key(CONTENT_TYPE) {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        let first = self.send(&method, &url, &headers, body.as_ref(), &token).await?;
        if first.status() != StatusCode::UNAUTHORIZED {
            return Ok(first);
        }

        info!("Access token rejected, refreshing");
        if self.session.refresh_rejected(&token).await == RefreshOutcome::SessionEnded {
            return Ok(ApiResponse::session_ended());
        }

        // Gone if another caller's failed refresh cleared the store meanwhile.
        let Some(fresh) = self.session.access_token() else {
            return Ok(ApiResponse::session_ended());
        };

        debug!("Retrying with refreshed token");
        self.send(&method, &url, &headers, body.as_ref(), &fresh).await
    }

    /// `GET` through [`request`](Self::request).
    ///
    /// # Errors
    /// See [`request`](Self::request).
    pub async fn get(&self, url: &str) -> Result<ApiResponse, GatewayError> {
        self.request(Method::GET, url, RequestOptions::new()).await
    }

    /// `POST` a JSON body through [`request`](Self::request).
    ///
    /// # Errors
    /// See [`request`](Self::request); serialization failures are
    /// `GatewayError::Request`.
    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        url: &str,
        value: &T,
    ) -> Result<ApiResponse, GatewayError> {
        let options = RequestOptions::new().json(value)?;
        self.request(Method::POST, url, options).await
    }

    /// `POST` a multipart form through [`request`](Self::request).
    ///
    /// # Errors
    /// See [`request`](Self::request).
    pub async fn post_multipart(
        &self,
        url: &str,
        form: MultipartBody,
    ) -> Result<ApiResponse, GatewayError> {
        self.request(Method::POST, url, RequestOptions::new().multipart(form)).await
    }

    async fn send(
        &self,
        method: &Method,
        url: &str,
        headers: &HeaderMap,
        body: Option<&RequestBody>,
        token: &str,
    ) -> Result<ApiResponse, GatewayError> {
        let mut headers = headers.clone();
        headers.insert(AUTHORIZATION, bearer(token)?);

        let request = self.http.request(method.clone(), url).headers(headers);
        let request = match body {
            Some(RequestBody::Bytes(bytes)) => request.body(bytes.clone()),
            Some(RequestBody::Multipart(form)) => request.multipart(form.to_form()?),
            None => request,
        };

        let response = self.http.execute(request).await.map_err(|err| {
            if err.is_timeout() {
                GatewayError::Timeout(self.http.timeout())
            } else {
                GatewayError::Request(InfraError::from(err).into())
            }
        })?;
        Ok(ApiResponse::read(response).await?)
    }
}

fn bearer(token: &str) -> Result<HeaderValue, GatewayError> {
    let mut value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
        InformadoError::InvalidInput("access token is not a valid header value".to_string())
    })?;
    value.set_sensitive(true);
    Ok(value)
}
