//! Buffered HTTP response returned by the gateway

use informado_domain::constants::REFRESH_FAILED_MESSAGE;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::errors::InfraError;

/// Status, headers and the fully read body of a response.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl ApiResponse {
    #[must_use]
    pub const fn new(status: StatusCode, headers: HeaderMap, body: Vec<u8>) -> Self {
        Self { status, headers, body }
    }

    /// Read a reqwest response to the end.
    ///
    /// # Errors
    /// Returns `InformadoError::Network` if the body stream fails.
    pub async fn read(response: Response) -> Result<Self, informado_domain::InformadoError> {
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(InfraError::from)?;
        Ok(Self::new(status, headers, body.to_vec()))
    }

    /// The 401 handed back when the session could not be refreshed.
    #[must_use]
    pub fn session_ended() -> Self {
        let body = serde_json::json!({ "message": REFRESH_FAILED_MESSAGE }).to_string();
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Self::new(StatusCode::UNAUTHORIZED, headers, body.into_bytes())
    }

    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Body as text, with invalid UTF-8 replaced.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Decode the body as JSON.
    ///
    /// # Errors
    /// Returns the `serde_json` error if the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}
