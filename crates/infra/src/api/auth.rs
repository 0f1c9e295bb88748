//! Backend authentication endpoints over HTTP
//!
//! Implements the `AuthApi` port: login and refresh are plain JSON POSTs
//! without a bearer token.

use async_trait::async_trait;
use informado_core::{AuthApi, AuthApiError};
use informado_domain::{ApiConfig, CredentialPair, InformadoError, TokenPair};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument};

use super::response::ApiResponse;
use crate::http::HttpClient;

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

/// `AuthApi` backed by the Informado REST backend.
pub struct HttpAuthApi {
    http: HttpClient,
    login_url: String,
    refresh_url: String,
}

impl HttpAuthApi {
    #[must_use]
    pub fn new(http: HttpClient, config: &ApiConfig) -> Self {
        Self {
            http,
            login_url: config.endpoint(&config.login_path),
            refresh_url: config.endpoint(&config.refresh_path),
        }
    }

    async fn post<B, T>(&self, url: &str, body: &B) -> Result<T, AuthApiError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let request = self.http.request(Method::POST, url).json(body);
        let response = self.http.send(request).await.map_err(transport)?;
        let response = ApiResponse::read(response).await.map_err(transport)?;

        if !response.is_success() {
            debug!(%url, status = %response.status(), "Auth endpoint rejected the request");
            return Err(AuthApiError::Rejected {
                status: response.status().as_u16(),
                message: response.text(),
            });
        }

        response.json().map_err(|err| AuthApiError::Decode(err.to_string()))
    }
}

fn transport(err: InformadoError) -> AuthApiError {
    AuthApiError::Transport(err.to_string())
}

#[async_trait]
impl AuthApi for HttpAuthApi {
    #[instrument(skip(self, password))]
    async fn login(&self, email: &str, password: &str) -> Result<CredentialPair, AuthApiError> {
        self.post(&self.login_url, &LoginRequest { email, password }).await
    }

    #[instrument(skip_all)]
    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AuthApiError> {
        self.post(&self.refresh_url, &RefreshRequest { refresh_token }).await
    }
}
