use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use bi_core::auth::BearerToken;
use bi_core::ports::ApiError;

use super::error::{http_error, transport_error};

/// reqwest-backed client for the BrainInk backend.
///
/// Implements both [`bi_core::ports::SchoolApiPort`] and
/// [`bi_core::ports::AuthApiPort`].
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    /// `timeout` of `None` keeps reqwest's default (no overall timeout).
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ApiError::Transport(format!("failed to build HTTP client: {e}")))?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) fn get(&self, token: &BearerToken, path: &str) -> RequestBuilder {
        self.client.get(self.url(path)).bearer_auth(token.expose())
    }

    pub(crate) fn post(&self, token: &BearerToken, path: &str) -> RequestBuilder {
        self.client.post(self.url(path)).bearer_auth(token.expose())
    }

    pub(crate) fn post_anonymous(&self, path: &str) -> RequestBuilder {
        self.client.post(self.url(path))
    }

    /// Send a request and return the body of a 2xx response.
    pub(crate) async fn send(&self, request: RequestBuilder) -> Result<String, ApiError> {
        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        let url = response.url().path().to_string();
        let body = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            let err = http_error(status, &body);
            warn!(path = %url, status = status.as_u16(), error = %err, "backend returned an error");
            return Err(err);
        }

        debug!(path = %url, status = status.as_u16(), bytes = body.len(), "backend response");
        Ok(body)
    }

    /// Send a request and decode a JSON success body.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let body = self.send(request).await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}
