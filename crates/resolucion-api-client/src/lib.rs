//! Shared HTTP client for the resolution-processing API.
//!
//! Provides one configured transport client with request/response middleware,
//! a typed error taxonomy, and the document service facade (single submit,
//! batch submit, health probe). The CLI uses this crate directly.

pub mod api;
pub mod error;
pub mod middleware;
pub mod upload;

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, StatusCode};
use resolucion_core::ClientConfig;
use serde::de::DeserializeOwned;

pub use error::{ClientError, Result};
pub use middleware::{BearerAuth, ErrorNormalizer, RequestMiddleware, ResponseMiddleware};

/// A fully buffered response. Bodies are read inside the transport call so
/// that a timeout while streaming the body is classified like any other.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

impl ApiResponse {
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(ClientError::Decode)
    }
}

/// HTTP client for the processing backend. Build once and share; clones
/// reuse the same connection pool and middleware.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    config: ClientConfig,
    request_middleware: Vec<Arc<dyn RequestMiddleware>>,
    response_middleware: Vec<Arc<dyn ResponseMiddleware>>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.config.base_url)
            .field("timeout", &self.config.timeout)
            .field("request_middleware", &self.request_middleware)
            .field("response_middleware", &self.response_middleware)
            .finish()
    }
}

impl ApiClient {
    /// Build a client from config. [`ErrorNormalizer`] is always the first
    /// response middleware.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(ClientError::Build)?;

        Ok(Self {
            client,
            config,
            request_middleware: Vec::new(),
            response_middleware: vec![Arc::new(ErrorNormalizer)],
        })
    }

    /// Create client from environment (RESOLUCION_API_URL or API_BASE_URL).
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env())
    }

    pub fn with_request_middleware(
        mut self,
        middleware: impl RequestMiddleware + 'static,
    ) -> Self {
        self.request_middleware.push(Arc::new(middleware));
        self
    }

    pub fn with_response_middleware(
        mut self,
        middleware: impl ResponseMiddleware + 'static,
    ) -> Self {
        self.response_middleware.push(Arc::new(middleware));
        self
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    /// GET request. Returns the buffered response on any 2xx.
    pub async fn get(&self, path: &str) -> Result<ApiResponse> {
        self.send(self.client.get(self.build_url(path))).await
    }

    /// POST multipart form and deserialize the JSON body.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T> {
        let request = self.client.post(self.build_url(path)).multipart(form);
        self.send(request).await?.json()
    }

    /// Run a request through the middleware chain.
    pub async fn send(&self, request: RequestBuilder) -> Result<ApiResponse> {
        let outcome = self.dispatch(request).await;
        self.response_middleware
            .iter()
            .fold(outcome, |outcome, middleware| middleware.on_response(outcome))
    }

    async fn dispatch(&self, request: RequestBuilder) -> Result<ApiResponse> {
        let mut request = request.build().map_err(ClientError::Transport)?;
        for middleware in &self.request_middleware {
            request = middleware.on_request(request)?;
        }

        tracing::debug!(method = %request.method(), url = %request.url(), "Sending request");

        let response = self
            .client
            .execute(request)
            .await
            .map_err(ClientError::Transport)?;

        let status = response.status();
        let body = response.bytes().await.map_err(ClientError::Transport)?;

        tracing::debug!(status = %status, bytes = body.len(), "Received response");

        if !status.is_success() {
            return Err(ClientError::Status {
                status,
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        Ok(ApiResponse { status, body })
    }
}

// Re-export domain types for convenience.
pub use api::DocumentService;
pub use resolucion_core::{BatchResult, ResolutionResult, UploadStatus};
pub use upload::{DocumentFile, UploadForm};

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_base_url_matches_config() {
        let client = ApiClient::new(ClientConfig::new("https://api.example.org/")).unwrap();
        assert_eq!(client.base_url(), "https://api.example.org");
        assert_eq!(
            client.build_url("/procesar-lote/"),
            "https://api.example.org/procesar-lote/"
        );
    }

    #[test]
    fn test_default_config() {
        let client = ApiClient::new(ClientConfig::default()).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.config().timeout, Duration::from_secs(300));
    }

    #[test]
    fn test_normalizer_installed_first() {
        let client = ApiClient::new(ClientConfig::default()).unwrap();
        assert_eq!(client.response_middleware.len(), 1);
        assert!(format!("{:?}", client).contains("ErrorNormalizer"));
    }

    #[test]
    fn test_api_response_json() {
        let response = ApiResponse {
            status: StatusCode::OK,
            body: Bytes::from_static(b"{\"status\":\"ok\"}"),
        };
        let value: serde_json::Value = response.json().unwrap();
        assert_eq!(value["status"], "ok");

        let broken = ApiResponse {
            status: StatusCode::OK,
            body: Bytes::from_static(b"<html>"),
        };
        assert!(matches!(
            broken.json::<serde_json::Value>(),
            Err(ClientError::Decode(_))
        ));
    }
}
