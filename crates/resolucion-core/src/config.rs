//! Configuration module
//!
//! Client-side settings for reaching the processing backend. Values come from
//! the environment; nothing here fails, missing values fall back to defaults.

use std::env;
use std::time::Duration;

/// Base address used when no URL is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Request timeout. OCR on large PDFs can take minutes server-side.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Primary and fallback environment variables for the backend URL.
pub const BASE_URL_ENV: &str = "RESOLUCION_API_URL";
pub const BASE_URL_FALLBACK_ENV: &str = "API_BASE_URL";

/// Optional bearer token attached to every request.
pub const API_TOKEN_ENV: &str = "RESOLUCION_API_TOKEN";

/// Transport configuration, built once at startup and handed to the client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Create config from environment: RESOLUCION_API_URL (or API_BASE_URL).
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same resolution as [`ClientConfig::from_env`] over an arbitrary lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = [BASE_URL_ENV, BASE_URL_FALLBACK_ENV]
            .iter()
            .filter_map(|&key| lookup(key))
            .map(|value| value.trim().to_string())
            .find(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Self::new(base_url)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Read the optional API token. Blank values count as unset.
pub fn api_token_from_env() -> Option<String> {
    env::var(API_TOKEN_ENV)
        .ok()
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}
