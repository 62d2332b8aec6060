//! Request and response middleware composed around every API call.
//!
//! Request middleware runs in registration order before the request is sent;
//! returning `Err` rejects the call without touching the network. Response
//! middleware runs in registration order on every outcome, success or error.

use std::fmt;

use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::{Request, StatusCode};

use crate::error::{ClientError, Result};
use crate::ApiResponse;

pub trait RequestMiddleware: Send + Sync + fmt::Debug {
    fn on_request(&self, request: Request) -> Result<Request>;
}

pub trait ResponseMiddleware: Send + Sync + fmt::Debug {
    fn on_response(&self, outcome: Result<ApiResponse>) -> Result<ApiResponse>;
}

/// Attaches `Authorization: Bearer {token}` to every request.
#[derive(Clone)]
pub struct BearerAuth {
    token: String,
}

impl BearerAuth {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl fmt::Debug for BearerAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerAuth")
            .field("token", &"<redacted>")
            .finish()
    }
}

impl RequestMiddleware for BearerAuth {
    fn on_request(&self, mut request: Request) -> Result<Request> {
        let value = HeaderValue::from_str(&format!("Bearer {}", self.token))
            .map_err(|_| ClientError::Rejected("API token is not a valid header value".into()))?;
        request.headers_mut().insert(AUTHORIZATION, value);
        Ok(request)
    }
}

/// Rewrites timeouts and 422 responses into user-facing errors.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorNormalizer;

impl ResponseMiddleware for ErrorNormalizer {
    fn on_response(&self, outcome: Result<ApiResponse>) -> Result<ApiResponse> {
        outcome.map_err(|err| match err {
            ClientError::Transport(e) if e.is_timeout() => {
                tracing::warn!(error = %e, "Request timed out");
                ClientError::Timeout
            }
            ClientError::Status { status, body } if status == StatusCode::UNPROCESSABLE_ENTITY => {
                tracing::warn!(body = %body, "Backend rejected file as unprocessable");
                ClientError::InvalidFile
            }
            other => other,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn status_error(code: u16, body: &str) -> Result<ApiResponse> {
        Err(ClientError::Status {
            status: StatusCode::from_u16(code).unwrap(),
            body: body.to_string(),
        })
    }

    #[test]
    fn test_normalizer_maps_422() {
        let out = ErrorNormalizer.on_response(status_error(422, "{\"detail\":\"bad pdf\"}"));
        assert!(matches!(out, Err(ClientError::InvalidFile)));
    }

    #[test]
    fn test_normalizer_passes_other_statuses() {
        for code in [400u16, 404, 413, 500, 503] {
            let out = ErrorNormalizer.on_response(status_error(code, "detail"));
            match out {
                Err(ClientError::Status { status, body }) => {
                    assert_eq!(status.as_u16(), code);
                    assert_eq!(body, "detail");
                }
                other => panic!("unexpected outcome for {}: {:?}", code, other),
            }
        }
    }

    #[test]
    fn test_normalizer_passes_success_and_rejections() {
        let ok = ErrorNormalizer.on_response(Ok(ApiResponse {
            status: StatusCode::OK,
            body: Bytes::from_static(b"{}"),
        }));
        assert_eq!(ok.unwrap().status, StatusCode::OK);

        let rejected = ErrorNormalizer.on_response(Err(ClientError::Rejected("no".into())));
        assert!(matches!(rejected, Err(ClientError::Rejected(_))));
    }

    #[test]
    fn test_bearer_auth_sets_header() {
        let request = Request::new(
            reqwest::Method::GET,
            "http://localhost:8000/health".parse().unwrap(),
        );
        let request = BearerAuth::new("abc123").on_request(request).unwrap();
        assert_eq!(
            request.headers().get(AUTHORIZATION).unwrap(),
            "Bearer abc123"
        );
    }

    #[test]
    fn test_bearer_auth_rejects_invalid_token() {
        let request = Request::new(
            reqwest::Method::GET,
            "http://localhost:8000/health".parse().unwrap(),
        );
        let out = BearerAuth::new("bad\ntoken").on_request(request);
        assert!(matches!(out, Err(ClientError::Rejected(_))));
    }

    #[test]
    fn test_bearer_auth_debug_redacts_token() {
        let debug = format!("{:?}", BearerAuth::new("secret"));
        assert!(!debug.contains("secret"));
    }
}
