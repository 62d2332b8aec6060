//! Error types for the API client
//!
//! Every operation returns [`ClientError`]. Timeouts and 422 responses are
//! rewritten into user-facing messages by [`crate::middleware::ErrorNormalizer`];
//! all other failures keep their original detail.

use std::path::PathBuf;

use reqwest::StatusCode;

pub const TIMEOUT_MESSAGE: &str = "Tiempo de espera agotado. El archivo es muy grande.";
pub const INVALID_FILE_MESSAGE: &str = "Archivo inválido. Verifica el formato PDF.";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("{}", TIMEOUT_MESSAGE)]
    Timeout,

    #[error("{}", INVALID_FILE_MESSAGE)]
    InvalidFile,

    #[error("API request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Failed to send request: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Failed to parse response as JSON: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Request rejected: {0}")]
    Rejected(String),

    #[error("Invalid multipart part: {0}")]
    Multipart(#[source] reqwest::Error),

    #[error("Failed to read file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create HTTP client: {0}")]
    Build(#[source] reqwest::Error),
}

impl ClientError {
    /// HTTP status carried by the error, if the backend answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::InvalidFile => Some(StatusCode::UNPROCESSABLE_ENTITY),
            ClientError::Transport(e) => e.status(),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ClientError::Timeout)
    }

    pub fn is_invalid_file(&self) -> bool {
        matches!(self, ClientError::InvalidFile)
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
