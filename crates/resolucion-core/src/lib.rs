//! Resolución Core Library
//!
//! This crate provides the wire models returned by the resolution-processing
//! backend and the client configuration shared by the API client and the CLI.

pub mod config;
pub mod models;

// Re-export commonly used types
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use models::{BatchResult, ResolutionResult, UploadStatus};
