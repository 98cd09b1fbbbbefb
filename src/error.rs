// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use reqwest::{Method, StatusCode};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GatewayError>;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Metrics error: {0}")]
    Metrics(#[from] prometheus::Error),

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Failed to encode payload as JSON: {0}")]
    Serialization(#[source] serde_json::Error),

    #[error("{method} {url} failed: {source}")]
    Transport {
        method: Method,
        url: String,
        source: reqwest::Error,
    },

    #[error("{operation} rejected by backend. status={status}")]
    Status {
        operation: &'static str,
        status: StatusCode,
    },

    #[error("Failed to parse JSON response (status={status}): {source}")]
    Decode {
        status: StatusCode,
        source: serde_json::Error,
    },
}

impl GatewayError {
    /// HTTP status of the response that caused the error, if one was received.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            GatewayError::Status { status, .. } | GatewayError::Decode { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, GatewayError::Transport { .. })
    }

    pub fn is_timeout(&self) -> bool {
        match self {
            GatewayError::Transport { source, .. } => source.is_timeout(),
            _ => false,
        }
    }
}
