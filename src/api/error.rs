//! Gateway error type

use std::fmt;

/// Errors that can occur talking to the market data API
#[derive(Debug)]
pub enum ApiError {
    /// Non-2xx response. `body` is the error payload if it parsed as JSON.
    Status {
        status: u16,
        status_text: String,
        body: Option<serde_json::Value>,
    },
    /// 2xx response whose body did not match the expected shape
    Parse(String),
    /// Connection, TLS or timeout failure
    Network(String),
    InvalidUrl(String),
}

impl ApiError {
    /// HTTP status for `Status` errors
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status {
                status,
                status_text,
                ..
            } => write!(f, "API Error: {} {}", status, status_text),
            Self::Parse(msg) => write!(f, "Failed to parse response: {}", msg),
            Self::Network(msg) => write!(f, "Network error: {}", msg),
            Self::InvalidUrl(msg) => write!(f, "Invalid URL: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Network(e.to_string())
    }
}
