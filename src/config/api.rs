//! API connection settings

use crate::api::DEFAULT_BASE_URL;
use sha2::{Digest, Sha256};

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    /// Bearer token; never printed, see [`ApiConfig::key_fingerprint`]
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ApiConfig {
    /// First 16 hex chars of the key's SHA-256, for display
    pub fn key_fingerprint(&self) -> Option<String> {
        self.api_key.as_ref().map(|key| {
            let mut hasher = Sha256::new();
            hasher.update(key.as_bytes());
            let hash = hasher.finalize();
            format!("{:x}", hash)[..16].to_string()
        })
    }
}
