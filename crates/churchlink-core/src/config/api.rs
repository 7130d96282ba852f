//! REST backend connection settings.

use serde::{Deserialize, Serialize};

/// Connection settings for the ChurchLink REST backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the backend, without the `/v1` prefix.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Bearer token sent with every request.
    #[serde(default)]
    pub token: Option<String>,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout() -> u64 {
    30
}
