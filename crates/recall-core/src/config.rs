//! ============================================================================
//! Application Configuration - Environment-driven settings
//! ============================================================================
//! Connection parameters for Qdrant and the HTTP listener. Values come from
//! the process environment (optionally seeded from a .env file by the
//! binaries); everything has a development-friendly default.
//! ============================================================================

use serde::{Deserialize, Serialize};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Qdrant endpoint URL
    pub qdrant_url: String,
    /// Optional Qdrant API key (required for hosted clusters)
    pub qdrant_api_key: Option<String>,
    /// Name of the shared memory collection
    pub collection: String,
    /// Address the HTTP server binds to
    pub bind_addr: String,
    /// Per-request timeout for store calls, in seconds
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            qdrant_url: std::env::var("QDRANT_URL")
                .unwrap_or_else(|_| "http://localhost:6334".to_string()),
            qdrant_api_key: std::env::var("QDRANT_API_KEY").ok(),
            collection: std::env::var("MEMORY_COLLECTION")
                .unwrap_or_else(|_| "memories".to_string()),
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            request_timeout_secs: std::env::var("QDRANT_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        // Only assert fields the environment can't plausibly override in CI
        let config = AppConfig::default();
        assert!(!config.collection.is_empty());
        assert!(config.request_timeout_secs > 0);
        assert!(config.bind_addr.contains(':'));
    }
}
