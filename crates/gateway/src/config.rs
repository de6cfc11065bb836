//! Gateway client configuration.

/// Configuration for the API gateway HTTP client.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Base URL of the API gateway (e.g. `http://gateway:8080`).
    pub base_url: String,
    /// Per-request timeout in seconds (default: 10).
    pub timeout_secs: u64,
    /// Retry attempts on transport errors, on top of the initial request
    /// (default: 2). Non-success responses are never retried.
    pub max_retries: u32,
}

impl GatewayConfig {
    /// Creates a configuration with default timeout and retries.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: 10,
            max_retries: 2,
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self::new("http://localhost:8080")
    }
}
