//! Client configuration.

/// Default base URL for the platform API (local development backend).
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Configuration for an [`crate::ApiClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the platform API, without a trailing slash.
    pub base_url: String,
}

impl ClientConfig {
    /// Create a configuration pointing at the given base URL.
    ///
    /// A trailing slash is stripped so paths can always be joined with a
    /// leading `/`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
