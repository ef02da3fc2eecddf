use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};

/// Default API base URL of a locally running twitchets server
pub const TWITCHETS_DEFAULT_BASE: &str = "http://localhost:9000/api";
/// Environment variable overriding the API base URL
pub const ENV_API_BASE: &str = "TWITCHETS_API_BASE";

/// Configuration for the twitchets client
#[derive(Clone, Debug)]
pub struct ApiConfig {
    api_base: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        let api_base = std::env::var(ENV_API_BASE)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| TWITCHETS_DEFAULT_BASE.into());

        Self { api_base }
    }
}

impl ApiConfig {
    /// Creates a new configuration with default settings
    ///
    /// Reads `TWITCHETS_API_BASE` for the API base URL
    /// (defaults to `http://localhost:9000/api`).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API base URL
    #[must_use]
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    /// Returns the configured API base URL
    #[must_use]
    pub fn api_base(&self) -> &str {
        &self.api_base
    }
}

/// Configuration trait for the twitchets client
///
/// Implement this trait to route requests through a custom base URL scheme or
/// to attach extra headers (e.g. behind an authenticating proxy).
pub trait ClientConfig: Send + Sync {
    /// Returns HTTP headers to include in requests
    fn headers(&self) -> HeaderMap;

    /// Constructs the full URL for an API endpoint
    fn url(&self, path: &str) -> String;
}

impl ClientConfig for ApiConfig {
    fn headers(&self) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(ACCEPT, HeaderValue::from_static("application/json"));
        h
    }

    fn url(&self, path: &str) -> String {
        let base = self.api_base.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}
