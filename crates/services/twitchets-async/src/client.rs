use serde::{Serialize, de::DeserializeOwned};

use crate::{config::ClientConfig, error::TwitchetsError};

/// twitchets configuration API client
///
/// The client is generic over a [`ClientConfig`] implementation that provides
/// the base URL and request headers. Every call is a single attempt; callers
/// decide whether to try again.
#[derive(Debug, Clone)]
pub struct Client<C: ClientConfig> {
    http: reqwest::Client,
    config: C,
}

impl Client<crate::config::ApiConfig> {
    /// Creates a new client with default configuration
    ///
    /// Uses `TWITCHETS_API_BASE` for a custom API base URL.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(crate::config::ApiConfig::new())
    }
}

impl<C: ClientConfig + Default> Default for Client<C> {
    fn default() -> Self {
        Self::with_config(C::default())
    }
}

impl<C: ClientConfig> Client<C> {
    /// Creates a new client with the given configuration.
    ///
    /// # Panics
    ///
    /// Panics if the reqwest client cannot be built.
    #[must_use]
    pub fn with_config(config: C) -> Self {
        Self {
            http: reqwest::Client::builder()
                .connect_timeout(std::time::Duration::from_secs(5))
                .timeout(std::time::Duration::from_secs(60))
                .build()
                .expect("reqwest client"),
            config,
        }
    }

    /// Returns a reference to the client's configuration
    #[must_use]
    pub const fn config(&self) -> &C {
        &self.config
    }

    pub(crate) async fn get<O>(&self, path: &str) -> Result<O, TwitchetsError>
    where
        O: DeserializeOwned,
    {
        let request = self
            .http
            .get(self.config.url(path))
            .headers(self.config.headers())
            .build()?;

        let bytes = self.execute_raw(request).await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(TwitchetsError::EmptyResponse);
        }

        serde_json::from_slice(&bytes).map_err(|e| crate::error::map_deser(&e, &bytes))
    }

    pub(crate) async fn put<I>(&self, path: &str, body: &I) -> Result<(), TwitchetsError>
    where
        I: Serialize + Sync,
    {
        let request = self
            .http
            .put(self.config.url(path))
            .headers(self.config.headers())
            .json(body)
            .build()?;

        // Response body carries nothing useful on success
        self.execute_raw(request).await.map(drop)
    }

    async fn execute_raw(&self, request: reqwest::Request) -> Result<bytes::Bytes, TwitchetsError> {
        tracing::debug!(method = %request.method(), url = %request.url(), "sending request");

        let response = self
            .http
            .execute(request)
            .await
            .map_err(TwitchetsError::Reqwest)?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(TwitchetsError::Reqwest)?;

        if status.is_success() {
            return Ok(bytes);
        }

        let err = crate::error::deserialize_api_error(status, &bytes);
        tracing::warn!(%status, error = %err, "request failed");
        Err(err)
    }
}
