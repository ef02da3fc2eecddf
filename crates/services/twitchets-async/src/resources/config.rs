use crate::{client::Client, config::ClientConfig, error::TwitchetsError, types::Config};

/// API resource for the `/config` endpoint
pub struct ConfigDocument<'c, C: ClientConfig> {
    client: &'c Client<C>,
}

impl<'c, C: ClientConfig> ConfigDocument<'c, C> {
    /// Creates a new configuration document resource
    #[must_use]
    pub const fn new(client: &'c Client<C>) -> Self {
        Self { client }
    }

    /// Fetches the full configuration document
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the server answers with a
    /// non-success status, or the body is empty or not a valid document.
    pub async fn get(&self) -> Result<Config, TwitchetsError> {
        self.client.get("/config").await
    }

    /// Replaces the full configuration document
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server answers with a
    /// non-success status.
    pub async fn put(&self, config: &Config) -> Result<(), TwitchetsError> {
        self.client.put("/config", config).await
    }
}

// Add accessor to client
impl<C: ClientConfig> crate::Client<C> {
    /// Returns the configuration document resource
    #[must_use]
    pub const fn config_document(&self) -> ConfigDocument<'_, C> {
        ConfigDocument::new(self)
    }
}
