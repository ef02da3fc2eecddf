use async_trait::async_trait;
use twitchets_async::config::ClientConfig;
use twitchets_async::types::Config;
use twitchets_async::{Client, TwitchetsError};

/// Remote home of the configuration document
#[async_trait]
pub trait ConfigApi: Send + Sync {
    /// Fetch the full document
    async fn fetch(&self) -> Result<Config, TwitchetsError>;

    /// Replace the full document
    async fn persist(&self, config: &Config) -> Result<(), TwitchetsError>;
}

#[async_trait]
impl<C: ClientConfig> ConfigApi for Client<C> {
    async fn fetch(&self) -> Result<Config, TwitchetsError> {
        self.config_document().get().await
    }

    async fn persist(&self, config: &Config) -> Result<(), TwitchetsError> {
        self.config_document().put(config).await
    }
}
