//! The single source of truth for the configuration document.

use twitchets_async::types::{Config, TicketConfig};

use crate::api::ConfigApi;
use crate::banner::{Banner, Notice};
use crate::error::{Result, SettingsError};
use crate::tickets;
use crate::validation::{self, AdvisoryWarning};

/// Owns the canonical [`Config`] and is the only place it changes.
///
/// The document only ever changes by wholesale replacement: a successful
/// [`load`](Self::load), or an [`update`](Self::update) whose result the
/// service accepted. `update` takes `&mut self`, so updates on one store run
/// one at a time; share a store behind `tokio::sync::Mutex` to queue updates
/// from several tasks.
pub struct ConfigStore<A> {
    api: A,
    config: Config,
    banner: Banner,
    loaded: bool,
}

impl<A: ConfigApi> ConfigStore<A> {
    /// Creates a store holding the empty default document
    pub fn new(api: A) -> Self {
        Self {
            api,
            config: Config::default(),
            banner: Banner::new(),
            loaded: false,
        }
    }

    /// Replaces the error banner, e.g. to change its expiry
    #[must_use]
    pub fn with_banner(mut self, banner: Banner) -> Self {
        self.banner = banner;
        self
    }

    pub const fn config(&self) -> &Config {
        &self.config
    }

    pub const fn api(&self) -> &A {
        &self.api
    }

    /// Whether a load has succeeded since the store was created
    pub const fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// The error notice, until it expires or is superseded
    pub fn error(&self) -> Option<&Notice> {
        self.banner.current()
    }

    pub fn has_error(&self) -> bool {
        self.banner.is_raised()
    }

    pub fn dismiss_error(&mut self) {
        self.banner.clear();
    }

    /// Advisory warnings for the current document
    pub fn warnings(&self) -> Vec<AdvisoryWarning> {
        validation::validate(&self.config)
    }

    /// Fetches the document, replacing the in-memory one.
    ///
    /// One attempt per call. On failure the previous document is kept.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Load`] if the service could not provide the
    /// document; the error is also raised on the banner.
    pub async fn load(&mut self) -> Result<()> {
        match self.api.fetch().await {
            Ok(config) => {
                tracing::info!(tickets = config.tickets.len(), "config loaded");
                self.config = config;
                self.loaded = true;
                self.banner.clear();

                for warning in self.warnings() {
                    tracing::warn!("{warning}");
                }
                Ok(())
            }
            Err(e) => {
                let err = SettingsError::Load(e);
                tracing::warn!(error = %err, "keeping previous config");
                self.banner.raise(err.to_string());
                Err(err)
            }
        }
    }

    /// Applies `mutator` to a copy of the document and persists the result.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Save`] if persisting fails; the in-memory
    /// document is rolled back and the error raised on the banner.
    pub async fn update<F>(&mut self, mutator: F) -> Result<()>
    where
        F: FnOnce(&mut Config),
    {
        self.try_update(|config| {
            mutator(config);
            Ok(())
        })
        .await
    }

    /// Like [`update`](Self::update), for edits that may be rejected.
    ///
    /// # Errors
    ///
    /// A rejection from `mutator` is returned as-is and nothing is persisted.
    /// Persistence failures behave as in [`update`](Self::update).
    pub async fn try_update<F>(&mut self, mutator: F) -> Result<()>
    where
        F: FnOnce(&mut Config) -> Result<()>,
    {
        let mut next = self.config.clone();
        if let Err(err) = mutator(&mut next) {
            tracing::debug!(error = %err, "edit rejected");
            return Err(err);
        }

        let previous = std::mem::replace(&mut self.config, next);

        match self.api.persist(&self.config).await {
            Ok(()) => {
                tracing::info!("config saved");
                self.banner.clear();
                Ok(())
            }
            Err(e) => {
                self.config = previous;
                let err = SettingsError::Save(e);
                tracing::warn!(error = %err, "rolled back config");
                self.banner.raise(err.to_string());
                Err(err)
            }
        }
    }

    /// Adds a blank ticket watch and returns its index in the sorted view
    ///
    /// # Errors
    ///
    /// See [`tickets::add_ticket`] and [`try_update`](Self::try_update).
    pub async fn add_ticket(&mut self) -> Result<usize> {
        let mut index = 0;
        self.try_update(|config| {
            index = tickets::add_ticket(config)?;
            Ok(())
        })
        .await?;
        Ok(index)
    }

    /// Replaces the ticket at `index` of the sorted view
    ///
    /// # Errors
    ///
    /// See [`tickets::update_ticket`] and [`try_update`](Self::try_update).
    pub async fn update_ticket(&mut self, index: usize, ticket: TicketConfig) -> Result<usize> {
        let mut new_index = index;
        self.try_update(|config| {
            new_index = tickets::update_ticket(config, index, ticket)?;
            Ok(())
        })
        .await?;
        Ok(new_index)
    }

    /// Removes the ticket at `index` of the sorted view
    ///
    /// # Errors
    ///
    /// See [`tickets::remove_ticket`] and [`try_update`](Self::try_update).
    pub async fn remove_ticket(&mut self, index: usize) -> Result<TicketConfig> {
        let mut removed = None;
        self.try_update(|config| {
            removed = Some(tickets::remove_ticket(config, index)?);
            Ok(())
        })
        .await?;
        removed.ok_or(SettingsError::TicketIndexOutOfRange {
            index,
            len: self.config.tickets.len(),
        })
    }
}
