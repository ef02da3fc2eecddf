use super::api::ConfigApi;
use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use twitchets_async::types::Config;
use twitchets_async::{ApiErrorObject, TwitchetsError};

#[derive(Default)]
struct MockState {
    document: Config,
    fail_fetch: bool,
    fail_persist: bool,
    fetches: usize,
    persisted: Vec<Config>,
}

/// In-memory configuration service for testing
///
/// Clones share state, so a test can keep a handle after moving one into a
/// store.
#[derive(Clone, Default)]
pub struct MockConfigApi {
    state: Arc<Mutex<MockState>>,
}

impl MockConfigApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(document: Config) -> Self {
        let mock = Self::new();
        mock.set_document(document);
        mock
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the served document, as another writer would
    pub fn set_document(&self, document: Config) {
        self.lock().document = document;
    }

    pub fn document(&self) -> Config {
        self.lock().document.clone()
    }

    pub fn set_fail_fetch(&self, fail: bool) {
        self.lock().fail_fetch = fail;
    }

    pub fn set_fail_persist(&self, fail: bool) {
        self.lock().fail_persist = fail;
    }

    pub fn fetch_count(&self) -> usize {
        self.lock().fetches
    }

    /// Every document successfully persisted, oldest first
    pub fn persisted(&self) -> Vec<Config> {
        self.lock().persisted.clone()
    }
}

fn unavailable(message: &str) -> TwitchetsError {
    TwitchetsError::Api(ApiErrorObject {
        status_code: Some(500),
        message: message.to_string(),
    })
}

#[async_trait]
impl ConfigApi for MockConfigApi {
    async fn fetch(&self) -> Result<Config, TwitchetsError> {
        let mut state = self.lock();
        state.fetches += 1;
        if state.fail_fetch {
            return Err(unavailable("Mock fetch failed"));
        }
        Ok(state.document.clone())
    }

    async fn persist(&self, config: &Config) -> Result<(), TwitchetsError> {
        let mut state = self.lock();
        if state.fail_persist {
            return Err(unavailable("Mock persist failed"));
        }
        state.document = config.clone();
        state.persisted.push(config.clone());
        Ok(())
    }
}
