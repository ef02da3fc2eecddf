//! Fixtures and process-global helpers shared by unit and integration tests.

use crate::types::{CommonConfig, Config, NotificationConfig, NtfyConfig, TicketConfig};

/// A populated document exercising every section and both inheritance styles:
/// fields left unset (inherit) and fields pinned to the `-1` sentinel.
#[must_use]
pub fn sample_config() -> Config {
    Config {
        api_key: "test-api-key".into(),
        refetch_time: Some("1m".into()),
        notification: NotificationConfig {
            ntfy: Some(NtfyConfig {
                url: Some("https://ntfy.example.com".into()),
                topic: Some("tickets".into()),
                ..NtfyConfig::default()
            }),
            ..NotificationConfig::default()
        },
        global: CommonConfig {
            regions: Some(["GBLO", "GBNW"].into_iter().map(String::from).collect()),
            event_similarity: Some(0.75),
            num_tickets: Some(2),
            discount: Some(25.0),
            ..CommonConfig::default()
        },
        tickets: vec![
            TicketConfig::new("Event 1"),
            TicketConfig::new("Event 2").with_common(CommonConfig {
                event_similarity: Some(0.9),
                ..CommonConfig::default()
            }),
            TicketConfig::new("Event 3").with_common(CommonConfig {
                event_similarity: Some(-1.0),
                regions: Some(Default::default()),
                num_tickets: Some(-1),
                discount: Some(-1.0),
                ..CommonConfig::default()
            }),
        ],
        ..Config::default()
    }
}

/// Restores an environment variable to its prior state when dropped.
///
/// Pair with `#[serial(env)]`: the process environment is shared by every
/// test thread.
pub struct EnvGuard {
    key: &'static str,
    prev: Option<String>,
}

impl EnvGuard {
    /// Sets `key` to `val` until the guard is dropped.
    #[must_use]
    pub fn set(key: &'static str, val: &str) -> Self {
        let guard = Self::capture(key);
        // SAFETY: callers serialize env access with `#[serial(env)]`.
        unsafe { std::env::set_var(key, val) };
        guard
    }

    /// Unsets `key` until the guard is dropped.
    #[must_use]
    pub fn remove(key: &'static str) -> Self {
        let guard = Self::capture(key);
        // SAFETY: callers serialize env access with `#[serial(env)]`.
        unsafe { std::env::remove_var(key) };
        guard
    }

    fn capture(key: &'static str) -> Self {
        Self {
            key,
            prev: std::env::var(key).ok(),
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        // SAFETY: see `EnvGuard::set`.
        match self.prev.take() {
            Some(v) => unsafe { std::env::set_var(self.key, v) },
            None => unsafe { std::env::remove_var(self.key) },
        }
    }
}
