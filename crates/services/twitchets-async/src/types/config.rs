//! Types for the twitchets configuration document
//!
//! Every filter field of [`CommonConfig`] is optional. On a ticket, an absent
//! field inherits the matching field of [`Config::global`]; on the global
//! object, an absent field means the scanner's built-in default applies.
//!
//! Keys these types do not model (other notification channels, per-ticket
//! notification lists) are kept in `extra` maps and written back unchanged.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Public ntfy server used when no URL is configured
pub const DEFAULT_NTFY_URL: &str = "https://ntfy.sh";

/// Placeholder reported in `Debug` output instead of secret values
const REDACTED: &str = "[REDACTED]";

/// Root configuration document
///
/// Debug output redacts `api_key`.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Twickets API key
    pub api_key: String,
    /// Country to scan listings in
    pub country: Country,
    /// Interval between listing fetches, as a Go duration string (e.g. `"1m"`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refetch_time: Option<String>,
    /// Notification channels
    pub notification: NotificationConfig,
    /// Filter defaults applied to every ticket watch
    pub global: CommonConfig,
    /// Per-event ticket watches
    pub tickets: Vec<TicketConfig>,
    /// Unmodelled top-level keys
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &redact(&self.api_key))
            .field("country", &self.country)
            .field("refetch_time", &self.refetch_time)
            .field("notification", &self.notification)
            .field("global", &self.global)
            .field("tickets", &self.tickets)
            .field("extra", &self.extra.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Countries supported by the Twickets API
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Country {
    /// United Kingdom (`GB`)
    #[default]
    #[serde(rename = "GB")]
    UnitedKingdom,
}

impl Country {
    /// Every supported country
    pub const ALL: [Self; 1] = [Self::UnitedKingdom];

    /// ISO 3166 alpha-2 code used on the wire
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::UnitedKingdom => "GB",
        }
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Notification channel configuration
///
/// Only ntfy is edited here. Other channels (gotify, telegram) live in
/// `extra`, which Debug output lists by key only.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationConfig {
    /// ntfy push notifications; `None` disables the channel
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ntfy: Option<NtfyConfig>,
    /// Other notification channels, passed through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl fmt::Debug for NotificationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationConfig")
            .field("ntfy", &self.ntfy)
            .field("extra", &self.extra.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// ntfy channel settings
///
/// Debug output redacts `password`.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NtfyConfig {
    /// Server URL; [`DEFAULT_NTFY_URL`] when unset or empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Topic to publish to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    /// Basic auth username
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Basic auth password
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl NtfyConfig {
    /// Settings for a freshly enabled channel: default server, empty credentials
    #[must_use]
    pub fn enabled_default() -> Self {
        Self {
            url: Some(DEFAULT_NTFY_URL.to_string()),
            topic: Some(String::new()),
            username: Some(String::new()),
            password: Some(String::new()),
        }
    }

    /// Server URL to publish to, falling back to [`DEFAULT_NTFY_URL`]
    #[must_use]
    pub fn effective_url(&self) -> &str {
        match self.url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => url,
            _ => DEFAULT_NTFY_URL,
        }
    }
}

impl fmt::Debug for NtfyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NtfyConfig")
            .field("url", &self.url)
            .field("topic", &self.topic)
            .field("username", &self.username)
            .field("password", &self.password.as_deref().map(redact))
            .finish()
    }
}

/// Listing filter shared by the global defaults and every ticket watch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CommonConfig {
    /// Region codes to accept; empty means all regions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regions: Option<BTreeSet<String>>,
    /// Required event name similarity, between 0.0 and 1.0
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_similarity: Option<f64>,
    /// Required number of tickets in a listing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_tickets: Option<i64>,
    /// Maximum price per ticket, fee included, in pounds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_ticket_price: Option<f64>,
    /// Minimum discount on the original price, as a percentage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
    /// Unmodelled keys, e.g. the `notification` channel list
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A watched event, with filter overrides on top of the global defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketConfig {
    /// Event name to search for
    #[serde(default)]
    pub event: String,
    /// Filter overrides; absent fields inherit from [`Config::global`]
    #[serde(flatten)]
    pub common: CommonConfig,
}

impl TicketConfig {
    /// Creates a ticket watch for `event` that inherits every filter field
    #[must_use]
    pub fn new(event: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            common: CommonConfig::default(),
        }
    }

    /// Replaces the filter overrides
    #[must_use]
    pub fn with_common(mut self, common: CommonConfig) -> Self {
        self.common = common;
        self
    }
}

fn redact(secret: &str) -> &str {
    if secret.is_empty() { secret } else { REDACTED }
}
