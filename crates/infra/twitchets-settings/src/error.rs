use thiserror::Error;
use twitchets_async::TwitchetsError;

use crate::resolve::CommonField;

/// Result alias for settings operations
pub type Result<T> = std::result::Result<T, SettingsError>;

/// Errors surfaced by the settings store and its editors
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to load config: {0}")]
    Load(#[source] TwitchetsError),

    #[error("Failed to save config: {0}")]
    Save(#[source] TwitchetsError),

    #[error(transparent)]
    Field(#[from] FieldError),

    #[error("No ticket for event '{event}'")]
    TicketNotFound { event: String },

    #[error("Ticket index {index} out of range for {len} tickets")]
    TicketIndexOutOfRange { index: usize, len: usize },

    #[error("A ticket for event '{event}' already exists")]
    DuplicateEvent { event: String },
}

impl SettingsError {
    /// Whether the error came from the configuration service rather than from
    /// a rejected edit
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Load(_) | Self::Save(_))
    }
}

/// A rejected field edit; the field keeps its previous value
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    #[error("{field} must not be negative (got {value})")]
    Negative { field: CommonField, value: f64 },

    #[error("{field} must be at most {max} (got {value})")]
    AboveMax {
        field: CommonField,
        value: f64,
        max: f64,
    },

    #[error("{field} must be a finite number")]
    NotFinite { field: CommonField },

    #[error("{field} is not numeric")]
    NotNumeric { field: CommonField },

    #[error("{field} has no global value to reset to on the global config")]
    NoParent { field: CommonField },
}
