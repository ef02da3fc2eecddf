use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when using the twitchets API client
#[derive(Debug, Error)]
pub enum TwitchetsError {
    /// HTTP request error
    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// Non-success status returned by the server
    #[error("API error: {0}")]
    Api(ApiErrorObject),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(String),

    /// Successful status with no document in the body
    #[error("No config data received")]
    EmptyResponse,
}

/// Error details from a non-success response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorObject {
    /// HTTP status code
    #[serde(default)]
    pub status_code: Option<u16>,
    /// Human-readable error message
    #[serde(default)]
    pub message: String,
}

impl std::fmt::Display for ApiErrorObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status_code {
            Some(code) => write!(f, "{code}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl TwitchetsError {
    /// Returns the HTTP status code, if the server answered
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api(obj) => obj.status_code,
            _ => None,
        }
    }
}

/// Maps a serde deserialization error to a `TwitchetsError` with context
#[must_use]
pub fn map_deser(e: &serde_json::Error, body: &[u8]) -> TwitchetsError {
    let snippet = String::from_utf8_lossy(&body[..body.len().min(400)]).to_string();
    TwitchetsError::Serde(format!("{e}: {snippet}"))
}

/// Deserializes an API error from the response body
///
/// The server answers errors either with a JSON `{"message": ...}` object or
/// with plain text; both are accepted.
#[must_use]
pub fn deserialize_api_error(status: StatusCode, body: &[u8]) -> TwitchetsError {
    let status_code = Some(status.as_u16());

    if let Ok(mut obj) = serde_json::from_slice::<ApiErrorObject>(body) {
        obj.status_code = status_code;
        if obj.message.is_empty() {
            obj.message = status.canonical_reason().unwrap_or_default().to_string();
        }
        return TwitchetsError::Api(obj);
    }

    // Cap plain-text bodies to avoid log/memory bloat
    let text = String::from_utf8_lossy(&body[..body.len().min(400)])
        .trim()
        .to_string();
    let message = if text.is_empty() {
        status.canonical_reason().unwrap_or_default().to_string()
    } else {
        text
    };

    TwitchetsError::Api(ApiErrorObject {
        status_code,
        message,
    })
}
