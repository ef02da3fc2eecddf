#![deny(warnings)]
#![deny(clippy::all)]
#![deny(missing_docs)]

//! Async client for the twitchets configuration API, with the typed
//! configuration document it serves.

/// HTTP client implementation
pub mod client;
/// Configuration types for the client
pub mod config;
/// Error types
pub mod error;
/// API resource implementations
pub mod resources;
/// Test support utilities (for use in tests)
#[doc(hidden)]
pub mod test_support;
/// Configuration document types
pub mod types;

pub use crate::client::Client;
pub use crate::config::ApiConfig;
pub use crate::error::{ApiErrorObject, TwitchetsError};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::types::*;
    pub use crate::{ApiConfig, Client};
}
