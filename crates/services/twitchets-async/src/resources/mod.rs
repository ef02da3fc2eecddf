//! API resource implementations for the twitchets client

/// Configuration document resource
pub mod config;

pub use config::ConfigDocument;
