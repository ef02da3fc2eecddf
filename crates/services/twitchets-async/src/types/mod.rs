//! Configuration document served by `GET /config` and accepted by `PUT /config`

/// Root document, notification and ticket filter types
pub mod config;
/// Known Twickets region codes
pub mod region;

pub use config::*;
pub use region::{REGIONS, Region};
