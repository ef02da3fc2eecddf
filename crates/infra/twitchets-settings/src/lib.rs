//! Settings store for the twitchets ticket watcher.
//!
//! This crate provides:
//! - [`ConfigStore`]: the single owner of the configuration document, with
//!   load, copy-on-write update and rollback on failed saves
//! - [`resolve`]: two-level inheritance between the global defaults and each
//!   ticket watch, including the effective filter the scanner applies
//! - [`edit`]: validated field edits, reset-to-default and reset-to-global
//! - [`tickets`]: display ordering, filtering and index-based list edits
//! - [`draft`]: per-section draft/save/discard staging
//! - [`validation`]: advisory warnings that never block a save
//!
//! # Inheritance
//! Below the global level a common field is either absent (inherit the
//! global value), a sentinel (`-1` or empty: use the built-in default), or
//! explicit. Inherited values are resolved on every read, so a change to the
//! global defaults shows up in every linked ticket at once.
//!
//! # Example
//! ```no_run
//! use twitchets_async::Client;
//! use twitchets_settings::{ConfigStore, Draft, draft::General};
//!
//! # async fn run() -> twitchets_settings::Result<()> {
//! let mut store = ConfigStore::new(Client::new());
//! store.load().await?;
//!
//! let mut general = Draft::open(General, store.config())?;
//! general.edit().api_key = "my-key".into();
//! general.save(&mut store).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Environment Variables
//! - `TWITCHETS_API_BASE`: Override the configuration API base URL

pub mod api;
pub mod banner;
pub mod draft;
pub mod edit;
pub mod error;
pub mod mock;
pub mod resolve;
pub mod store;
pub mod tickets;
pub mod validation;

pub use api::ConfigApi;
pub use banner::{Banner, NOTICE_TTL, Notice};
pub use draft::{Draft, DraftState, Section};
pub use edit::FieldEditor;
pub use error::{FieldError, Result, SettingsError};
pub use resolve::{CommonField, EffectiveFilter, Layered, LinkState, Resolved, effective_tickets};
pub use store::ConfigStore;
pub use validation::{AdvisoryWarning, validate};
