//! Draft/save/discard staging for the editable sections of the document.
//!
//! A [`Draft`] holds a private copy of one section. Edits touch only the copy;
//! [`Draft::save`] commits it through [`ConfigStore::try_update`] and
//! [`Draft::discard`] throws it away.

use std::fmt;

use twitchets_async::types::{
    CommonConfig, Config, Country, DEFAULT_NTFY_URL, NotificationConfig, NtfyConfig, TicketConfig,
};

use crate::api::ConfigApi;
use crate::edit::FieldEditor;
use crate::error::{Result, SettingsError};
use crate::resolve::Layered;
use crate::store::ConfigStore;
use crate::tickets;

/// One independently editable part of the document
pub trait Section {
    type Value: Clone + PartialEq + fmt::Debug;

    /// Reads the section's current value out of `config`
    ///
    /// # Errors
    ///
    /// Fails when the section no longer exists in `config`.
    fn read(&self, config: &Config) -> Result<Self::Value>;

    /// Writes `value` into `config`
    ///
    /// # Errors
    ///
    /// Fails when the value cannot be placed, e.g. on a duplicate event name.
    fn write(&self, config: &mut Config, value: Self::Value) -> Result<()>;

    /// Called once `value` has been persisted
    fn saved(&mut self, _value: &Self::Value) {}
}

/// API key, country and refetch interval
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GeneralSettings {
    pub api_key: String,
    pub country: Country,
    pub refetch_time: Option<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct General;

impl Section for General {
    type Value = GeneralSettings;

    fn read(&self, config: &Config) -> Result<GeneralSettings> {
        Ok(GeneralSettings {
            api_key: config.api_key.clone(),
            country: config.country,
            refetch_time: config.refetch_time.clone(),
        })
    }

    fn write(&self, config: &mut Config, value: GeneralSettings) -> Result<()> {
        config.api_key = value.api_key;
        config.country = value.country;
        config.refetch_time = value.refetch_time;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Notifications;

impl Section for Notifications {
    type Value = NotificationConfig;

    fn read(&self, config: &Config) -> Result<NotificationConfig> {
        Ok(config.notification.clone())
    }

    fn write(&self, config: &mut Config, value: NotificationConfig) -> Result<()> {
        config.notification = value;
        Ok(())
    }
}

/// Global defaults shared by every ticket watch
#[derive(Debug, Clone, Copy, Default)]
pub struct Global;

impl Section for Global {
    type Value = CommonConfig;

    fn read(&self, config: &Config) -> Result<CommonConfig> {
        Ok(config.global.clone())
    }

    fn write(&self, config: &mut Config, value: CommonConfig) -> Result<()> {
        config.global = value;
        Ok(())
    }
}

/// A single ticket watch, tracked by event name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    event: String,
}

impl Ticket {
    pub fn new(event: impl Into<String>) -> Self {
        Self {
            event: event.into(),
        }
    }

    /// The ticket at `index` of the sorted view
    ///
    /// # Errors
    ///
    /// Fails if `index` is out of range.
    pub fn at(config: &Config, index: usize) -> Result<Self> {
        tickets::sorted_view(&config.tickets)
            .get(index)
            .map(|t| Self::new(t.event.clone()))
            .ok_or(SettingsError::TicketIndexOutOfRange {
                index,
                len: config.tickets.len(),
            })
    }

    pub fn event(&self) -> &str {
        &self.event
    }
}

impl Section for Ticket {
    type Value = TicketConfig;

    fn read(&self, config: &Config) -> Result<TicketConfig> {
        config
            .tickets
            .iter()
            .find(|t| t.event == self.event)
            .cloned()
            .ok_or_else(|| SettingsError::TicketNotFound {
                event: self.event.clone(),
            })
    }

    fn write(&self, config: &mut Config, value: TicketConfig) -> Result<()> {
        tickets::replace_ticket(config, &self.event, value).map(|_| ())
    }

    fn saved(&mut self, value: &TicketConfig) {
        if value.event != self.event {
            tracing::debug!(from = %self.event, to = %value.event, "ticket renamed");
            self.event.clone_from(&value.event);
        }
    }
}

/// Whether a draft differs from the value it was taken from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftState {
    Clean,
    Dirty,
}

/// A private working copy of one [`Section`]
#[derive(Debug, Clone)]
pub struct Draft<S: Section> {
    section: S,
    canonical: S::Value,
    draft: S::Value,
}

impl<S: Section> Draft<S> {
    /// Starts a clean draft of `section`
    ///
    /// # Errors
    ///
    /// Fails when the section cannot be read from `config`.
    pub fn open(section: S, config: &Config) -> Result<Self> {
        let canonical = section.read(config)?;
        Ok(Self {
            section,
            draft: canonical.clone(),
            canonical,
        })
    }

    pub const fn section(&self) -> &S {
        &self.section
    }

    pub const fn value(&self) -> &S::Value {
        &self.draft
    }

    /// The value the draft was taken from
    pub const fn canonical(&self) -> &S::Value {
        &self.canonical
    }

    pub fn edit(&mut self) -> &mut S::Value {
        &mut self.draft
    }

    pub fn set(&mut self, value: S::Value) {
        self.draft = value;
    }

    pub fn is_dirty(&self) -> bool {
        self.draft != self.canonical
    }

    pub fn state(&self) -> DraftState {
        if self.is_dirty() {
            DraftState::Dirty
        } else {
            DraftState::Clean
        }
    }

    pub fn discard(&mut self) {
        self.draft = self.canonical.clone();
    }

    /// Follows an external change to the document, e.g. a reload.
    ///
    /// When the section's canonical value changed, unsaved edits are dropped
    /// in favour of the new value. Returns whether that happened.
    ///
    /// # Errors
    ///
    /// Fails when the section no longer exists in `config`.
    pub fn resync(&mut self, config: &Config) -> Result<bool> {
        let canonical = self.section.read(config)?;
        if canonical == self.canonical {
            return Ok(false);
        }
        if self.is_dirty() {
            tracing::debug!("discarding unsaved edits after external change");
        }
        self.draft = canonical.clone();
        self.canonical = canonical;
        Ok(true)
    }

    /// Commits the draft through the store.
    ///
    /// The whole document is persisted even when the draft is clean, so
    /// saving twice sends the same document twice.
    ///
    /// # Errors
    ///
    /// On a rejected edit or a failed save the draft keeps its edits and stays
    /// dirty.
    pub async fn save<A: ConfigApi>(&mut self, store: &mut ConfigStore<A>) -> Result<()> {
        let value = self.draft.clone();
        let section = &self.section;
        store.try_update(|config| section.write(config, value)).await?;

        self.section.saved(&self.draft);
        self.canonical = self.section.read(store.config())?;
        self.draft = self.canonical.clone();
        Ok(())
    }
}

impl Draft<Notifications> {
    pub const fn ntfy_enabled(&self) -> bool {
        self.draft.ntfy.is_some()
    }

    /// Enabling seeds the default server and empty credentials; disabling
    /// drops the whole block
    pub fn set_ntfy_enabled(&mut self, enabled: bool) {
        match (enabled, self.draft.ntfy.is_some()) {
            (true, false) => self.draft.ntfy = Some(NtfyConfig::enabled_default()),
            (false, true) => self.draft.ntfy = None,
            _ => {}
        }
    }

    pub fn ntfy_mut(&mut self) -> Option<&mut NtfyConfig> {
        self.draft.ntfy.as_mut()
    }

    /// The URL as shown in an input box; the default server shows as empty
    pub fn ntfy_url_input(&self) -> &str {
        match self.draft.ntfy.as_ref().and_then(|n| n.url.as_deref()) {
            Some(url) if url != DEFAULT_NTFY_URL => url,
            _ => "",
        }
    }

    /// Stores an input box URL; empty input stores the default server
    pub fn set_ntfy_url_input(&mut self, input: &str) {
        if let Some(ntfy) = self.draft.ntfy.as_mut() {
            let input = input.trim();
            ntfy.url = Some(if input.is_empty() {
                DEFAULT_NTFY_URL.to_string()
            } else {
                input.to_string()
            });
        }
    }
}

impl Draft<Global> {
    pub fn fields(&mut self) -> FieldEditor<'_> {
        FieldEditor::global(&mut self.draft)
    }

    pub fn resolved(&self) -> Layered<'_> {
        Layered::global(&self.draft)
    }
}

impl Draft<Ticket> {
    /// Edits the draft's filter fields against the saved global defaults
    pub fn fields<'a>(&'a mut self, global: &'a CommonConfig) -> FieldEditor<'a> {
        FieldEditor::ticket(&mut self.draft.common, global)
    }

    pub fn resolved<'a>(&'a self, global: &'a CommonConfig) -> Layered<'a> {
        Layered::ticket(&self.draft.common, global)
    }

    pub fn set_event(&mut self, event: impl Into<String>) {
        self.draft.event = event.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockConfigApi;
    use crate::resolve::{CommonField, LinkState};
    use twitchets_async::test_support::sample_config;

    async fn store() -> (ConfigStore<MockConfigApi>, MockConfigApi) {
        let api = MockConfigApi::with_document(sample_config());
        let mut store = ConfigStore::new(api.clone());
        store.load().await.unwrap();
        (store, api)
    }

    #[tokio::test]
    async fn edit_marks_dirty_and_discard_restores() {
        let (store, _) = store().await;
        let mut draft = Draft::open(General, store.config()).unwrap();
        assert_eq!(draft.state(), DraftState::Clean);

        draft.edit().api_key = "other".into();
        assert_eq!(draft.state(), DraftState::Dirty);

        draft.discard();
        assert_eq!(draft.state(), DraftState::Clean);
        assert_eq!(draft.value().api_key, "test-api-key");
    }

    #[tokio::test]
    async fn reverting_an_edit_by_hand_is_clean() {
        let (store, _) = store().await;
        let mut draft = Draft::open(General, store.config()).unwrap();
        draft.edit().api_key = "other".into();
        draft.edit().api_key = "test-api-key".into();
        assert!(!draft.is_dirty());
    }

    #[tokio::test]
    async fn save_commits_and_cleans() {
        let (mut store, api) = store().await;
        let mut draft = Draft::open(General, store.config()).unwrap();
        draft.edit().refetch_time = Some("5m".into());

        draft.save(&mut store).await.unwrap();

        assert!(!draft.is_dirty());
        assert_eq!(store.config().refetch_time.as_deref(), Some("5m"));
        assert_eq!(api.document().refetch_time.as_deref(), Some("5m"));
    }

    #[tokio::test]
    async fn failed_save_stays_dirty() {
        let (mut store, api) = store().await;
        api.set_fail_persist(true);
        let mut draft = Draft::open(General, store.config()).unwrap();
        draft.edit().api_key = "abc".into();

        assert!(draft.save(&mut store).await.is_err());

        assert!(draft.is_dirty());
        assert_eq!(draft.value().api_key, "abc");
        assert_eq!(store.config().api_key, "test-api-key");
        assert!(store.has_error());
    }

    #[tokio::test]
    async fn resync_overwrites_unsaved_edits() {
        let (mut store, api) = store().await;
        let mut draft = Draft::open(General, store.config()).unwrap();
        draft.edit().api_key = "local".into();

        let mut remote = sample_config();
        remote.api_key = "remote".into();
        api.set_document(remote);
        store.load().await.unwrap();

        assert!(draft.resync(store.config()).unwrap());
        assert_eq!(draft.value().api_key, "remote");
        assert!(!draft.is_dirty());
    }

    #[tokio::test]
    async fn resync_without_change_keeps_edits() {
        let (mut store, _) = store().await;
        let mut draft = Draft::open(General, store.config()).unwrap();
        draft.edit().api_key = "local".into();

        store.load().await.unwrap();

        assert!(!draft.resync(store.config()).unwrap());
        assert_eq!(draft.value().api_key, "local");
    }

    #[tokio::test]
    async fn ticket_rename_rekeys_draft() {
        let (mut store, _) = store().await;
        let mut draft = Draft::open(Ticket::new("Event 2"), store.config()).unwrap();
        draft.set_event("Event 9");

        draft.save(&mut store).await.unwrap();

        assert_eq!(draft.section().event(), "Event 9");
        assert_eq!(draft.value().event, "Event 9");
        assert!(tickets::find_ticket(&store.config().tickets, "Event 2").is_none());
        assert_eq!(tickets::find_ticket(&store.config().tickets, "Event 9"), Some(2));
    }

    #[tokio::test]
    async fn ticket_rename_onto_existing_event_is_rejected() {
        let (mut store, api) = store().await;
        let mut draft = Draft::open(Ticket::new("Event 2"), store.config()).unwrap();
        draft.set_event("Event 1");

        let err = draft.save(&mut store).await.unwrap_err();

        assert!(matches!(err, SettingsError::DuplicateEvent { .. }));
        assert!(draft.is_dirty());
        assert_eq!(draft.section().event(), "Event 2");
        assert!(api.persisted().is_empty());
    }

    #[tokio::test]
    async fn duplicated_ticket_saves_without_rename() {
        let api = MockConfigApi::with_document(Config {
            tickets: vec![TicketConfig::new("Oasis"), TicketConfig::new("Oasis")],
            ..Config::default()
        });
        let mut store = ConfigStore::new(api.clone());
        store.load().await.unwrap();

        let mut draft = Draft::open(Ticket::new("Oasis"), store.config()).unwrap();
        draft.edit().common.discount = Some(10.0);
        draft.save(&mut store).await.unwrap();

        assert_eq!(store.config().tickets[0].common.discount, Some(10.0));
        assert_eq!(api.persisted().len(), 1);
    }

    #[tokio::test]
    async fn ticket_at_sorted_index() {
        let (store, _) = store().await;
        let ticket = Ticket::at(store.config(), 1).unwrap();
        assert_eq!(ticket.event(), "Event 2");
        assert!(Ticket::at(store.config(), 3).is_err());
    }

    #[tokio::test]
    async fn ticket_draft_resolves_against_global() {
        let (store, _) = store().await;
        let global = store.config().global.clone();
        let mut draft = Draft::open(Ticket::new("Event 1"), store.config()).unwrap();

        assert_eq!(draft.resolved(&global).discount().value, Some(25.0));
        assert_eq!(draft.resolved(&global).state(CommonField::Discount), LinkState::Linked);

        draft.fields(&global).set_number(CommonField::Discount, 40.0).unwrap();
        assert_eq!(draft.resolved(&global).state(CommonField::Discount), LinkState::Explicit);
        assert!(draft.is_dirty());
    }

    #[tokio::test]
    async fn global_draft_fields() {
        let (mut store, _) = store().await;
        let mut draft = Draft::open(Global, store.config()).unwrap();
        draft.fields().set_number(CommonField::NumTickets, 4.0).unwrap();
        assert_eq!(draft.resolved().num_tickets().value, Some(4));

        draft.save(&mut store).await.unwrap();
        assert_eq!(store.config().global.num_tickets, Some(4));
    }

    #[test]
    fn enabling_ntfy_seeds_defaults() {
        let mut draft = Draft::open(Notifications, &Config::default()).unwrap();
        assert!(!draft.ntfy_enabled());

        draft.set_ntfy_enabled(true);
        assert_eq!(draft.value().ntfy, Some(NtfyConfig::enabled_default()));
        assert_eq!(draft.ntfy_url_input(), "");

        draft.ntfy_mut().unwrap().topic = Some("gigs".into());
        // Enabling again keeps the edits
        draft.set_ntfy_enabled(true);
        assert_eq!(draft.value().ntfy.as_ref().unwrap().topic.as_deref(), Some("gigs"));

        draft.set_ntfy_enabled(false);
        assert_eq!(draft.value().ntfy, None);
    }

    #[test]
    fn ntfy_url_input_maps_empty_to_default() {
        let mut draft = Draft::open(Notifications, &sample_config()).unwrap();
        assert_eq!(draft.ntfy_url_input(), "https://ntfy.example.com");

        draft.set_ntfy_url_input("");
        assert_eq!(
            draft.value().ntfy.as_ref().unwrap().url.as_deref(),
            Some(DEFAULT_NTFY_URL)
        );
        assert_eq!(draft.ntfy_url_input(), "");

        draft.set_ntfy_url_input(" https://push.example.org ");
        assert_eq!(draft.ntfy_url_input(), "https://push.example.org");
    }
}
