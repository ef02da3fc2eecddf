use std::sync::Arc;

use tokio::sync::Mutex;
use twitchets_async::test_support::sample_config;
use twitchets_async::types::TicketConfig;
use twitchets_settings::draft::{Global, Ticket};
use twitchets_settings::mock::MockConfigApi;
use twitchets_settings::resolve::DEFAULT_EVENT_SIMILARITY;
use twitchets_settings::{CommonField, ConfigStore, Draft, Layered, LinkState, effective_tickets};

async fn loaded() -> (ConfigStore<MockConfigApi>, MockConfigApi) {
    let api = MockConfigApi::with_document(sample_config());
    let mut store = ConfigStore::new(api.clone());
    store.load().await.unwrap();
    (store, api)
}

fn ticket<'a>(store: &'a ConfigStore<MockConfigApi>, event: &str) -> Layered<'a> {
    let config = store.config();
    let ticket = config
        .tickets
        .iter()
        .find(|t| t.event == event)
        .unwrap();
    Layered::ticket(&ticket.common, &config.global)
}

#[tokio::test]
async fn linked_field_follows_global_changes() {
    let (mut store, _) = loaded().await;
    assert_eq!(ticket(&store, "Event 1").discount().value, Some(25.0));

    let mut global = Draft::open(Global, store.config()).unwrap();
    global.fields().set_number(CommonField::Discount, 40.0).unwrap();
    global.save(&mut store).await.unwrap();

    let resolved = ticket(&store, "Event 1").discount();
    assert_eq!(resolved.value, Some(40.0));
    assert_eq!(resolved.state, LinkState::Linked);
}

#[tokio::test]
async fn explicit_field_ignores_global_changes() {
    let (mut store, _) = loaded().await;

    store
        .update(|c| c.global.event_similarity = Some(0.5))
        .await
        .unwrap();

    let resolved = ticket(&store, "Event 2").event_similarity();
    assert_eq!(resolved.value, Some(0.9));
    assert_eq!(resolved.state, LinkState::Explicit);
}

#[tokio::test]
async fn reset_to_default_uses_builtin_not_global() {
    let (mut store, api) = loaded().await;
    let global = store.config().global.clone();
    let mut draft = Draft::open(Ticket::new("Event 1"), store.config()).unwrap();

    draft.fields(&global).reset_to_default(CommonField::EventSimilarity);
    draft.save(&mut store).await.unwrap();

    let resolved = ticket(&store, "Event 1").event_similarity();
    assert_eq!(resolved.value, None);
    assert_eq!(resolved.state, LinkState::Default);
    assert_eq!(
        ticket(&store, "Event 1").effective().event_similarity,
        DEFAULT_EVENT_SIMILARITY
    );

    // The sentinel is what goes over the wire
    let saved = api.document();
    let saved_ticket = saved.tickets.iter().find(|t| t.event == "Event 1").unwrap();
    assert_eq!(saved_ticket.common.event_similarity, Some(-1.0));
}

#[tokio::test]
async fn reset_to_global_clears_the_field() {
    let (mut store, _) = loaded().await;
    let global = store.config().global.clone();
    let mut draft = Draft::open(Ticket::new("Event 3"), store.config()).unwrap();

    draft.fields(&global).reset_to_global(CommonField::NumTickets).unwrap();
    draft.save(&mut store).await.unwrap();

    let saved = store
        .config()
        .tickets
        .iter()
        .find(|t| t.event == "Event 3")
        .unwrap();
    assert_eq!(saved.common.num_tickets, None);
    assert_eq!(ticket(&store, "Event 3").num_tickets().value, Some(2));
}

#[tokio::test]
async fn reset_to_global_on_global_is_rejected() {
    let (store, _) = loaded().await;
    let mut draft = Draft::open(Global, store.config()).unwrap();

    assert!(draft.fields().reset_to_global(CommonField::Discount).is_err());
    assert!(!draft.is_dirty());
}

#[tokio::test]
async fn effective_tickets_apply_every_layer() {
    let (store, _) = loaded().await;
    let effective = effective_tickets(store.config());

    assert_eq!(effective.len(), 3);

    let first = &effective[0].filter;
    assert_eq!(first.event_similarity, 0.75);
    assert_eq!(first.num_tickets, Some(2));
    assert_eq!(first.min_discount, Some(25.0));
    assert_eq!(first.regions.len(), 2);

    // Every field pinned to its built-in default
    let third = &effective[2].filter;
    assert_eq!(third.event_similarity, DEFAULT_EVENT_SIMILARITY);
    assert_eq!(third.num_tickets, None);
    assert_eq!(third.min_discount, None);
    assert!(third.regions.is_empty());
}

#[tokio::test]
async fn update_identity_round_trips() {
    let (mut store, api) = loaded().await;

    store.update(|_| {}).await.unwrap();
    store.load().await.unwrap();

    assert_eq!(store.config(), &sample_config());
    assert_eq!(api.persisted(), vec![sample_config()]);
}

#[tokio::test]
async fn saving_unchanged_draft_twice_persists_same_document() {
    let (mut store, api) = loaded().await;
    let mut draft = Draft::open(Global, store.config()).unwrap();

    draft.save(&mut store).await.unwrap();
    draft.save(&mut store).await.unwrap();

    let persisted = api.persisted();
    assert_eq!(persisted.len(), 2);
    assert_eq!(persisted[0], persisted[1]);
    assert_eq!(persisted[0], sample_config());
}

#[tokio::test]
async fn shared_store_applies_every_update() {
    let (store, api) = loaded().await;
    let store = Arc::new(Mutex::new(store));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = Arc::clone(&store);
            tokio::spawn(async move {
                let mut store = store.lock().await;
                store
                    .update(move |c| c.tickets.push(TicketConfig::new(format!("Gig {i}"))))
                    .await
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let store = store.lock().await;
    assert_eq!(store.config().tickets.len(), 11);
    assert_eq!(api.persisted().len(), 8);
    assert_eq!(&api.document(), store.config());
}
