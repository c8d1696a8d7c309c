use std::time::Duration;

use sequence_backend::domain::cards::CardCode;
use sequence_backend::domain::state::{Field, GameDocument, PlayerColor};
use sequence_backend::store::{read_document, GameStore, MemoryStore, Snapshot, Subscription};
use sequence_backend::DomainError;
use serde_json::json;

async fn next_snapshot(sub: &mut Subscription) -> Snapshot {
    tokio::time::timeout(Duration::from_secs(2), sub.next())
        .await
        .expect("snapshot should arrive")
        .expect("subscription should stay open")
}

async fn next_doc(sub: &mut Subscription) -> GameDocument {
    next_snapshot(sub).await.document
}

/// Behaviour every store backend must share. Expects an empty document.
pub async fn exercise_contract(store: &dyn GameStore) {
    assert!(store.read_all().await.unwrap().is_empty());
    let mut sub = store.subscribe().await.unwrap();
    assert!(next_doc(&mut sub).await.is_empty());

    let first = store
        .write_field(Field::CurrentPlayer, json!("green"))
        .await
        .unwrap();
    let doc = next_doc(&mut sub).await;
    assert_eq!(doc.current_player, Some(PlayerColor::Green));

    let second = store
        .write_field(Field::BluePlayerHand, json!(["AS", "0D"]))
        .await
        .unwrap();
    assert!(second > first);
    let doc = next_doc(&mut sub).await;
    assert_eq!(doc.current_player, Some(PlayerColor::Green));
    assert_eq!(
        doc.blue_player_hand,
        Some(vec![CardCode::from("AS"), CardCode::from("0D")])
    );

    assert_eq!(
        store.read_field(Field::CurrentPlayer).await.unwrap(),
        Some(json!("green"))
    );
    assert_eq!(store.read_field(Field::DeckId).await.unwrap(), None);

    let revision = store
        .write_field(Field::CurrentPlayer, serde_json::Value::Null)
        .await
        .unwrap();
    let snapshot = next_snapshot(&mut sub).await;
    assert_eq!(snapshot.revision, revision);
    assert!(snapshot.document.current_player.is_none());
    assert_eq!(store.read_field(Field::CurrentPlayer).await.unwrap(), None);

    let doc = read_document(store).await.unwrap();
    assert!(doc.blue_player_hand.is_some());
    assert!(doc.current_player.is_none());
}

#[tokio::test]
async fn memory_store_honours_the_contract() {
    let store = MemoryStore::new();
    exercise_contract(&store).await;
}

#[tokio::test]
async fn memory_store_subscribers_share_one_document() {
    let store = MemoryStore::new();
    let mut first = store.subscribe().await.unwrap();
    let mut second = store.subscribe().await.unwrap();
    assert_eq!(store.subscriber_count(), 2);
    next_doc(&mut first).await;
    next_doc(&mut second).await;

    store
        .write_field(Field::DeckId, json!("deck-1"))
        .await
        .unwrap();
    assert_eq!(next_doc(&mut first).await.deck_id.as_deref(), Some("deck-1"));
    assert_eq!(next_doc(&mut second).await.deck_id.as_deref(), Some("deck-1"));

    drop(first);
    store
        .write_field(Field::DeckId, json!("deck-2"))
        .await
        .unwrap();
    next_doc(&mut second).await;
    assert_eq!(store.subscriber_count(), 1);
}

#[tokio::test]
async fn offline_memory_store_refuses_every_operation() {
    let store = MemoryStore::new();
    store.set_available(false);

    let write = store.write_field(Field::DeckId, json!("x")).await;
    assert!(matches!(write, Err(DomainError::StoreUnavailable(_))));
    assert!(matches!(
        store.read_field(Field::DeckId).await,
        Err(DomainError::StoreUnavailable(_))
    ));
    assert!(store.subscribe().await.is_err());

    store.set_available(true);
    assert_eq!(store.read_field(Field::DeckId).await.unwrap(), None);
}
