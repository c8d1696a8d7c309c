use std::sync::Arc;

use sequence_backend::domain::state::{PlayerColor, HAND_SIZE};
use sequence_backend::infra::state::build_state;
use sequence_backend::store::{RedisStore, StoreKind};
use sequence_backend::Command;
use uuid::Uuid;

use super::contract::exercise_contract;
use crate::support::cards::FlakyCards;
use crate::support::converge::wait_for_state;

fn redis_url() -> String {
    std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1/".to_string())
}

fn unique_key() -> String {
    format!("sequence-test:{}", Uuid::new_v4().simple())
}

#[tokio::test]
#[ignore = "needs a Redis server at REDIS_URL"]
async fn redis_store_honours_the_contract() {
    let store = RedisStore::connect(&redis_url(), &unique_key())
        .await
        .unwrap();
    exercise_contract(&store).await;
}

#[tokio::test]
#[ignore = "needs a Redis server at REDIS_URL"]
async fn controllers_in_separate_states_meet_through_redis() {
    let key = unique_key();
    let cards = Arc::new(FlakyCards::new(7));

    let left = build_state()
        .with_store(Arc::new(RedisStore::connect(&redis_url(), &key).await.unwrap()))
        .with_cards(cards.clone())
        .build()
        .await
        .unwrap();
    let right = build_state()
        .with_store(Arc::new(RedisStore::connect(&redis_url(), &key).await.unwrap()))
        .with_cards(cards)
        .build()
        .await
        .unwrap();
    assert_eq!(left.store_kind(), StoreKind::Redis);

    let dealt = left
        .controller(PlayerColor::Blue)
        .dispatch(Command::StartNewGame)
        .await
        .unwrap();

    let mut rx = right.controller(PlayerColor::Green).subscribe_state();
    let seen = wait_for_state(&mut rx, |s| *s == dealt).await;
    assert_eq!(seen.green_player_hand.len(), HAND_SIZE);
}
