use std::sync::Arc;
use std::time::Duration;

use sequence_backend::deck::{CardSource, DeckApiClient};
use sequence_backend::domain::cards::{standard_deck, CardCode};
use sequence_backend::domain::state::{PlayerColor, HAND_SIZE};
use sequence_backend::infra::state::build_state;
use sequence_backend::{Command, DomainError};

use super::stub_server::{start_stub_deck_api, STUB_DECK_ID};

fn client_for(base: String) -> DeckApiClient {
    DeckApiClient::new(base, Duration::from_secs(2)).unwrap()
}

#[tokio::test]
async fn shuffles_and_draws_from_the_api() {
    let (server, addr) = start_stub_deck_api().unwrap();
    let client = client_for(format!("http://{addr}/api/deck/"));

    let deck_id = client.new_shuffled_deck().await.unwrap();
    assert_eq!(deck_id, STUB_DECK_ID);

    let cards = client.draw(&deck_id, 3).await.unwrap();
    let expected: Vec<CardCode> = standard_deck().take(3).map(|c| CardCode::from(c.code)).collect();
    assert_eq!(cards, expected);

    let next = client.draw(&deck_id, 1).await.unwrap();
    assert_eq!(next, vec![CardCode::from(standard_deck().nth(3).unwrap().code)]);

    server.stop(true).await;
}

#[tokio::test]
async fn short_draw_is_a_network_failure() {
    let (server, addr) = start_stub_deck_api().unwrap();
    let client = client_for(format!("http://{addr}/api/deck"));

    let deck_id = client.new_shuffled_deck().await.unwrap();
    client.draw(&deck_id, 50).await.unwrap();
    let err = client.draw(&deck_id, 3).await.unwrap_err();
    match err {
        DomainError::NetworkFailure(reason) => assert!(reason.contains("Not enough cards")),
        other => panic!("expected NetworkFailure, got {other}"),
    }

    server.stop(true).await;
}

#[tokio::test]
async fn error_statuses_and_unknown_decks_are_network_failures() {
    let (server, addr) = start_stub_deck_api().unwrap();

    let down = client_for(format!("http://{addr}/down"));
    assert!(matches!(
        down.new_shuffled_deck().await,
        Err(DomainError::NetworkFailure(_))
    ));

    let client = client_for(format!("http://{addr}/api/deck"));
    assert!(matches!(
        client.draw("no-such-deck", 1).await,
        Err(DomainError::NetworkFailure(_))
    ));

    server.stop(true).await;
}

#[tokio::test]
async fn a_whole_deal_runs_against_the_api() {
    let (server, addr) = start_stub_deck_api().unwrap();
    let cards = Arc::new(client_for(format!("http://{addr}/api/deck")));
    let state = build_state().with_cards(cards).build().await.unwrap();

    let dealt = state
        .controller(PlayerColor::Blue)
        .dispatch(Command::StartNewGame)
        .await
        .unwrap();

    let catalog: Vec<CardCode> = standard_deck()
        .take(2 * HAND_SIZE)
        .map(|c| CardCode::from(c.code))
        .collect();
    assert_eq!(dealt.deck_id.as_deref(), Some(STUB_DECK_ID));
    assert_eq!(dealt.blue_player_hand, catalog[..HAND_SIZE]);
    assert_eq!(dealt.green_player_hand, catalog[HAND_SIZE..]);

    let drawn = state
        .controller(PlayerColor::Blue)
        .dispatch(Command::DrawCard)
        .await
        .unwrap();
    assert_eq!(drawn.blue_player_hand.len(), HAND_SIZE + 1);

    server.stop(true).await;
}
