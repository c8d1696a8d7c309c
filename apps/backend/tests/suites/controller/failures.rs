use sequence_backend::domain::cards::CardCode;
use sequence_backend::domain::state::{CellState, PlayerColor};
use sequence_backend::store::GameStore;
use sequence_backend::{Command, DomainError};

use crate::support::test_state::build_test_state;

#[tokio::test]
async fn store_outage_leaves_local_state_untouched() {
    let game = build_test_state(31).await;
    let blue = game.state.controller(PlayerColor::Blue);
    let before = blue.dispatch(Command::StartNewGame).await.unwrap();

    game.store.set_available(false);
    let err = blue
        .dispatch(Command::PlaceChip { cell: 5 })
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::StoreUnavailable(_)), "{err}");

    assert_eq!(blue.current().board_state[5], CellState::None);
    assert_eq!(blue.current().blue_player_hand, before.blue_player_hand);

    game.store.set_available(true);
    let state = blue.dispatch(Command::PlaceChip { cell: 5 }).await.unwrap();
    assert_eq!(state.board_state[5], CellState::Blue);
}

#[tokio::test]
async fn deck_outage_on_draw_keeps_the_hand() {
    let game = build_test_state(32).await;
    let blue = game.state.controller(PlayerColor::Blue);
    let dealt = blue.dispatch(Command::StartNewGame).await.unwrap();

    game.cards.set_offline(true);
    let err = blue.dispatch(Command::DrawCard).await.unwrap_err();
    assert!(matches!(err, DomainError::NetworkFailure(_)), "{err}");
    assert_eq!(blue.current().blue_player_hand, dealt.blue_player_hand);
}

#[tokio::test]
async fn deck_outage_on_new_game_writes_nothing() {
    let game = build_test_state(33).await;
    game.cards.set_offline(true);

    let blue = game.state.controller(PlayerColor::Blue);
    let err = blue.dispatch(Command::StartNewGame).await.unwrap_err();
    assert!(matches!(err, DomainError::NetworkFailure(_)));
    assert!(game.store.read_all().await.unwrap().is_empty());
    assert!(blue.current().blue_player_hand.is_empty());
}

#[tokio::test]
async fn drawing_before_any_deal_is_a_network_failure() {
    let game = build_test_state(34).await;
    let err = game
        .state
        .controller(PlayerColor::Green)
        .dispatch(Command::DrawCard)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NetworkFailure(_)));
}

#[tokio::test]
async fn only_the_seat_on_turn_may_discard() {
    let game = build_test_state(35).await;
    let dealt = game
        .state
        .controller(PlayerColor::Blue)
        .dispatch(Command::StartNewGame)
        .await
        .unwrap();

    let err = game
        .state
        .controller(PlayerColor::Green)
        .dispatch(Command::Discard {
            code: dealt.green_player_hand[0].clone(),
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::OutOfTurn {
            seat: PlayerColor::Green,
            current: PlayerColor::Blue
        }
    ));
}

#[tokio::test]
async fn unknown_codes_and_cells_are_rejected() {
    let game = build_test_state(36).await;
    let blue = game.state.controller(PlayerColor::Blue);

    let err = blue
        .dispatch(Command::Discard {
            code: CardCode::from("ZZ"),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidReference(_)));

    let err = blue
        .dispatch(Command::PlaceChip { cell: 100 })
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidCell(100)));
    assert!(blue.current().board_state.iter().all(|c| *c == CellState::None));
}
