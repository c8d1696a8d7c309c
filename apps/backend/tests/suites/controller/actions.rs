use sequence_backend::domain::board::BOARD_SIZE;
use sequence_backend::domain::cards::{card_by_code, CardCode};
use sequence_backend::domain::state::{CellState, PlayerColor, HAND_SIZE};
use sequence_backend::Command;

use crate::support::converge::wait_for_state;
use crate::support::test_state::build_test_state;

#[tokio::test]
async fn new_game_deals_two_disjoint_hands_on_a_clear_board() {
    let game = build_test_state(11).await;
    let blue = game.state.controller(PlayerColor::Blue);

    let state = blue.dispatch(Command::StartNewGame).await.unwrap();

    assert_eq!(state.blue_player_hand.len(), HAND_SIZE);
    assert_eq!(state.green_player_hand.len(), HAND_SIZE);
    assert!(state
        .blue_player_hand
        .iter()
        .all(|code| !state.green_player_hand.contains(code)));
    assert_eq!(state.board_state.len(), BOARD_SIZE);
    assert!(state.board_state.iter().all(|c| *c == CellState::None));
    assert_eq!(state.current_player, PlayerColor::Blue);
    assert!(state.deck_id.is_some());
    assert!(state.discard_image.is_none());
}

#[tokio::test]
async fn draw_adds_one_card_to_the_actor_only() {
    let game = build_test_state(12).await;
    let blue = game.state.controller(PlayerColor::Blue);
    let dealt = blue.dispatch(Command::StartNewGame).await.unwrap();

    let state = blue.dispatch(Command::DrawCard).await.unwrap();

    assert_eq!(state.blue_player_hand.len(), HAND_SIZE + 1);
    assert_eq!(state.blue_player_hand[..HAND_SIZE], dealt.blue_player_hand[..]);
    assert_eq!(state.green_player_hand, dealt.green_player_hand);
    assert_eq!(state.deck_id, dealt.deck_id);
}

#[tokio::test]
async fn drawing_is_allowed_out_of_turn() {
    let game = build_test_state(13).await;
    game.state
        .controller(PlayerColor::Blue)
        .dispatch(Command::StartNewGame)
        .await
        .unwrap();
    let green = game.state.controller(PlayerColor::Green);
    let mut rx = green.subscribe_state();
    wait_for_state(&mut rx, |s| s.deck_id.is_some()).await;

    let state = green.dispatch(Command::DrawCard).await.unwrap();
    assert_eq!(state.green_player_hand.len(), HAND_SIZE + 1);
    assert_eq!(state.current_player, PlayerColor::Blue);
}

#[tokio::test]
async fn placing_twice_on_the_same_cell_clears_it() {
    let game = build_test_state(14).await;
    let blue = game.state.controller(PlayerColor::Blue);

    let once = blue.dispatch(Command::PlaceChip { cell: 5 }).await.unwrap();
    assert_eq!(once.board_state[5], CellState::Blue);

    let twice = blue.dispatch(Command::PlaceChip { cell: 5 }).await.unwrap();
    assert_eq!(twice.board_state[5], CellState::None);
}

#[tokio::test]
async fn discard_moves_card_to_the_discard_pile() {
    let game = build_test_state(15).await;
    let blue = game.state.controller(PlayerColor::Blue);
    let dealt = blue.dispatch(Command::StartNewGame).await.unwrap();
    let code = dealt.blue_player_hand[0].clone();

    let state = blue
        .dispatch(Command::Discard { code: code.clone() })
        .await
        .unwrap();

    assert_eq!(state.blue_player_hand.len(), HAND_SIZE - 1);
    let expected = card_by_code(code.as_str()).map(|card| card.image());
    assert_eq!(state.discard_image, expected);
}

#[tokio::test]
async fn discarding_a_card_not_held_changes_nothing() {
    let game = build_test_state(16).await;
    let blue = game.state.controller(PlayerColor::Blue);
    let dealt = blue.dispatch(Command::StartNewGame).await.unwrap();
    let missing = dealt.green_player_hand[0].clone();

    let state = blue
        .dispatch(Command::Discard { code: missing })
        .await
        .unwrap();
    assert_eq!(state, dealt);
}

#[tokio::test]
async fn end_turn_hands_control_to_the_other_seat() {
    let game = build_test_state(17).await;
    let blue = game.state.controller(PlayerColor::Blue);

    let state = blue.dispatch(Command::EndTurn).await.unwrap();
    assert_eq!(state.current_player, PlayerColor::Green);

    let state = blue.dispatch(Command::EndTurn).await.unwrap();
    assert_eq!(state.current_player, PlayerColor::Blue);
}

#[tokio::test]
async fn a_new_game_resets_board_and_discard() {
    let game = build_test_state(18).await;
    let blue = game.state.controller(PlayerColor::Blue);
    let dealt = blue.dispatch(Command::StartNewGame).await.unwrap();
    blue.dispatch(Command::PlaceChip { cell: 42 }).await.unwrap();
    blue.dispatch(Command::Discard {
        code: dealt.blue_player_hand[0].clone(),
    })
    .await
    .unwrap();
    blue.dispatch(Command::EndTurn).await.unwrap();

    let fresh = blue.dispatch(Command::StartNewGame).await.unwrap();
    assert!(fresh.board_state.iter().all(|c| *c == CellState::None));
    assert!(fresh.discard_image.is_none());
    assert_eq!(fresh.current_player, PlayerColor::Blue);
    assert_ne!(fresh.deck_id, dealt.deck_id);
    assert!(!fresh.blue_player_hand.contains(&CardCode::from("BK")));
}
