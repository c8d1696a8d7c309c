//! Pure state transitions for every player action and for remote-update
//! application.
//!
//! Each transition mutates a `GameState` in place and returns the document
//! fields it touched, in the order they must be published. Callers apply
//! transitions to a working copy and only commit it once every write went
//! through.

use crate::domain::board::BOARD_SIZE;
use crate::domain::cards::CardCode;
use crate::domain::state::{CellState, Field, GameDocument, GameState, PlayerColor};
use crate::errors::domain::DomainError;

/// Fields written by a new game, in publish order.
pub const NEW_GAME_FIELDS: [Field; 6] = [
    Field::BoardState,
    Field::BluePlayerHand,
    Field::GreenPlayerHand,
    Field::DeckId,
    Field::DiscardImage,
    Field::CurrentPlayer,
];

/// Reset everything for a fresh deal.
pub fn new_game(
    state: &mut GameState,
    deck_id: String,
    blue_hand: Vec<CardCode>,
    green_hand: Vec<CardCode>,
) -> Vec<Field> {
    state.board_state = vec![CellState::None; BOARD_SIZE];
    state.blue_player_hand = blue_hand;
    state.green_player_hand = green_hand;
    state.deck_id = Some(deck_id);
    state.discard_image = None;
    state.current_player = PlayerColor::Blue;
    NEW_GAME_FIELDS.to_vec()
}

/// Append a drawn card to the acting player's hand. No hand-size cap.
pub fn draw(state: &mut GameState, actor: PlayerColor, code: CardCode) -> Vec<Field> {
    state.hand_mut(actor).push(code);
    vec![actor.hand_field()]
}

/// Toggle the actor's chip on a cell. An opponent's chip is overwritten.
pub fn place_chip(
    state: &mut GameState,
    actor: PlayerColor,
    cell: usize,
) -> Result<Vec<Field>, DomainError> {
    let slot = state
        .board_state
        .get_mut(cell)
        .ok_or(DomainError::InvalidCell(cell))?;
    let own = CellState::from(actor);
    *slot = if *slot == own { CellState::None } else { own };
    Ok(vec![Field::BoardState])
}

/// Remove one occurrence of `code` from the actor's hand and show it as the
/// discard. Only the player on turn may discard.
///
/// Returns no fields when the code is not in the hand.
pub fn discard(
    state: &mut GameState,
    actor: PlayerColor,
    code: &CardCode,
) -> Result<Vec<Field>, DomainError> {
    if actor != state.current_player {
        return Err(DomainError::OutOfTurn {
            seat: actor,
            current: state.current_player,
        });
    }
    let card = code
        .card()
        .ok_or_else(|| DomainError::invalid_reference(code.as_str()))?;

    let hand = state.hand_mut(actor);
    let Some(position) = hand.iter().position(|held| held == code) else {
        return Ok(Vec::new());
    };
    hand.remove(position);
    state.discard_image = Some(card.image());
    Ok(vec![actor.hand_field(), Field::DiscardImage])
}

pub fn end_turn(state: &mut GameState) -> Vec<Field> {
    state.current_player = state.current_player.other();
    vec![Field::CurrentPlayer]
}

/// Fold a remote snapshot into local state; the returned fields are those
/// whose value changed, `currentPlayer` first.
///
/// `deckId` and `discardImage` are nullable, so the snapshot is authoritative
/// for them: an absent value clears the local one. The other fields always
/// exist once a game is dealt and are only overwritten when present.
pub fn apply_remote(state: &mut GameState, doc: GameDocument) -> Vec<Field> {
    let mut changed = Vec::new();

    if let Some(current) = doc.current_player {
        if state.current_player != current {
            state.current_player = current;
            changed.push(Field::CurrentPlayer);
        }
    }
    if state.deck_id != doc.deck_id {
        state.deck_id = doc.deck_id;
        changed.push(Field::DeckId);
    }
    if let Some(hand) = doc.blue_player_hand {
        if state.blue_player_hand != hand {
            state.blue_player_hand = hand;
            changed.push(Field::BluePlayerHand);
        }
    }
    if let Some(hand) = doc.green_player_hand {
        if state.green_player_hand != hand {
            state.green_player_hand = hand;
            changed.push(Field::GreenPlayerHand);
        }
    }
    if let Some(board) = doc.board_state {
        if board.len() == BOARD_SIZE && state.board_state != board {
            state.board_state = board;
            changed.push(Field::BoardState);
        }
    }
    if state.discard_image != doc.discard_image {
        state.discard_image = doc.discard_image;
        changed.push(Field::DiscardImage);
    }

    changed
}
