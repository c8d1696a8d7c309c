//! The shared game-state document and its typed local copy.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::domain::board::BOARD_SIZE;
use crate::domain::cards::CardCode;

/// Number of cards dealt to each side by a new game.
pub const HAND_SIZE: usize = 7;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerColor {
    Blue,
    Green,
}

impl PlayerColor {
    pub const BOTH: [PlayerColor; 2] = [PlayerColor::Blue, PlayerColor::Green];

    pub fn other(self) -> Self {
        match self {
            PlayerColor::Blue => PlayerColor::Green,
            PlayerColor::Green => PlayerColor::Blue,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PlayerColor::Blue => "blue",
            PlayerColor::Green => "green",
        }
    }

    /// Document field holding this color's hand.
    pub fn hand_field(self) -> Field {
        match self {
            PlayerColor::Blue => Field::BluePlayerHand,
            PlayerColor::Green => Field::GreenPlayerHand,
        }
    }
}

impl fmt::Display for PlayerColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlayerColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "blue" => Ok(PlayerColor::Blue),
            "green" => Ok(PlayerColor::Green),
            other => Err(format!("unknown player color: {other}")),
        }
    }
}

/// Chip occupancy of one board cell.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellState {
    #[default]
    None,
    Blue,
    Green,
}

impl From<PlayerColor> for CellState {
    fn from(color: PlayerColor) -> Self {
        match color {
            PlayerColor::Blue => CellState::Blue,
            PlayerColor::Green => CellState::Green,
        }
    }
}

/// Top-level fields of the shared document, in remote-application order:
/// `currentPlayer` first so dependent coloring sees the new turn.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Field {
    CurrentPlayer,
    DeckId,
    BluePlayerHand,
    GreenPlayerHand,
    BoardState,
    DiscardImage,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::CurrentPlayer,
        Field::DeckId,
        Field::BluePlayerHand,
        Field::GreenPlayerHand,
        Field::BoardState,
        Field::DiscardImage,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Field::CurrentPlayer => "currentPlayer",
            Field::DeckId => "deckId",
            Field::BluePlayerHand => "bluePlayerHand",
            Field::GreenPlayerHand => "greenPlayerHand",
            Field::BoardState => "boardState",
            Field::DiscardImage => "discardImage",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| format!("unknown document field: {s}"))
    }
}

/// A client's local copy of the game, owned by its turn controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub current_player: PlayerColor,
    pub deck_id: Option<String>,
    pub blue_player_hand: Vec<CardCode>,
    pub green_player_hand: Vec<CardCode>,
    pub board_state: Vec<CellState>,
    pub discard_image: Option<String>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            current_player: PlayerColor::Blue,
            deck_id: None,
            blue_player_hand: Vec::new(),
            green_player_hand: Vec::new(),
            board_state: vec![CellState::None; BOARD_SIZE],
            discard_image: None,
        }
    }
}

impl GameState {
    pub fn hand(&self, color: PlayerColor) -> &[CardCode] {
        match color {
            PlayerColor::Blue => &self.blue_player_hand,
            PlayerColor::Green => &self.green_player_hand,
        }
    }

    pub fn hand_mut(&mut self, color: PlayerColor) -> &mut Vec<CardCode> {
        match color {
            PlayerColor::Blue => &mut self.blue_player_hand,
            PlayerColor::Green => &mut self.green_player_hand,
        }
    }

    /// Wire value of one field; `null` for an absent optional field.
    pub fn encode_field(&self, field: Field) -> Result<Value, serde_json::Error> {
        match field {
            Field::CurrentPlayer => serde_json::to_value(self.current_player),
            Field::DeckId => serde_json::to_value(&self.deck_id),
            Field::BluePlayerHand => serde_json::to_value(&self.blue_player_hand),
            Field::GreenPlayerHand => serde_json::to_value(&self.green_player_hand),
            Field::BoardState => serde_json::to_value(&self.board_state),
            Field::DiscardImage => serde_json::to_value(&self.discard_image),
        }
    }
}

/// A snapshot of the shared document as delivered by the store. Every field
/// may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameDocument {
    pub current_player: Option<PlayerColor>,
    pub deck_id: Option<String>,
    pub blue_player_hand: Option<Vec<CardCode>>,
    pub green_player_hand: Option<Vec<CardCode>>,
    pub board_state: Option<Vec<CellState>>,
    pub discard_image: Option<String>,
}

impl GameDocument {
    /// Decode a raw snapshot field by field. Unknown keys are ignored; a field
    /// that fails to decode, or a board of the wrong length, is dropped.
    pub fn from_json_map(raw: &Map<String, Value>) -> Self {
        let mut doc = GameDocument::default();
        for field in Field::ALL {
            if let Some(value) = raw.get(field.as_str()) {
                doc.set_raw(field, value.clone());
            }
        }
        doc
    }

    /// Decode a single raw field into the snapshot, dropping it on failure.
    pub fn set_raw(&mut self, field: Field, value: Value) {
        if value.is_null() {
            return;
        }
        let decoded = match field {
            Field::CurrentPlayer => {
                serde_json::from_value(value).map(|v| self.current_player = Some(v))
            }
            Field::DeckId => serde_json::from_value(value).map(|v| self.deck_id = Some(v)),
            Field::BluePlayerHand => {
                serde_json::from_value(value).map(|v| self.blue_player_hand = Some(v))
            }
            Field::GreenPlayerHand => {
                serde_json::from_value(value).map(|v| self.green_player_hand = Some(v))
            }
            Field::BoardState => serde_json::from_value::<Vec<CellState>>(value).map(|board| {
                if board.len() == BOARD_SIZE {
                    self.board_state = Some(board);
                } else {
                    warn!(
                        len = board.len(),
                        expected = BOARD_SIZE,
                        "Dropping boardState with wrong length"
                    );
                }
            }),
            Field::DiscardImage => {
                serde_json::from_value(value).map(|v| self.discard_image = Some(v))
            }
        };
        if let Err(err) = decoded {
            warn!(field = %field, error = %err, "Dropping undecodable document field");
        }
    }

    pub fn is_present(&self, field: Field) -> bool {
        match field {
            Field::CurrentPlayer => self.current_player.is_some(),
            Field::DeckId => self.deck_id.is_some(),
            Field::BluePlayerHand => self.blue_player_hand.is_some(),
            Field::GreenPlayerHand => self.green_player_hand.is_some(),
            Field::BoardState => self.board_state.is_some(),
            Field::DiscardImage => self.discard_image.is_some(),
        }
    }

    pub fn is_empty(&self) -> bool {
        Field::ALL.into_iter().all(|field| !self.is_present(field))
    }
}

impl From<&GameState> for GameDocument {
    fn from(state: &GameState) -> Self {
        Self {
            current_player: Some(state.current_player),
            deck_id: state.deck_id.clone(),
            blue_player_hand: Some(state.blue_player_hand.clone()),
            green_player_hand: Some(state.green_player_hand.clone()),
            board_state: Some(state.board_state.clone()),
            discard_image: state.discard_image.clone(),
        }
    }
}
