//! Seat-relative projection of the game: everything a browser needs to draw
//! one player's screen.

use serde::Serialize;

use crate::domain::board::{cell_card, cell_position, highlighted_cells};
use crate::domain::cards::{card_back, card_by_image, CardCode, BLANK_CARD_IMAGE};
use crate::domain::state::{CellState, GameState, PlayerColor};

const BLUE_CHIP_IMAGE: &str = "./images/chipBlue_border_small.png";
const GREEN_CHIP_IMAGE: &str = "./images/chipGreen_border_small.png";
const BLUE_CHECK_IMAGE: &str = "./images/blue_check_mark_small.png";
const GREEN_CHECK_IMAGE: &str = "./images/green_check_mark_small.png";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HandCard {
    pub code: CardCode,
    /// Absent for codes outside the catalog.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardCellView {
    pub index: usize,
    pub row: usize,
    pub column: usize,
    pub code: &'static str,
    pub image: String,
    pub chip: CellState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chip_image: Option<&'static str>,
    /// The viewer holds this cell's card.
    pub highlighted: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientView {
    pub seat: PlayerColor,
    pub current_player: PlayerColor,
    pub your_turn: bool,
    pub hand_background: &'static str,
    pub check_mark_image: &'static str,
    pub hand: Vec<HandCard>,
    pub board: Vec<BoardCellView>,
    /// Blank placeholder unless the discard is a catalog card.
    pub discard_image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discard_code: Option<&'static str>,
    pub deck_image: String,
    pub blue_hand_size: usize,
    pub green_hand_size: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deck_id: Option<String>,
}

pub fn chip_image(chip: CellState) -> Option<&'static str> {
    match chip {
        CellState::None => None,
        CellState::Blue => Some(BLUE_CHIP_IMAGE),
        CellState::Green => Some(GREEN_CHIP_IMAGE),
    }
}

impl ClientView {
    pub fn project(state: &GameState, seat: PlayerColor) -> Self {
        let hand = state.hand(seat);
        let highlighted = highlighted_cells(hand);

        let board = state
            .board_state
            .iter()
            .zip(highlighted)
            .enumerate()
            .filter_map(|(index, (&chip, highlighted))| {
                let card = cell_card(index)?;
                let (row, column) = cell_position(index)?;
                Some(BoardCellView {
                    index,
                    row,
                    column,
                    code: card.code,
                    image: card.image(),
                    chip,
                    chip_image: chip_image(chip),
                    highlighted,
                })
            })
            .collect();

        let discarded = state.discard_image.as_deref().and_then(card_by_image);

        let (hand_background, check_mark_image) = match seat {
            PlayerColor::Blue => ("lightblue", BLUE_CHECK_IMAGE),
            PlayerColor::Green => ("lightgreen", GREEN_CHECK_IMAGE),
        };

        Self {
            seat,
            current_player: state.current_player,
            your_turn: state.current_player == seat,
            hand_background,
            check_mark_image,
            hand: hand
                .iter()
                .map(|code| HandCard {
                    code: code.clone(),
                    image: code.card().map(|card| card.image()),
                })
                .collect(),
            board,
            discard_image: discarded
                .map(|card| card.image())
                .unwrap_or_else(|| BLANK_CARD_IMAGE.to_string()),
            discard_code: discarded.map(|card| card.code),
            deck_image: card_back().image(),
            blue_hand_size: state.blue_player_hand.len(),
            green_hand_size: state.green_player_hand.len(),
            deck_id: state.deck_id.clone(),
        }
    }
}
