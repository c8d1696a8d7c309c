//! Fixed board layout: 100 positions on a 10x10 grid, each permanently
//! associated with a card code.

use crate::domain::cards::{card_by_code, Card, CardCode};

pub const BOARD_COLUMNS: usize = 10;
pub const BOARD_SIZE: usize = BOARD_COLUMNS * BOARD_COLUMNS;

/// Card code per board position, row-major.
#[rustfmt::skip]
pub static BOARD_LAYOUT: [&str; BOARD_SIZE] = [
    "BK", "2S", "3S", "4S", "5S", "6S", "7S", "8S", "9S", "BK",
    "6C", "5C", "4C", "3C", "2C", "AH", "KH", "QH", "0H", "0S",
    "7C", "AS", "2D", "3D", "4D", "5D", "6D", "7D", "9H", "QS",
    "8C", "KS", "6C", "5C", "4C", "3C", "2C", "8D", "8H", "KS",
    "9C", "QS", "7C", "6H", "5H", "4H", "AH", "9D", "7H", "AS",
    "0C", "0S", "8C", "7H", "2H", "3H", "KH", "0D", "6H", "2D",
    "QC", "9S", "9C", "8H", "9H", "0H", "QH", "QD", "5H", "3D",
    "KC", "8S", "0C", "QC", "KC", "AC", "AD", "KD", "4H", "4D",
    "AC", "7S", "6S", "5S", "4S", "3S", "2S", "2H", "3H", "5D",
    "BK", "AD", "KD", "QD", "0D", "9D", "8D", "7D", "6D", "BK",
];

pub fn cell_code(index: usize) -> Option<&'static str> {
    BOARD_LAYOUT.get(index).copied()
}

pub fn cell_card(index: usize) -> Option<&'static Card> {
    cell_code(index).and_then(card_by_code)
}

/// (row, column) of a board position.
pub fn cell_position(index: usize) -> Option<(usize, usize)> {
    (index < BOARD_SIZE).then(|| (index / BOARD_COLUMNS, index % BOARD_COLUMNS))
}

/// Positions carrying the given code.
pub fn cells_for_code(code: &str) -> impl Iterator<Item = usize> + '_ {
    BOARD_LAYOUT
        .iter()
        .enumerate()
        .filter(move |(_, cell)| **cell == code)
        .map(|(index, _)| index)
}

/// Per-cell flag: does the hand hold the card printed on this cell?
pub fn highlighted_cells(hand: &[CardCode]) -> Vec<bool> {
    BOARD_LAYOUT
        .iter()
        .map(|cell| hand.iter().any(|code| code.as_str() == *cell))
        .collect()
}
