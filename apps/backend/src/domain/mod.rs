//! Domain layer: pure game logic types and helpers.

pub mod board;
pub mod cards;
pub mod state;
pub mod transitions;


// Re-exports for ergonomics
pub use board::{BOARD_COLUMNS, BOARD_LAYOUT, BOARD_SIZE};
pub use cards::{card_by_code, Card, CardCode, Rank, Suit, CATALOG};
pub use state::{CellState, Field, GameDocument, GameState, PlayerColor, HAND_SIZE};
