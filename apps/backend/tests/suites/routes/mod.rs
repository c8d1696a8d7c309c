pub mod error_shape;
pub mod game_document;
