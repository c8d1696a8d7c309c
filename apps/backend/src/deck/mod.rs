//! Card sources: where shuffled decks and drawn cards come from.

pub mod http;
pub mod local;

use async_trait::async_trait;

use crate::domain::cards::CardCode;
use crate::errors::domain::DomainError;

pub use http::DeckApiClient;
pub use local::LocalDeckSource;

#[async_trait]
pub trait CardSource: Send + Sync {
    /// Shuffle a fresh deck and return its identifier.
    async fn new_shuffled_deck(&self) -> Result<String, DomainError>;

    /// Draw exactly `count` cards from the top of `deck_id`.
    ///
    /// Any failure, including a short draw, is a `NetworkFailure`.
    async fn draw(&self, deck_id: &str, count: usize) -> Result<Vec<CardCode>, DomainError>;
}
