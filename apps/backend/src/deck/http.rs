//! Client for the deck-of-cards HTTP API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use super::CardSource;
use crate::domain::cards::CardCode;
use crate::error::AppError;
use crate::errors::domain::DomainError;

pub const DEFAULT_DECK_API_URL: &str = "https://deckofcardsapi.com/api/deck";

#[derive(Debug, Deserialize)]
struct ShuffleResponse {
    success: bool,
    deck_id: String,
}

#[derive(Debug, Deserialize)]
struct DrawnCard {
    code: String,
}

#[derive(Debug, Deserialize)]
struct DrawResponse {
    success: bool,
    #[serde(default)]
    cards: Vec<DrawnCard>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Clone)]
pub struct DeckApiClient {
    http: Client,
    base_url: String,
}

impl DeckApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, AppError> {
        let http = Client::builder()
            .user_agent(concat!("sequence-backend/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|err| AppError::config("Failed to build deck API client", err))?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, DomainError> {
        let response = self.http.get(url).send().await.map_err(|err| {
            warn!(url, error = %err, "Deck API request failed");
            DomainError::network(err.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url, status = status.as_u16(), "Deck API returned an error status");
            return Err(DomainError::network(format!("deck API returned {status}")));
        }

        response
            .json::<T>()
            .await
            .map_err(|err| DomainError::network(format!("unreadable deck API payload: {err}")))
    }
}

#[async_trait]
impl CardSource for DeckApiClient {
    async fn new_shuffled_deck(&self) -> Result<String, DomainError> {
        let url = format!("{}/new/shuffle/?deck_count=1", self.base_url);
        let body: ShuffleResponse = self.get_json(&url).await?;
        if !body.success {
            return Err(DomainError::network("deck API refused to shuffle a deck"));
        }
        debug!(deck_id = %body.deck_id, "Shuffled remote deck");
        Ok(body.deck_id)
    }

    async fn draw(&self, deck_id: &str, count: usize) -> Result<Vec<CardCode>, DomainError> {
        let url = format!("{}/{deck_id}/draw/?count={count}", self.base_url);
        let body: DrawResponse = self.get_json(&url).await?;
        if !body.success || body.cards.len() != count {
            let reason = body
                .error
                .unwrap_or_else(|| format!("drew {} of {count} cards", body.cards.len()));
            return Err(DomainError::network(reason));
        }
        Ok(body
            .cards
            .into_iter()
            .map(|card| CardCode::new(card.code))
            .collect())
    }
}
