use std::sync::Arc;

use tracing::info;

use crate::config::app::{Config, DeckSourceKind};
use crate::deck::{CardSource, DeckApiClient, LocalDeckSource};
use crate::domain::state::PlayerColor;
use crate::error::AppError;
use crate::services::dispatch::spawn_controller;
use crate::services::turn_controller::TurnController;
use crate::state::app_state::AppState;
use crate::store::{GameStore, MemoryStore, RedisStore};

/// Builder for creating AppState instances (used in both tests and main)
#[derive(Default)]
pub struct StateBuilder {
    config: Option<Config>,
    store: Option<Arc<dyn GameStore>>,
    cards: Option<Arc<dyn CardSource>>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick the store and card source from configuration.
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Use this store regardless of configuration.
    pub fn with_store(mut self, store: Arc<dyn GameStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Use this card source regardless of configuration.
    pub fn with_cards(mut self, cards: Arc<dyn CardSource>) -> Self {
        self.cards = Some(cards);
        self
    }

    /// Resolve the store and card source, then start one controller per seat.
    pub async fn build(self) -> Result<AppState, AppError> {
        let config = self.config;

        let store: Arc<dyn GameStore> = match (self.store, config.as_ref()) {
            (Some(store), _) => store,
            (None, Some(Config {
                redis_url: Some(url),
                game_key,
                ..
            })) => Arc::new(RedisStore::connect(url, game_key).await?),
            (None, _) => Arc::new(MemoryStore::new()),
        };

        let cards: Arc<dyn CardSource> = match (self.cards, config.as_ref()) {
            (Some(cards), _) => cards,
            (None, Some(config)) => match config.deck_source {
                DeckSourceKind::Remote => Arc::new(DeckApiClient::new(
                    config.deck_api_url.clone(),
                    config.deck_api_timeout,
                )?),
                DeckSourceKind::Local => Arc::new(match config.deck_seed {
                    Some(seed) => LocalDeckSource::with_seed(seed),
                    None => LocalDeckSource::new(),
                }),
            },
            (None, None) => Arc::new(LocalDeckSource::new()),
        };

        let blue = spawn_controller(TurnController::new(
            PlayerColor::Blue,
            store.clone(),
            cards.clone(),
        ))
        .await?;
        let green =
            spawn_controller(TurnController::new(PlayerColor::Green, store.clone(), cards))
                .await?;

        info!(store = %store.kind(), "Application state ready");
        Ok(AppState::new(store, blue, green))
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
