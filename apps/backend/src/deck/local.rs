//! In-process card source: standard 52-card decks shuffled with ChaCha8.
//!
//! Only the most recent shuffles are kept; older decks are retired and
//! drawing from them fails like an unknown remote deck.

use std::collections::VecDeque;

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::Mutex;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;
use uuid::Uuid;

use super::CardSource;
use crate::domain::cards::{standard_deck, CardCode};
use crate::errors::domain::DomainError;

/// Shuffled decks kept alive at once.
pub const RETAINED_DECKS: usize = 4;

pub struct LocalDeckSource {
    decks: DashMap<String, VecDeque<CardCode>>,
    shuffled: Mutex<VecDeque<String>>,
    rng: Mutex<ChaCha8Rng>,
}

impl Default for LocalDeckSource {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalDeckSource {
    pub fn new() -> Self {
        Self::from_rng(ChaCha8Rng::from_os_rng())
    }

    /// Deterministic shuffles for a given seed.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(ChaCha8Rng::seed_from_u64(seed))
    }

    fn from_rng(rng: ChaCha8Rng) -> Self {
        Self {
            decks: DashMap::new(),
            shuffled: Mutex::new(VecDeque::with_capacity(RETAINED_DECKS + 1)),
            rng: Mutex::new(rng),
        }
    }

    pub fn remaining(&self, deck_id: &str) -> Option<usize> {
        self.decks.get(deck_id).map(|deck| deck.len())
    }
}

#[async_trait]
impl CardSource for LocalDeckSource {
    async fn new_shuffled_deck(&self) -> Result<String, DomainError> {
        let mut cards: Vec<CardCode> = standard_deck().map(CardCode::from).collect();
        cards.shuffle(&mut *self.rng.lock());

        let deck_id = Uuid::new_v4().simple().to_string();
        self.decks.insert(deck_id.clone(), cards.into());

        let mut shuffled = self.shuffled.lock();
        shuffled.push_back(deck_id.clone());
        while shuffled.len() > RETAINED_DECKS {
            if let Some(retired) = shuffled.pop_front() {
                self.decks.remove(&retired);
                debug!(deck_id = %retired, "Retired local deck");
            }
        }
        debug!(deck_id = %deck_id, live = shuffled.len(), "Shuffled local deck");
        Ok(deck_id)
    }

    async fn draw(&self, deck_id: &str, count: usize) -> Result<Vec<CardCode>, DomainError> {
        let mut deck = self
            .decks
            .get_mut(deck_id)
            .ok_or_else(|| DomainError::network(format!("unknown deck {deck_id}")))?;
        if deck.len() < count {
            return Err(DomainError::network(format!(
                "deck {deck_id} has {} cards left, {count} requested",
                deck.len()
            )));
        }
        Ok(deck.drain(..count).collect())
    }
}
