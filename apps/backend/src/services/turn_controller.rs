//! Per-seat turn controller: owns the seat's local copy of the game and
//! turns commands into store writes.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::deck::CardSource;
use crate::domain::cards::CardCode;
use crate::domain::state::{Field, GameState, PlayerColor, HAND_SIZE};
use crate::domain::transitions;
use crate::errors::domain::DomainError;
use crate::store::{GameStore, Snapshot};

/// A player action, always performed as the controller's own seat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    StartNewGame,
    DrawCard,
    PlaceChip { cell: usize },
    Discard { code: CardCode },
    EndTurn,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::StartNewGame => f.write_str("start_new_game"),
            Command::DrawCard => f.write_str("draw_card"),
            Command::PlaceChip { cell } => write!(f, "place_chip({cell})"),
            Command::Discard { code } => write!(f, "discard({code})"),
            Command::EndTurn => f.write_str("end_turn"),
        }
    }
}

pub struct TurnController {
    seat: PlayerColor,
    state: GameState,
    /// Store revision of this controller's most recent successful write.
    written_revision: u64,
    store: Arc<dyn GameStore>,
    cards: Arc<dyn CardSource>,
}

impl TurnController {
    pub fn new(seat: PlayerColor, store: Arc<dyn GameStore>, cards: Arc<dyn CardSource>) -> Self {
        Self {
            seat,
            state: GameState::default(),
            written_revision: 0,
            store,
            cards,
        }
    }

    pub fn seat(&self) -> PlayerColor {
        self.seat
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn store(&self) -> &Arc<dyn GameStore> {
        &self.store
    }

    /// Run one command to completion. On error the local state is untouched.
    pub async fn handle(&mut self, command: &Command) -> Result<(), DomainError> {
        let result = match command {
            Command::StartNewGame => self.start_new_game().await,
            Command::DrawCard => self.draw_card().await,
            Command::PlaceChip { cell } => self.place_chip(*cell).await,
            Command::Discard { code } => self.discard(code).await,
            Command::EndTurn => self.end_turn().await,
        };
        if let Err(err) = &result {
            warn!(seat = %self.seat, command = %command, error = %err, "Action aborted");
        }
        result
    }

    /// Shuffle a fresh deck, deal both hands and reset the board. The six
    /// document fields are written one after another.
    pub async fn start_new_game(&mut self) -> Result<(), DomainError> {
        let deck_id = self.cards.new_shuffled_deck().await?;
        let blue = self.cards.draw(&deck_id, HAND_SIZE).await?;
        let green = self.cards.draw(&deck_id, HAND_SIZE).await?;

        let mut next = self.state.clone();
        let fields = transitions::new_game(&mut next, deck_id, blue, green);
        self.commit(next, &fields).await?;
        info!(seat = %self.seat, deck_id = ?self.state.deck_id, "New game dealt");
        Ok(())
    }

    pub async fn draw_card(&mut self) -> Result<(), DomainError> {
        let deck_id = self
            .state
            .deck_id
            .clone()
            .ok_or_else(|| DomainError::network("no deck has been shuffled yet"))?;
        let code = self
            .cards
            .draw(&deck_id, 1)
            .await?
            .pop()
            .ok_or_else(|| DomainError::network("deck returned no card"))?;

        let mut next = self.state.clone();
        let fields = transitions::draw(&mut next, self.seat, code);
        self.commit(next, &fields).await
    }

    pub async fn place_chip(&mut self, cell: usize) -> Result<(), DomainError> {
        let mut next = self.state.clone();
        let fields = transitions::place_chip(&mut next, self.seat, cell)?;
        self.commit(next, &fields).await
    }

    pub async fn discard(&mut self, code: &CardCode) -> Result<(), DomainError> {
        let mut next = self.state.clone();
        let fields = transitions::discard(&mut next, self.seat, code)?;
        if fields.is_empty() {
            debug!(seat = %self.seat, code = %code, "Discarded card not in hand");
        }
        self.commit(next, &fields).await
    }

    pub async fn end_turn(&mut self) -> Result<(), DomainError> {
        let mut next = self.state.clone();
        let fields = transitions::end_turn(&mut next);
        self.commit(next, &fields).await
    }

    /// Fold a store snapshot into local state; returns the fields that changed.
    ///
    /// Snapshots older than this controller's last write predate state it has
    /// already committed and are dropped.
    pub fn apply_remote(&mut self, snapshot: Snapshot) -> Vec<Field> {
        if snapshot.revision < self.written_revision {
            debug!(
                seat = %self.seat,
                revision = snapshot.revision,
                written = self.written_revision,
                "Skipping snapshot older than own write"
            );
            return Vec::new();
        }
        let changed = transitions::apply_remote(&mut self.state, snapshot.document);
        if !changed.is_empty() {
            debug!(seat = %self.seat, changed = ?changed, "Applied remote update");
        }
        changed
    }

    /// Write `fields` of `next` in order, then adopt `next` as local state.
    async fn commit(&mut self, next: GameState, fields: &[Field]) -> Result<(), DomainError> {
        for &field in fields {
            let value = next.encode_field(field)?;
            let revision = self.store.write_field(field, value).await?;
            self.written_revision = self.written_revision.max(revision);
        }
        self.state = next;
        Ok(())
    }
}
