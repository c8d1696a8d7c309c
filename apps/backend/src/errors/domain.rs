//! Domain-level error type used by the store, the card sources and the
//! turn controller.
//!
//! This error type is HTTP-agnostic. Handlers return
//! `Result<T, crate::error::AppError>` and convert from `DomainError`
//! using the provided `From<DomainError> for AppError` implementation.
//!
//! Every variant is recoverable at the point of the triggering action: the
//! action is aborted and local state stays at its last known-good value.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::domain::state::PlayerColor;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Deck API unreachable, non-2xx, or answered with an unusable payload.
    NetworkFailure(String),
    /// Replication backend unreachable.
    StoreUnavailable(String),
    /// Card code not found in the catalog.
    InvalidReference(String),
    /// Board cell index outside `[0, BOARD_SIZE)`.
    InvalidCell(usize),
    /// A turn-gated action was attempted by the seat not on turn.
    OutOfTurn {
        seat: PlayerColor,
        current: PlayerColor,
    },
    /// A stored value could not be encoded or decoded.
    Codec(String),
    /// The seat's controller task is gone; no action can be processed.
    ControllerStopped(PlayerColor),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::NetworkFailure(d) => write!(f, "network failure: {d}"),
            DomainError::StoreUnavailable(d) => write!(f, "store unavailable: {d}"),
            DomainError::InvalidReference(code) => write!(f, "unknown card code: {code}"),
            DomainError::InvalidCell(cell) => write!(f, "board cell {cell} out of range"),
            DomainError::OutOfTurn { seat, current } => {
                write!(f, "{seat} acted during {current}'s turn")
            }
            DomainError::Codec(d) => write!(f, "codec error: {d}"),
            DomainError::ControllerStopped(seat) => write!(f, "{seat} controller stopped"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn network(detail: impl Into<String>) -> Self {
        Self::NetworkFailure(detail.into())
    }
    pub fn store_unavailable(detail: impl Into<String>) -> Self {
        Self::StoreUnavailable(detail.into())
    }
    pub fn invalid_reference(code: impl Into<String>) -> Self {
        Self::InvalidReference(code.into())
    }
    pub fn codec(detail: impl Into<String>) -> Self {
        Self::Codec(detail.into())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(e: serde_json::Error) -> Self {
        DomainError::codec(e.to_string())
    }
}
