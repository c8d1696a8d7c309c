//! Error codes for the Sequence backend API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses and websocket error frames.

use core::fmt;

/// Centralized error codes for the Sequence backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request Validation
    /// Path or query parameter could not be parsed
    BadRequest,
    /// Unknown player color in a route or query
    InvalidColor,
    /// Unknown document field name
    InvalidField,
    /// Board cell index outside the layout
    InvalidCell,
    /// Card code not present in the catalog
    InvalidReference,

    // Turn Rules
    /// Action gated on the current player was attempted by the other seat
    OutOfTurn,

    // Resource Not Found
    /// Requested document field is absent
    FieldNotFound,

    // Upstream / System Errors
    /// Remote card deck could not be reached or answered badly
    DeckUnavailable,
    /// Shared game-state store could not be reached
    StoreUnavailable,
    /// The seat's controller task is no longer running
    ControllerStopped,
    /// Internal server error
    InternalError,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BadRequest => "BAD_REQUEST",
            Self::InvalidColor => "INVALID_COLOR",
            Self::InvalidField => "INVALID_FIELD",
            Self::InvalidCell => "INVALID_CELL",
            Self::InvalidReference => "INVALID_REFERENCE",
            Self::OutOfTurn => "OUT_OF_TURN",
            Self::FieldNotFound => "FIELD_NOT_FOUND",
            Self::DeckUnavailable => "DECK_UNAVAILABLE",
            Self::StoreUnavailable => "STORE_UNAVAILABLE",
            Self::ControllerStopped => "CONTROLLER_STOPPED",
            Self::InternalError => "INTERNAL_ERROR",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
