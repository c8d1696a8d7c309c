use serde::{Deserialize, Serialize};

use crate::domain::cards::CardCode;
use crate::domain::state::PlayerColor;
use crate::protocol::view::ClientView;
use crate::services::turn_controller::Command;

pub const PROTOCOL_VERSION: i32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMsg {
    Hello { protocol: i32 },
    NewGame,
    DrawCard,
    PlaceChip { cell: usize },
    Discard { code: CardCode },
    EndTurn,
}

impl ClientMsg {
    /// The controller command this message asks for; `None` for handshake frames.
    pub fn command(&self) -> Option<Command> {
        match self {
            ClientMsg::Hello { .. } => None,
            ClientMsg::NewGame => Some(Command::StartNewGame),
            ClientMsg::DrawCard => Some(Command::DrawCard),
            ClientMsg::PlaceChip { cell } => Some(Command::PlaceChip { cell: *cell }),
            ClientMsg::Discard { code } => Some(Command::Discard { code: code.clone() }),
            ClientMsg::EndTurn => Some(Command::EndTurn),
        }
    }
}

#[allow(clippy::large_enum_variant)]
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMsg {
    HelloAck {
        protocol: i32,
        seat: PlayerColor,
    },

    State {
        view: ClientView,
    },

    Error {
        code: ErrorCode,
        /// Backend error code (e.g. `OUT_OF_TURN`) for rejected actions.
        #[serde(skip_serializing_if = "Option::is_none")]
        reason: Option<&'static str>,
        message: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    BadProtocol,
    BadRequest,
    ActionRejected,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::BadProtocol => "bad_protocol",
            ErrorCode::BadRequest => "bad_request",
            ErrorCode::ActionRejected => "action_rejected",
        }
    }
}
