//! Channel message types for the game topic
//!
//! ## Versioning Policy
//!
//! - New server events can be added at any time (forward compatible)
//! - Unknown event names decode to `ServerEvent::Unknown` and are ignored
//! - Renaming an event is a breaking change

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use tictac_domain::{
    BoardSnapshot, Cell, CellIndex, GameSnapshot, OutboundIntent, PlayerName, Score, Symbol,
};

use crate::error::ProtocolError;

// =============================================================================
// Server Events (server -> client)
// =============================================================================

/// Board as sent by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardData {
    pub data: Vec<Cell>,
}

/// Score tally as sent by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreData {
    pub x: i64,
    pub o: i64,
    pub ties: i64,
}

impl From<ScoreData> for Score {
    fn from(data: ScoreData) -> Self {
        Score {
            x_wins: data.x,
            o_wins: data.o,
            ties: data.ties,
        }
    }
}

/// Game state payload shared by every board-affecting event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GamePayload {
    pub board: BoardData,
    pub next: Symbol,
    #[serde(default)]
    pub x: Option<String>,
    #[serde(default)]
    pub o: Option<String>,
    #[serde(default)]
    pub score: Option<ScoreData>,
}

impl GamePayload {
    /// Convert into the domain snapshot.
    ///
    /// An empty seat name counts as an empty seat.
    pub fn into_snapshot(self) -> Result<GameSnapshot, ProtocolError> {
        let board = BoardSnapshot::try_from(self.board.data)?;
        let x = seat(self.x)?;
        let o = seat(self.o)?;
        let mut snapshot = GameSnapshot::new(board, self.next).with_players(x, o);
        if let Some(score) = self.score {
            snapshot = snapshot.with_score(score.into());
        }
        Ok(snapshot)
    }
}

fn seat(name: Option<String>) -> Result<Option<PlayerName>, ProtocolError> {
    match name {
        Some(name) if is_taken(&name) => Ok(Some(PlayerName::new(name)?)),
        _ => Ok(None),
    }
}

fn is_taken(name: &str) -> bool {
    !name.trim().is_empty()
}

/// Seat names of a `new_player` payload, read before anything else in it
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SeatData {
    #[serde(default)]
    pub x: Option<String>,
    #[serde(default)]
    pub o: Option<String>,
}

impl SeatData {
    pub fn both_taken(&self) -> bool {
        let taken = |name: &Option<String>| name.as_deref().is_some_and(is_taken);
        taken(&self.x) && taken(&self.o)
    }
}

/// Events pushed by the server on the game topic
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerEvent {
    NewPlayer(GamePayload),
    /// `new_player` while a seat is still free; board and score are not read
    SeatOpen(SeatData),
    PlayerLeft,
    UpdateBoard(GamePayload),
    NewRound(GamePayload),
    FinishGame(GamePayload),
    /// Any event this client does not know about
    Unknown { event: String },
}

impl ServerEvent {
    pub const NEW_PLAYER: &'static str = "new_player";
    pub const PLAYER_LEFT: &'static str = "player_left";
    pub const UPDATE_BOARD: &'static str = "update_board";
    pub const NEW_ROUND: &'static str = "new_round";
    pub const FINISH_GAME: &'static str = "finish_game";

    /// Decode an inbound event by name.
    ///
    /// Unknown names are not an error; a known name with a payload of the
    /// wrong shape is.
    pub fn decode(event: &str, payload: Value) -> Result<Self, ProtocolError> {
        let invalid = |source| ProtocolError::InvalidPayload {
            event: event.to_string(),
            source,
        };
        let game = |payload: Value| serde_json::from_value::<GamePayload>(payload).map_err(invalid);

        Ok(match event {
            Self::NEW_PLAYER => {
                let seats = SeatData::deserialize(&payload).map_err(invalid)?;
                if seats.both_taken() {
                    ServerEvent::NewPlayer(game(payload)?)
                } else {
                    ServerEvent::SeatOpen(seats)
                }
            }
            Self::PLAYER_LEFT => ServerEvent::PlayerLeft,
            Self::UPDATE_BOARD => ServerEvent::UpdateBoard(game(payload)?),
            Self::NEW_ROUND => ServerEvent::NewRound(game(payload)?),
            Self::FINISH_GAME => ServerEvent::FinishGame(game(payload)?),
            other => ServerEvent::Unknown {
                event: other.to_string(),
            },
        })
    }

    pub fn name(&self) -> &str {
        match self {
            ServerEvent::NewPlayer(_) | ServerEvent::SeatOpen(_) => Self::NEW_PLAYER,
            ServerEvent::PlayerLeft => Self::PLAYER_LEFT,
            ServerEvent::UpdateBoard(_) => Self::UPDATE_BOARD,
            ServerEvent::NewRound(_) => Self::NEW_ROUND,
            ServerEvent::FinishGame(_) => Self::FINISH_GAME,
            ServerEvent::Unknown { event } => event,
        }
    }
}

// =============================================================================
// Client Messages (client -> server)
// =============================================================================

/// Messages pushed by the client on the game topic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientMessage {
    /// Place the current player's symbol; `index` goes out as a JSON integer
    Put { index: CellIndex },
    /// Ask for a fresh round after a finished one
    NewRound,
}

impl ClientMessage {
    pub fn event_name(&self) -> &'static str {
        match self {
            ClientMessage::Put { .. } => "put",
            ClientMessage::NewRound => "new_round",
        }
    }

    pub fn payload(&self) -> Value {
        match self {
            ClientMessage::Put { index } => json!({ "index": index.value() }),
            ClientMessage::NewRound => json!({}),
        }
    }
}

impl From<OutboundIntent> for ClientMessage {
    fn from(intent: OutboundIntent) -> Self {
        match intent {
            OutboundIntent::Move { cell } => ClientMessage::Put { index: cell },
            OutboundIntent::RequestNewRound => ClientMessage::NewRound,
        }
    }
}
