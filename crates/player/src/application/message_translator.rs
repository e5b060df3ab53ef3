//! Translates ServerEvent from the protocol to ViewEvent for the view state machine
//!
//! This keeps the synchronizer free of wire types: it only ever sees domain
//! snapshots. Unknown events translate to `None` so newer servers can add
//! events without breaking older clients.

use tictac_domain::ViewEvent;
use tictac_shared::{ProtocolError, ServerEvent};

/// Translate a ServerEvent into a ViewEvent
pub fn translate(event: ServerEvent) -> Result<Option<ViewEvent>, ProtocolError> {
    Ok(Some(match event {
        ServerEvent::NewPlayer(payload) => ViewEvent::PlayerJoined(payload.into_snapshot()?),
        ServerEvent::SeatOpen(_) => ViewEvent::SeatOpen,
        ServerEvent::PlayerLeft => ViewEvent::PlayerLeft,
        ServerEvent::UpdateBoard(payload) => ViewEvent::BoardUpdated(payload.into_snapshot()?),
        ServerEvent::NewRound(payload) => ViewEvent::RoundStarted(payload.into_snapshot()?),
        ServerEvent::FinishGame(payload) => ViewEvent::GameFinished(payload.into_snapshot()?),
        ServerEvent::Unknown { .. } => return Ok(None),
    }))
}
