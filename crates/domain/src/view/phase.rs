//! View phases

use crate::value_objects::Symbol;

/// Where the page is in its lifecycle
///
/// This is view-level state only; the game itself is tracked by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewPhase {
    /// Waiting for a second player (also the state before any event)
    #[default]
    Waiting,
    /// A round is in progress and `Symbol` moves next
    ActiveTurn(Symbol),
    /// The round finished; a new one can be requested
    RoundOver,
    /// The opponent disconnected
    OpponentLeft,
    /// The server refused the join (game full)
    JoinFailed,
    /// The transport closed underneath the session
    ConnectionLost,
}

impl ViewPhase {
    /// No further events are applied once a terminal phase is reached
    pub fn is_terminal(self) -> bool {
        matches!(self, ViewPhase::JoinFailed | ViewPhase::ConnectionLost)
    }
}
