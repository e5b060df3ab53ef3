//! Channel events - what the transport reports back to the session
//!
//! These types are the application's view of socket traffic. Transport
//! adapters produce them from raw frames; the session manager is their only
//! consumer.

use tictac_shared::ServerEvent;

/// Something happened on the game channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelEvent {
    /// The server accepted the join
    Joined,
    /// The server refused the join
    JoinRejected { reason: String },
    /// A named event pushed on the game topic
    Server(ServerEvent),
    /// A known event arrived with a payload that could not be decoded
    Malformed { event: String, error: String },
    /// The socket or the channel closed
    Closed { reason: String },
}
