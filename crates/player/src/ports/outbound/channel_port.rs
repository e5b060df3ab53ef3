//! Realtime transport ports
//!
//! Shaped after the Phoenix socket API: a factory builds a socket for a
//! player, the socket opens channels, and a channel can be joined and pushed
//! to. Inbound traffic does not flow through these traits; adapters deliver
//! it as [`ChannelEvent`](super::ChannelEvent)s to the session's `route`.
//!
//! No method waits for the server. Every call only queues work for the
//! transport and returns.

use tictac_domain::PlayerName;
use tictac_shared::{ClientMessage, GameTopic, JoinParams};

/// Builds sockets parameterized with the current player
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait ConnectionFactory {
    fn create(&self, player: &PlayerName) -> anyhow::Result<Box<dyn SocketPort>>;
}

/// One realtime connection
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait SocketPort {
    /// Open the connection
    fn connect(&self) -> anyhow::Result<()>;

    /// Channel handle for `topic`; does not join
    fn channel(&self, topic: &GameTopic) -> anyhow::Result<Box<dyn ChannelPort>>;

    /// Close the connection
    fn disconnect(&self);
}

/// One channel subscription on a socket
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait ChannelPort {
    /// Issue the join; the outcome arrives later as a channel event
    fn join(&self, params: JoinParams) -> anyhow::Result<()>;

    /// Fire-and-forget push of a client message
    fn push(&self, message: ClientMessage) -> anyhow::Result<()>;
}
