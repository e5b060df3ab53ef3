//! Command Bus messaging infrastructure.
//!
//! - `CommandBus`: queue socket work for the transport (fire-and-forget)
//!
//! Inbound traffic travels the other way as [`ChannelEvent`]s on a plain
//! unbounded receiver; the WebSocket bridge (in the websocket module) wires
//! both ends to the actual transport.
//!
//! [`ChannelEvent`]: crate::ports::outbound::ChannelEvent

pub mod command_bus;

pub use command_bus::{CommandBus, SocketCommand};
