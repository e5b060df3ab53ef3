//! tictac Shared - wire protocol for the game channel
//!
//! This crate contains every type that crosses the socket:
//! - Phoenix channel frames (JSON serializer v2)
//! - Inbound server events and their payloads
//! - Outbound client messages
//! - Socket and join parameters
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - Only serde, serde_json, thiserror and the domain crate
//! 2. **No view logic** - Pure data types and serialization
//! 3. **WASM compatible** - Must compile for both native and wasm32 targets

pub mod error;
pub mod frame;
pub mod messages;
pub mod params;

pub use error::ProtocolError;
pub use frame::{channel_events, Frame, Reply, ReplyStatus, PHOENIX_TOPIC, SERIALIZER_VSN};
pub use messages::{BoardData, ClientMessage, GamePayload, ScoreData, SeatData, ServerEvent};
pub use params::{GameTopic, JoinParams, SocketParams};
