//! WebSocket client for the Phoenix game channel
//!
//! Platform-specific implementations are in submodules:
//! - `desktop`: tokio-tungstenite based transport
//! - `wasm`: web-sys WebSocket based transport
//! - `core`: shared frame numbering and inbound interpretation

mod adapter;
mod bridge;
mod core;
mod shared;

#[cfg(not(target_arch = "wasm32"))]
mod desktop;

#[cfg(target_arch = "wasm32")]
mod wasm;

pub use adapter::{BusChannel, BusConnector, BusSocket};
pub use bridge::{create_connection, Connection};
pub use self::core::ChannelCore;
pub use shared::{socket_url, TransportConfig, DEFAULT_HEARTBEAT_MS, SOCKET_PATH};
