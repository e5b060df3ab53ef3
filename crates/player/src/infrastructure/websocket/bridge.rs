//! WebSocket Bridge - connects the CommandBus to the platform transport.
//!
//! This module provides the `create_connection` function that sets up:
//! - A CommandBus (wrapped in port adapters) for queueing socket work
//! - A receiver of channel events for the session to route
//! - A background task that bridges both to the WebSocket transport
//!
//! Platform-specific implementations handle the differences between
//! desktop (tokio) and WASM (wasm-bindgen-futures) async runtimes.

use futures_channel::mpsc;

use crate::infrastructure::messaging::CommandBus;
use crate::ports::outbound::ChannelEvent;

use super::adapter::BusConnector;
use super::shared::TransportConfig;

/// Result of creating a connection.
///
/// - `connector`: builds the socket/channel ports the session drives
/// - `events`: everything the transport reports, in arrival order
pub struct Connection {
    pub connector: BusConnector,
    pub events: mpsc::UnboundedReceiver<ChannelEvent>,
}

/// Spawn the transport task and hand back its two ends.
///
/// Nothing touches the network until the session sends `Connect`.
pub fn create_connection(config: TransportConfig) -> Connection {
    let (command_bus, commands) = CommandBus::channel();
    let (event_tx, events) = mpsc::unbounded::<ChannelEvent>();

    #[cfg(not(target_arch = "wasm32"))]
    tokio::spawn(super::desktop::run_transport(config, commands, event_tx));

    #[cfg(target_arch = "wasm32")]
    wasm_bindgen_futures::spawn_local(super::wasm::run_transport(config, commands, event_tx));

    Connection {
        connector: BusConnector::new(command_bus),
        events,
    }
}
