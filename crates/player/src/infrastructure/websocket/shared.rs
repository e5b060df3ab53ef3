//! Shared helpers for the platform-specific WebSocket clients.
//!
//! This module is intentionally runtime-agnostic (no tokio, no web-sys) so it can
//! be used by both the desktop and WASM implementations.

use std::time::Duration;

use futures_channel::mpsc::UnboundedReceiver;
use futures_util::StreamExt;
use url::Url;

use tictac_shared::{SocketParams, SERIALIZER_VSN};

use crate::infrastructure::messaging::SocketCommand;

// Keep-alive interval (kept here so desktop + wasm stay in sync)
pub const DEFAULT_HEARTBEAT_MS: u64 = 30_000;

/// Path the Phoenix endpoint mounts its socket on
pub const SOCKET_PATH: &str = "/socket/websocket";

/// What a transport task needs to know before it starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// Socket endpoint without query parameters
    pub endpoint: Url,
    pub heartbeat: Duration,
}

impl TransportConfig {
    pub fn new(endpoint: Url) -> Self {
        Self {
            endpoint,
            heartbeat: Duration::from_millis(DEFAULT_HEARTBEAT_MS),
        }
    }

    pub fn with_heartbeat(mut self, heartbeat: Duration) -> Self {
        self.heartbeat = heartbeat;
        self
    }
}

/// Endpoint with the socket params and serializer version appended.
pub fn socket_url(endpoint: &Url, params: &SocketParams) -> Url {
    let mut url = endpoint.clone();
    {
        let mut query = url.query_pairs_mut();
        for (key, value) in params.query_pairs() {
            query.append_pair(key, &value);
        }
        query.append_pair("vsn", SERIALIZER_VSN);
    }
    url
}

/// Block until the session asks to connect.
///
/// Returns `None` when it disconnects first or drops the bus. Commands that
/// arrive before `Connect` have no socket to go to and are dropped.
pub async fn wait_for_connect(
    commands: &mut UnboundedReceiver<SocketCommand>,
) -> Option<SocketParams> {
    while let Some(command) = commands.next().await {
        match command {
            SocketCommand::Connect { params } => return Some(params),
            SocketCommand::Disconnect => return None,
            other => {
                tracing::warn!(command = other.name(), "Dropping command sent before connect")
            }
        }
    }
    None
}
