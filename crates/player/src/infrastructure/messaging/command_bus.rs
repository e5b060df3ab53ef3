//! Command Bus for handing socket work to the transport task.
//!
//! The session and its port adapters never touch the socket directly. They
//! queue [`SocketCommand`]s here and the platform transport drains them in
//! order, so every call returns immediately.

use anyhow::Result;
use futures_channel::mpsc;

use tictac_shared::{ClientMessage, GameTopic, JoinParams, SocketParams};

/// Work queued for the transport task.
#[derive(Debug, Clone, PartialEq)]
pub enum SocketCommand {
    /// Open the socket with these URL parameters
    Connect { params: SocketParams },
    /// Send `phx_join` for `topic`
    Join { topic: GameTopic, params: JoinParams },
    /// Push a client message on `topic`
    Push {
        topic: GameTopic,
        message: ClientMessage,
    },
    /// Close the socket and stop the transport
    Disconnect,
}

impl SocketCommand {
    pub fn name(&self) -> &'static str {
        match self {
            SocketCommand::Connect { .. } => "connect",
            SocketCommand::Join { .. } => "join",
            SocketCommand::Push { message, .. } => message.event_name(),
            SocketCommand::Disconnect => "disconnect",
        }
    }
}

/// Command bus feeding the transport task.
///
/// This is a concrete struct (not a trait) that can be cloned and shared.
/// Adapters depend on this directly rather than through a trait object.
#[derive(Debug, Clone)]
pub struct CommandBus {
    tx: mpsc::UnboundedSender<SocketCommand>,
}

impl CommandBus {
    pub fn new(tx: mpsc::UnboundedSender<SocketCommand>) -> Self {
        Self { tx }
    }

    /// Create a bus together with the receiving end the transport drains.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<SocketCommand>) {
        let (tx, rx) = mpsc::unbounded();
        (Self::new(tx), rx)
    }

    /// Queue a command.
    ///
    /// Fails only when the transport task has already stopped.
    pub fn send(&self, command: SocketCommand) -> Result<()> {
        let name = command.name();
        self.tx
            .unbounded_send(command)
            .map_err(|e| anyhow::anyhow!("CommandBus send failed ({}): {}", name, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::StreamExt;
    use tictac_domain::{CellIndex, PlayerName};

    #[cfg(not(target_arch = "wasm32"))]
    #[tokio::test]
    async fn test_send_command() {
        let (bus, mut rx) = CommandBus::channel();
        let player = PlayerName::new("alice").unwrap();

        bus.send(SocketCommand::Connect {
            params: SocketParams::for_player(&player),
        })
        .unwrap();

        let received = rx.next().await.unwrap();
        assert!(matches!(received, SocketCommand::Connect { params } if params.player == player));
    }

    #[test]
    fn test_commands_keep_order() {
        let (bus, mut rx) = CommandBus::channel();
        let topic = GameTopic::for_game(&tictac_domain::GameName::new("g1").unwrap());
        let put = ClientMessage::Put {
            index: CellIndex::new(4).unwrap(),
        };

        bus.send(SocketCommand::Push {
            topic: topic.clone(),
            message: put,
        })
        .unwrap();
        bus.send(SocketCommand::Disconnect).unwrap();

        let first = rx.try_next().unwrap().unwrap();
        assert_eq!(first.name(), "put");
        assert_eq!(rx.try_next().unwrap(), Some(SocketCommand::Disconnect));
    }

    #[test]
    fn test_send_after_transport_stopped_fails() {
        let (bus, rx) = CommandBus::channel();
        drop(rx);

        let err = bus.send(SocketCommand::Disconnect).unwrap_err();
        assert!(err.to_string().contains("disconnect"));
    }
}
