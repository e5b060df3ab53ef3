//! Port adapters backed by the command bus
//!
//! Every call turns into a [`SocketCommand`] for the transport task and
//! returns at once. The same adapters serve desktop and wasm; only the task
//! draining the bus differs.

use anyhow::Result;

use tictac_domain::PlayerName;
use tictac_shared::{ClientMessage, GameTopic, JoinParams, SocketParams};

use crate::infrastructure::messaging::{CommandBus, SocketCommand};
use crate::ports::outbound::{ChannelPort, ConnectionFactory, SocketPort};

/// Builds [`BusSocket`]s that share one transport.
#[derive(Debug, Clone)]
pub struct BusConnector {
    bus: CommandBus,
}

impl BusConnector {
    pub fn new(bus: CommandBus) -> Self {
        Self { bus }
    }
}

impl ConnectionFactory for BusConnector {
    fn create(&self, player: &PlayerName) -> Result<Box<dyn SocketPort>> {
        Ok(Box::new(BusSocket {
            bus: self.bus.clone(),
            params: SocketParams::for_player(player),
        }))
    }
}

#[derive(Debug, Clone)]
pub struct BusSocket {
    bus: CommandBus,
    params: SocketParams,
}

impl SocketPort for BusSocket {
    fn connect(&self) -> Result<()> {
        self.bus.send(SocketCommand::Connect {
            params: self.params.clone(),
        })
    }

    fn channel(&self, topic: &GameTopic) -> Result<Box<dyn ChannelPort>> {
        Ok(Box::new(BusChannel {
            bus: self.bus.clone(),
            topic: topic.clone(),
        }))
    }

    fn disconnect(&self) {
        if let Err(e) = self.bus.send(SocketCommand::Disconnect) {
            tracing::debug!(error = %e, "Transport already stopped");
        }
    }
}

#[derive(Debug, Clone)]
pub struct BusChannel {
    bus: CommandBus,
    topic: GameTopic,
}

impl ChannelPort for BusChannel {
    fn join(&self, params: JoinParams) -> Result<()> {
        self.bus.send(SocketCommand::Join {
            topic: self.topic.clone(),
            params,
        })
    }

    fn push(&self, message: ClientMessage) -> Result<()> {
        self.bus.send(SocketCommand::Push {
            topic: self.topic.clone(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tictac_domain::{CellIndex, GameName};

    fn drain(
        rx: &mut futures_channel::mpsc::UnboundedReceiver<SocketCommand>,
    ) -> Vec<SocketCommand> {
        let mut commands = Vec::new();
        while let Ok(Some(command)) = rx.try_next() {
            commands.push(command);
        }
        commands
    }

    #[test]
    fn test_socket_and_channel_queue_commands_in_order() {
        let (bus, mut rx) = CommandBus::channel();
        let connector = BusConnector::new(bus);
        let player = PlayerName::new("alice").unwrap();
        let topic = GameTopic::for_game(&GameName::new("g1").unwrap());

        let socket = connector.create(&player).unwrap();
        socket.connect().unwrap();
        let channel = socket.channel(&topic).unwrap();
        channel.join(JoinParams::for_player(&player)).unwrap();
        channel
            .push(ClientMessage::Put {
                index: CellIndex::new(4).unwrap(),
            })
            .unwrap();
        socket.disconnect();

        assert_eq!(
            drain(&mut rx),
            vec![
                SocketCommand::Connect {
                    params: SocketParams::for_player(&player)
                },
                SocketCommand::Join {
                    topic: topic.clone(),
                    params: JoinParams::for_player(&player)
                },
                SocketCommand::Push {
                    topic,
                    message: ClientMessage::Put {
                        index: CellIndex::new(4).unwrap()
                    }
                },
                SocketCommand::Disconnect,
            ]
        );
    }

    #[test]
    fn test_push_fails_once_transport_is_gone() {
        let (bus, rx) = CommandBus::channel();
        let topic = GameTopic::for_game(&GameName::new("g1").unwrap());
        let channel = BusChannel { bus, topic };
        drop(rx);

        assert!(channel.push(ClientMessage::NewRound).is_err());
    }
}
