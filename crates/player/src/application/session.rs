//! Channel session manager
//!
//! Opens the socket, joins the game channel once, and from then on only
//! routes: channel events go to the synchronizer, clicks go out as pushes.
//! Nothing here waits on the server.

use tictac_domain::{CellIndex, GameName, OutboundIntent, PlayerName, ViewEvent, ViewPhase};
use tictac_shared::{ClientMessage, GameTopic, JoinParams};

use crate::application::error::SessionError;
use crate::application::message_translator;
use crate::application::synchronizer::GameViewSynchronizer;
use crate::ports::outbound::{ChannelEvent, ChannelPort, ConnectionFactory, SocketPort, ViewPort};

pub struct ChannelSessionManager<V: ViewPort> {
    socket: Box<dyn SocketPort>,
    channel: Box<dyn ChannelPort>,
    topic: GameTopic,
    synchronizer: GameViewSynchronizer<V>,
}

impl<V: ViewPort> ChannelSessionManager<V> {
    /// Connect as `player` and join `game`.
    ///
    /// Returns as soon as the join is queued; its outcome arrives later
    /// through [`route`](Self::route).
    pub fn init<F>(
        factory: &F,
        game: &GameName,
        player: &PlayerName,
        view: V,
    ) -> Result<Self, SessionError>
    where
        F: ConnectionFactory + ?Sized,
    {
        let socket = factory
            .create(player)
            .map_err(SessionError::transport("create socket"))?;
        socket
            .connect()
            .map_err(SessionError::transport("open socket"))?;

        let topic = GameTopic::for_game(game);
        let channel = socket
            .channel(&topic)
            .map_err(SessionError::transport("open channel"))?;
        channel
            .join(JoinParams::for_player(player))
            .map_err(SessionError::transport("join channel"))?;
        tracing::info!(topic = %topic, player = %player, "Joining game channel");

        Ok(Self {
            socket,
            channel,
            topic,
            synchronizer: GameViewSynchronizer::new(view),
        })
    }

    /// Single entry point for everything the transport reports.
    pub fn route(&mut self, event: ChannelEvent) {
        match event {
            ChannelEvent::Joined => {
                tracing::debug!(topic = %self.topic, "Joined game channel");
            }
            ChannelEvent::JoinRejected { reason } => {
                tracing::warn!(topic = %self.topic, reason = %reason, "Join rejected");
                self.synchronizer.handle(ViewEvent::JoinRejected);
            }
            ChannelEvent::Server(server_event) => {
                let name = server_event.name().to_string();
                match message_translator::translate(server_event) {
                    Ok(Some(view_event)) => self.synchronizer.handle(view_event),
                    Ok(None) => tracing::debug!(event = %name, "Ignoring unknown event"),
                    Err(e) => {
                        tracing::warn!(event = %name, error = %e, "Dropping event with invalid payload")
                    }
                }
            }
            ChannelEvent::Malformed { event, error } => {
                tracing::warn!(event = %event, error = %error, "Dropping undecodable event");
            }
            ChannelEvent::Closed { reason } => {
                tracing::warn!(topic = %self.topic, reason = %reason, "Connection lost");
                self.synchronizer.handle(ViewEvent::ConnectionLost);
            }
        }
    }

    /// A click on the board.
    ///
    /// `data_index` is the clicked element's `data-index` attribute. Clicks
    /// without a valid index push nothing and return `None`.
    pub fn cell_clicked(&self, data_index: Option<&str>) -> Option<OutboundIntent> {
        let Some(raw) = data_index else {
            tracing::debug!("Click without a cell index");
            return None;
        };
        let cell = match raw.parse::<CellIndex>() {
            Ok(cell) => cell,
            Err(e) => {
                tracing::debug!(data_index = %raw, error = %e, "Click on an invalid cell index");
                return None;
            }
        };

        let intent = OutboundIntent::Move { cell };
        self.send(intent);
        Some(intent)
    }

    /// A click on the "new round" button.
    pub fn new_round_clicked(&self) -> OutboundIntent {
        let intent = OutboundIntent::RequestNewRound;
        self.send(intent);
        intent
    }

    fn send(&self, intent: OutboundIntent) {
        let message = ClientMessage::from(intent);
        if let Err(e) = self.channel.push(message) {
            tracing::error!(event = message.event_name(), error = %e, "Push failed");
        }
    }

    /// Ask the socket to close.
    pub fn shutdown(&self) {
        tracing::info!(topic = %self.topic, "Leaving game");
        self.socket.disconnect();
    }

    pub fn topic(&self) -> &GameTopic {
        &self.topic
    }

    pub fn phase(&self) -> ViewPhase {
        self.synchronizer.phase()
    }

    pub fn view(&self) -> &V {
        self.synchronizer.view()
    }
}
