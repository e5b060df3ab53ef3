//! Desktop WebSocket transport using tokio-tungstenite

use futures_channel::mpsc::{UnboundedReceiver, UnboundedSender};
use futures_util::{Sink, SinkExt, StreamExt};
use tokio_tungstenite::{connect_async, tungstenite::Message};

use tictac_shared::Frame;

use crate::infrastructure::messaging::SocketCommand;
use crate::infrastructure::websocket::core::ChannelCore;
use crate::infrastructure::websocket::shared::{socket_url, wait_for_connect, TransportConfig};
use crate::ports::outbound::ChannelEvent;

/// Drive one socket until the session disconnects or the server goes away.
///
/// Waits for `Connect`, opens the socket, then serves queued commands,
/// inbound frames and the heartbeat from a single loop. Anything but an
/// intentional disconnect ends with a `Closed` event.
pub async fn run_transport(
    config: TransportConfig,
    mut commands: UnboundedReceiver<SocketCommand>,
    events: UnboundedSender<ChannelEvent>,
) {
    let Some(params) = wait_for_connect(&mut commands).await else {
        tracing::debug!("Transport stopped before connecting");
        return;
    };

    let url = socket_url(&config.endpoint, &params);
    let stream = match connect_async(url.as_str()).await {
        Ok((stream, _)) => stream,
        Err(e) => {
            tracing::error!(url = %url, error = %e, "Failed to connect to game server");
            notify_closed(&events, format!("connect failed: {}", e));
            return;
        }
    };
    tracing::info!(url = %url, "Connected to game server");

    let (mut write, mut read) = stream.split();
    let mut core = ChannelCore::new();
    let mut heartbeat = tokio::time::interval(config.heartbeat);
    // The first tick completes immediately.
    heartbeat.tick().await;

    let close_reason = loop {
        tokio::select! {
            command = commands.next() => match command {
                Some(SocketCommand::Disconnect) | None => {
                    tracing::info!("Disconnect requested");
                    if let Err(e) = write.send(Message::Close(None)).await {
                        tracing::debug!(error = %e, "Close frame not sent");
                    }
                    break None;
                }
                Some(SocketCommand::Connect { .. }) => {
                    tracing::debug!("Already connected");
                }
                Some(command) => {
                    if let Some(frame) = core.frame_for(&command) {
                        if let Err(e) = send_frame(&mut write, &frame).await {
                            tracing::error!(command = command.name(), error = %e, "Failed to send frame");
                            break Some(e.to_string());
                        }
                    }
                }
            },

            message = read.next() => match message {
                Some(Ok(Message::Text(text))) => match Frame::decode(&text) {
                    Ok(frame) => {
                        if let Some(event) = core.interpret(frame) {
                            if events.unbounded_send(event).is_err() {
                                tracing::debug!("Session dropped its receiver");
                                break None;
                            }
                        }
                    }
                    Err(e) => tracing::warn!(error = %e, "Failed to parse frame"),
                },
                Some(Ok(Message::Close(frame))) => {
                    tracing::info!("Server closed connection");
                    break Some(
                        frame
                            .map(|f| f.reason.to_string())
                            .filter(|reason| !reason.is_empty())
                            .unwrap_or_else(|| "server closed connection".to_string()),
                    );
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    tracing::error!(error = %e, "WebSocket error");
                    break Some(e.to_string());
                }
                None => break Some("connection dropped".to_string()),
            },

            _ = heartbeat.tick() => {
                let frame = core.heartbeat_frame();
                if let Err(e) = send_frame(&mut write, &frame).await {
                    tracing::error!(error = %e, "Failed to send heartbeat");
                    break Some(e.to_string());
                }
            }
        }
    };

    if let Some(reason) = close_reason {
        notify_closed(&events, reason);
    }
}

async fn send_frame<S>(sink: &mut S, frame: &Frame) -> anyhow::Result<()>
where
    S: Sink<Message> + Unpin,
    S::Error: std::error::Error + Send + Sync + 'static,
{
    let text = frame.encode()?;
    sink.send(Message::Text(text)).await?;
    Ok(())
}

fn notify_closed(events: &UnboundedSender<ChannelEvent>, reason: String) {
    if events.unbounded_send(ChannelEvent::Closed { reason }).is_err() {
        tracing::debug!("Session dropped its receiver");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_channel::mpsc;
    use tictac_domain::PlayerName;
    use tictac_shared::SocketParams;

    #[tokio::test]
    async fn test_failed_connect_reports_closed() {
        let (cmd_tx, cmd_rx) = mpsc::unbounded();
        let (event_tx, mut event_rx) = mpsc::unbounded();
        let player = PlayerName::new("alice").unwrap();
        cmd_tx
            .unbounded_send(SocketCommand::Connect {
                params: SocketParams::for_player(&player),
            })
            .unwrap();
        // Port 9 (discard) is not expected to accept websocket connections.
        let endpoint = url::Url::parse("ws://127.0.0.1:9/socket/websocket").unwrap();

        run_transport(TransportConfig::new(endpoint), cmd_rx, event_tx).await;

        assert!(matches!(
            event_rx.next().await,
            Some(ChannelEvent::Closed { reason }) if reason.starts_with("connect failed")
        ));
    }
}
