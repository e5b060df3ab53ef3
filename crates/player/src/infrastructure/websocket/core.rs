//! Platform-agnostic core logic for the Phoenix channel client.
//!
//! This is deliberately free of any runtime / platform dependencies (tokio, web-sys, etc).
//! Platform clients (desktop/wasm) own the actual socket and call into this core for shared
//! behaviors: numbering outbound frames and deciding what an inbound frame means for the
//! joined game channel.

use tictac_shared::{
    channel_events, ClientMessage, Frame, GameTopic, JoinParams, ReplyStatus, ServerEvent,
};

use crate::infrastructure::messaging::SocketCommand;
use crate::ports::outbound::ChannelEvent;

/// Ref counter and join bookkeeping for one socket with one game channel.
#[derive(Debug, Default)]
pub struct ChannelCore {
    last_ref: u64,
    topic: Option<GameTopic>,
    join_ref: Option<String>,
}

impl ChannelCore {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_ref(&mut self) -> String {
        self.last_ref += 1;
        self.last_ref.to_string()
    }

    /// Ref of the most recent join, if one was sent
    pub fn join_ref(&self) -> Option<&str> {
        self.join_ref.as_deref()
    }

    /// Frame for a queued command; `Connect` and `Disconnect` have none.
    pub fn frame_for(&mut self, command: &SocketCommand) -> Option<Frame> {
        match command {
            SocketCommand::Join { topic, params } => Some(self.join_frame(topic, params)),
            SocketCommand::Push { topic, message } => Some(self.push_frame(topic, message)),
            SocketCommand::Connect { .. } | SocketCommand::Disconnect => None,
        }
    }

    /// `phx_join`; its ref becomes the join ref of every later frame.
    pub fn join_frame(&mut self, topic: &GameTopic, params: &JoinParams) -> Frame {
        let reference = self.next_ref();
        self.topic = Some(topic.clone());
        self.join_ref = Some(reference.clone());
        Frame::new(topic.as_str(), channel_events::JOIN, params.to_value())
            .with_refs(Some(reference.clone()), Some(reference))
    }

    pub fn push_frame(&mut self, topic: &GameTopic, message: &ClientMessage) -> Frame {
        let reference = self.next_ref();
        Frame::new(topic.as_str(), message.event_name(), message.payload())
            .with_refs(self.join_ref.clone(), Some(reference))
    }

    pub fn heartbeat_frame(&mut self) -> Frame {
        Frame::heartbeat(self.next_ref())
    }

    /// Decide what an inbound frame means for the joined channel.
    ///
    /// Returns `None` for frames that do not concern the session: other
    /// topics, frames from an earlier join, heartbeat and push replies.
    pub fn interpret(&mut self, frame: Frame) -> Option<ChannelEvent> {
        let Some(topic) = &self.topic else {
            tracing::debug!(topic = %frame.topic, event = %frame.event, "Frame before join");
            return None;
        };
        if frame.topic != topic.as_str() {
            tracing::trace!(topic = %frame.topic, event = %frame.event, "Frame for another topic");
            return None;
        }
        if let Some(frame_join_ref) = &frame.join_ref {
            if self.join_ref.as_deref() != Some(frame_join_ref.as_str()) {
                tracing::debug!(
                    join_ref = %frame_join_ref,
                    event = %frame.event,
                    "Frame from a stale join"
                );
                return None;
            }
        }

        match frame.event.as_str() {
            channel_events::REPLY => self.interpret_reply(&frame),
            channel_events::ERROR => Some(ChannelEvent::Closed {
                reason: "channel error".to_string(),
            }),
            channel_events::CLOSE => Some(ChannelEvent::Closed {
                reason: "channel closed".to_string(),
            }),
            event => Some(match ServerEvent::decode(event, frame.payload) {
                Ok(server_event) => ChannelEvent::Server(server_event),
                Err(e) => ChannelEvent::Malformed {
                    event: event.to_string(),
                    error: e.to_string(),
                },
            }),
        }
    }

    fn interpret_reply(&self, frame: &Frame) -> Option<ChannelEvent> {
        if frame.reference.is_none() || frame.reference != self.join_ref {
            // Reply to a push; the session does not wait on those.
            return None;
        }

        let reply = match frame.reply() {
            Ok(reply) => reply,
            Err(e) => {
                return Some(ChannelEvent::Malformed {
                    event: channel_events::REPLY.to_string(),
                    error: e.to_string(),
                })
            }
        };

        Some(match reply.status {
            ReplyStatus::Ok => ChannelEvent::Joined,
            ReplyStatus::Error | ReplyStatus::Unknown => ChannelEvent::JoinRejected {
                reason: reply.reason().unwrap_or("unknown").to_string(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tictac_domain::{CellIndex, GameName, PlayerName};

    fn topic() -> GameTopic {
        GameTopic::for_game(&GameName::new("g1").unwrap())
    }

    fn joined_core() -> (ChannelCore, String) {
        let mut core = ChannelCore::new();
        let params = JoinParams::for_player(&PlayerName::new("alice").unwrap());
        let join = core.join_frame(&topic(), &params);
        let join_ref = join.join_ref.clone().unwrap();
        (core, join_ref)
    }

    fn reply(join_ref: &str, reference: &str, payload: serde_json::Value) -> Frame {
        Frame::new("game:g1", "phx_reply", payload)
            .with_refs(Some(join_ref.to_string()), Some(reference.to_string()))
    }

    #[test]
    fn test_join_frame_shape() {
        let mut core = ChannelCore::new();
        let params = JoinParams::for_player(&PlayerName::new("alice").unwrap());

        let frame = core.join_frame(&topic(), &params);

        assert_eq!(
            frame.encode().unwrap(),
            r#"["1","1","game:g1","phx_join",{"player":"alice"}]"#
        );
        assert_eq!(core.join_ref(), Some("1"));
    }

    #[test]
    fn test_push_carries_join_ref_and_fresh_ref() {
        let (mut core, join_ref) = joined_core();
        let put = ClientMessage::Put {
            index: CellIndex::new(4).unwrap(),
        };

        let frame = core.push_frame(&topic(), &put);

        assert_eq!(frame.join_ref.as_deref(), Some(join_ref.as_str()));
        assert_eq!(frame.reference.as_deref(), Some("2"));
        assert_eq!(frame.event, "put");
        assert_eq!(frame.payload, json!({"index": 4}));
    }

    #[test]
    fn test_heartbeat_frame() {
        let mut core = ChannelCore::new();
        assert_eq!(
            core.heartbeat_frame().encode().unwrap(),
            r#"[null,"1","phoenix","heartbeat",{}]"#
        );
    }

    #[test]
    fn test_connect_and_disconnect_have_no_frame() {
        let mut core = ChannelCore::new();
        assert!(core.frame_for(&SocketCommand::Disconnect).is_none());
    }

    #[test]
    fn test_join_ok_reply() {
        let (mut core, join_ref) = joined_core();
        let frame = reply(&join_ref, &join_ref, json!({"status": "ok", "response": {}}));

        assert_eq!(core.interpret(frame), Some(ChannelEvent::Joined));
    }

    #[test]
    fn test_join_error_reply_carries_reason() {
        let (mut core, join_ref) = joined_core();
        let frame = reply(
            &join_ref,
            &join_ref,
            json!({"status": "error", "response": {"reason": "game is full"}}),
        );

        assert_eq!(
            core.interpret(frame),
            Some(ChannelEvent::JoinRejected {
                reason: "game is full".to_string()
            })
        );
    }

    #[test]
    fn test_push_reply_is_ignored() {
        let (mut core, join_ref) = joined_core();
        let frame = reply(&join_ref, "7", json!({"status": "ok", "response": {}}));

        assert_eq!(core.interpret(frame), None);
    }

    #[test]
    fn test_stale_join_ref_is_ignored() {
        let (mut core, _) = joined_core();
        let frame = Frame::new("game:g1", "player_left", json!({}))
            .with_refs(Some("99".to_string()), None);

        assert_eq!(core.interpret(frame), None);
    }

    #[test]
    fn test_foreign_topic_is_ignored() {
        let (mut core, _) = joined_core();
        let frame = Frame::new("game:other", "player_left", json!({}));

        assert_eq!(core.interpret(frame), None);
    }

    #[test]
    fn test_heartbeat_reply_is_ignored() {
        let (mut core, _) = joined_core();
        let frame = Frame::new("phoenix", "phx_reply", json!({"status": "ok", "response": {}}))
            .with_refs(None, Some("3".to_string()));

        assert_eq!(core.interpret(frame), None);
    }

    #[test]
    fn test_broadcast_without_join_ref_is_decoded() {
        let (mut core, _) = joined_core();
        let frame = Frame::new("game:g1", "player_left", json!({}));

        assert_eq!(
            core.interpret(frame),
            Some(ChannelEvent::Server(ServerEvent::PlayerLeft))
        );
    }

    #[test]
    fn test_channel_error_and_close_end_the_session() {
        let (mut core, join_ref) = joined_core();
        for event in ["phx_error", "phx_close"] {
            let frame = Frame::new("game:g1", event, json!({}))
                .with_refs(Some(join_ref.clone()), None);
            assert!(matches!(
                core.interpret(frame),
                Some(ChannelEvent::Closed { .. })
            ));
        }
    }

    #[test]
    fn test_malformed_payload_is_reported() {
        let (mut core, _) = joined_core();
        let frame = Frame::new("game:g1", "update_board", json!({"board": 3}));

        assert!(matches!(
            core.interpret(frame),
            Some(ChannelEvent::Malformed { event, .. }) if event == "update_board"
        ));
    }

    #[test]
    fn test_unknown_event_is_forwarded() {
        let (mut core, _) = joined_core();
        let frame = Frame::new("game:g1", "presence_diff", json!({}));

        assert_eq!(
            core.interpret(frame),
            Some(ChannelEvent::Server(ServerEvent::Unknown {
                event: "presence_diff".to_string()
            }))
        );
    }

    #[test]
    fn test_frames_before_join_are_ignored() {
        let mut core = ChannelCore::new();
        let frame = Frame::new("game:g1", "player_left", json!({}));

        assert_eq!(core.interpret(frame), None);
    }
}
