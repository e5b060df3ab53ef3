//! Phoenix channel frames
//!
//! The server speaks the Phoenix JSON serializer, version 2: every message is
//! a five element array `[join_ref, ref, topic, event, payload]`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ProtocolError;

/// Serializer version announced in the socket URL
pub const SERIALIZER_VSN: &str = "2.0.0";

/// Topic reserved for socket-level traffic (heartbeats)
pub const PHOENIX_TOPIC: &str = "phoenix";

/// Event names owned by the channel layer itself
pub mod channel_events {
    pub const JOIN: &str = "phx_join";
    pub const LEAVE: &str = "phx_leave";
    pub const REPLY: &str = "phx_reply";
    pub const ERROR: &str = "phx_error";
    pub const CLOSE: &str = "phx_close";
    pub const HEARTBEAT: &str = "heartbeat";
}

/// One message on the socket
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub join_ref: Option<String>,
    pub reference: Option<String>,
    pub topic: String,
    pub event: String,
    pub payload: Value,
}

#[derive(Serialize, Deserialize)]
struct WireFrame(Option<String>, Option<String>, String, String, Value);

/// Status carried by a `phx_reply`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplyStatus {
    Ok,
    Error,
    #[serde(other)]
    Unknown,
}

/// Decoded `phx_reply` payload
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Reply {
    pub status: ReplyStatus,
    #[serde(default)]
    pub response: Value,
}

impl Reply {
    /// `response.reason` when the server supplied one
    pub fn reason(&self) -> Option<&str> {
        self.response.get("reason").and_then(Value::as_str)
    }
}

impl Frame {
    pub fn new(topic: impl Into<String>, event: impl Into<String>, payload: Value) -> Self {
        Self {
            join_ref: None,
            reference: None,
            topic: topic.into(),
            event: event.into(),
            payload,
        }
    }

    pub fn with_refs(mut self, join_ref: Option<String>, reference: Option<String>) -> Self {
        self.join_ref = join_ref;
        self.reference = reference;
        self
    }

    /// Socket keep-alive
    pub fn heartbeat(reference: impl Into<String>) -> Self {
        Self::new(
            PHOENIX_TOPIC,
            channel_events::HEARTBEAT,
            Value::Object(Default::default()),
        )
        .with_refs(None, Some(reference.into()))
    }

    pub fn is_reply(&self) -> bool {
        self.event == channel_events::REPLY
    }

    /// Decode the payload of a `phx_reply`
    pub fn reply(&self) -> Result<Reply, ProtocolError> {
        if !self.is_reply() {
            return Err(ProtocolError::InvalidFrame(format!(
                "expected {}, got {}",
                channel_events::REPLY,
                self.event
            )));
        }
        serde_json::from_value(self.payload.clone())
            .map_err(|e| ProtocolError::InvalidFrame(format!("bad reply payload: {}", e)))
    }

    pub fn encode(&self) -> Result<String, ProtocolError> {
        let wire = WireFrame(
            self.join_ref.clone(),
            self.reference.clone(),
            self.topic.clone(),
            self.event.clone(),
            self.payload.clone(),
        );
        Ok(serde_json::to_string(&wire)?)
    }

    pub fn decode(text: &str) -> Result<Self, ProtocolError> {
        let WireFrame(join_ref, reference, topic, event, payload) = serde_json::from_str(text)?;
        if topic.is_empty() || event.is_empty() {
            return Err(ProtocolError::InvalidFrame(
                "topic and event must be non-empty".to_string(),
            ));
        }
        Ok(Self {
            join_ref,
            reference,
            topic,
            event,
            payload,
        })
    }
}
