//! Protocol errors

use thiserror::Error;

use tictac_domain::DomainError;

#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The text is not valid JSON or does not have the expected shape
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A frame array had the wrong arity or field types
    #[error("Invalid frame: {0}")]
    InvalidFrame(String),

    /// Payload for a known event could not be decoded
    #[error("Invalid `{event}` payload: {source}")]
    InvalidPayload {
        event: String,
        #[source]
        source: serde_json::Error,
    },

    /// Payload decoded but violates a domain rule
    #[error(transparent)]
    Domain(#[from] DomainError),
}
