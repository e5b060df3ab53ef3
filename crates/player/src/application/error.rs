//! Application error types

use thiserror::Error;

/// Failure while setting up the game session
///
/// Only setup can fail: once the join is issued, every later problem turns
/// into a view state instead of an error.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Could not {step}: {message}")]
    Transport { step: &'static str, message: String },
}

impl SessionError {
    pub(crate) fn transport(step: &'static str) -> impl FnOnce(anyhow::Error) -> Self {
        move |e| SessionError::Transport {
            step,
            message: format!("{:#}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_error_names_the_step() {
        let err = SessionError::transport("open socket")(anyhow::anyhow!("refused"));
        assert_eq!(err.to_string(), "Could not open socket: refused");
    }
}
