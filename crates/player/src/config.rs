//! Client configuration
//!
//! The native client reads environment variables (after `.env` files are
//! loaded); the browser client derives the same values from the page.

use std::time::Duration;

use thiserror::Error;
use url::Url;

use tictac_domain::{GameName, PlayerName};

use crate::infrastructure::websocket::{DEFAULT_HEARTBEAT_MS, SOCKET_PATH};

pub const SOCKET_URL_VAR: &str = "TICTAC_SOCKET_URL";
pub const GAME_VAR: &str = "TICTAC_GAME";
pub const PLAYER_VAR: &str = "TICTAC_PLAYER";
pub const HEARTBEAT_VAR: &str = "TICTAC_HEARTBEAT_MS";

pub const DEFAULT_SOCKET_URL: &str = "ws://localhost:4000/socket/websocket";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{var} is invalid: {message}")]
    Invalid { var: &'static str, message: String },
}

impl ConfigError {
    fn invalid(var: &'static str, message: impl ToString) -> Self {
        ConfigError::Invalid {
            var,
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub socket_url: Url,
    pub game: GameName,
    pub player: PlayerName,
    pub heartbeat: Duration,
}

impl ClientConfig {
    /// Read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from any variable source; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|value| !value.trim().is_empty());

        let socket_url = match get(SOCKET_URL_VAR) {
            Some(raw) => parse_socket_url(SOCKET_URL_VAR, raw.trim())?,
            None => parse_socket_url(SOCKET_URL_VAR, DEFAULT_SOCKET_URL)?,
        };

        let game = get(GAME_VAR).ok_or(ConfigError::Missing(GAME_VAR))?;
        let game = GameName::new(game).map_err(|e| ConfigError::invalid(GAME_VAR, e))?;

        let player = get(PLAYER_VAR).ok_or(ConfigError::Missing(PLAYER_VAR))?;
        let player = PlayerName::new(player).map_err(|e| ConfigError::invalid(PLAYER_VAR, e))?;

        let heartbeat_ms = match get(HEARTBEAT_VAR) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|ms| *ms > 0)
                .ok_or_else(|| {
                    ConfigError::invalid(HEARTBEAT_VAR, "expected a positive number of milliseconds")
                })?,
            None => DEFAULT_HEARTBEAT_MS,
        };

        Ok(Self {
            socket_url,
            game,
            player,
            heartbeat: Duration::from_millis(heartbeat_ms),
        })
    }
}

fn parse_socket_url(var: &'static str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::invalid(var, e))?;
    match url.scheme() {
        "ws" | "wss" => Ok(url),
        other => Err(ConfigError::invalid(
            var,
            format!("unsupported scheme `{}`, expected ws or wss", other),
        )),
    }
}

/// Socket endpoint on the host that served the page.
///
/// `protocol` is `location.protocol` (`"https:"` selects `wss`) and `host`
/// is `location.host`, port included.
pub fn page_socket_url(protocol: &str, host: &str) -> Result<Url, ConfigError> {
    let scheme = if protocol == "https:" { "wss" } else { "ws" };
    parse_socket_url("location", &format!("{}://{}{}", scheme, host, SOCKET_PATH))
}
