//! Socket and channel parameters

use serde::Serialize;

use tictac_domain::{GameName, PlayerName};

/// Channel topic for one game instance
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameTopic(String);

impl GameTopic {
    pub const PREFIX: &'static str = "game:";

    pub fn for_game(game: &GameName) -> Self {
        Self(format!("{}{}", Self::PREFIX, game))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for GameTopic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Payload of `phx_join` on the game topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JoinParams {
    pub player: PlayerName,
}

impl JoinParams {
    pub fn for_player(player: &PlayerName) -> Self {
        Self {
            player: player.clone(),
        }
    }

    pub fn to_value(&self) -> serde_json::Value {
        serde_json::json!({ "player": self.player.as_str() })
    }
}

/// Query parameters sent when the socket connects
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocketParams {
    pub player: PlayerName,
}

impl SocketParams {
    pub fn for_player(player: &PlayerName) -> Self {
        Self {
            player: player.clone(),
        }
    }

    /// Key/value pairs appended to the socket URL
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![("player", self.player.to_string())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_prefixes_game_name() {
        let game = GameName::new("abc123").unwrap();
        assert_eq!(GameTopic::for_game(&game).as_str(), "game:abc123");
    }

    #[test]
    fn test_join_params_payload() {
        let player = PlayerName::new("alice").unwrap();
        let params = JoinParams::for_player(&player);
        assert_eq!(params.to_value(), serde_json::json!({"player": "alice"}));
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            serde_json::json!({"player": "alice"})
        );
    }
}
