//! Player and game identifiers

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// A player's identity, also used as their display name on the score panel
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PlayerName(String);

impl PlayerName {
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("Player name cannot be empty"));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PlayerName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PlayerName> for String {
    fn from(name: PlayerName) -> Self {
        name.0
    }
}

impl std::fmt::Display for PlayerName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of one game instance (the `data-name` of the board element)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameName(String);

impl GameName {
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("Game name cannot be empty"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for GameName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_name_rejects_blank() {
        assert!(PlayerName::new("").is_err());
        assert!(PlayerName::new("   ").is_err());
        assert_eq!(PlayerName::new("alice").unwrap().as_str(), "alice");
    }

    #[test]
    fn test_game_name_is_trimmed() {
        assert_eq!(GameName::new("  lobby-7 ").unwrap().as_str(), "lobby-7");
        assert!(GameName::new("").is_err());
    }
}
