//! Player symbols
//!
//! A symbol names a seat (`x` or `o`) and doubles as the turn indicator: the
//! server tells the client whose move is next, the client never infers it.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// One of the two seats at the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Symbol {
    X,
    O,
}

impl Symbol {
    /// The opposing seat
    pub fn other(self) -> Self {
        match self {
            Symbol::X => Symbol::O,
            Symbol::O => Symbol::X,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Symbol::X => "x",
            Symbol::O => "o",
        }
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Symbol {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "x" => Ok(Symbol::X),
            "o" => Ok(Symbol::O),
            _ => Err(DomainError::parse(format!("Invalid symbol: {}", s))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_parse() {
        assert_eq!("x".parse::<Symbol>().unwrap(), Symbol::X);
        assert_eq!(" O ".parse::<Symbol>().unwrap(), Symbol::O);
        assert!("z".parse::<Symbol>().is_err());
    }

    #[test]
    fn test_symbol_other() {
        assert_eq!(Symbol::X.other(), Symbol::O);
        assert_eq!(Symbol::O.other(), Symbol::X);
    }

    #[test]
    fn test_symbol_serde_is_lowercase() {
        assert_eq!(serde_json::to_string(&Symbol::X).unwrap(), "\"x\"");
        let parsed: Symbol = serde_json::from_str("\"o\"").unwrap();
        assert_eq!(parsed, Symbol::O);
    }
}
