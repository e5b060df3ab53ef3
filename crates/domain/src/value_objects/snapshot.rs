//! Domain form of a server game payload

use crate::value_objects::{BoardSnapshot, PlayerName, Score, Symbol};

/// Game state carried by a board-affecting server event
///
/// Individual events only populate the fields they need; the view state
/// machine decides which ones are required per transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub board: BoardSnapshot,
    pub next: Symbol,
    pub x: Option<PlayerName>,
    pub o: Option<PlayerName>,
    pub score: Option<Score>,
}

impl GameSnapshot {
    pub fn new(board: BoardSnapshot, next: Symbol) -> Self {
        Self {
            board,
            next,
            x: None,
            o: None,
            score: None,
        }
    }

    pub fn with_players(mut self, x: Option<PlayerName>, o: Option<PlayerName>) -> Self {
        self.x = x;
        self.o = o;
        self
    }

    pub fn with_score(mut self, score: Score) -> Self {
        self.score = Some(score);
        self
    }

    /// Both seats are taken
    pub fn seats_filled(&self) -> bool {
        self.x.is_some() && self.o.is_some()
    }
}
