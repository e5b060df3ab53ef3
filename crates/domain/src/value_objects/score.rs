//! Score panel value objects

/// Running tally as reported by the server
///
/// Values are shown as received: no clamping and no sign check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Score {
    pub x_wins: i64,
    pub o_wins: i64,
    pub ties: i64,
}

/// Everything the stats panel shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScorePanel {
    pub x_name: String,
    pub o_name: String,
    pub score: Score,
}

impl ScorePanel {
    pub fn x_wins(&self) -> i64 {
        self.score.x_wins
    }

    pub fn o_wins(&self) -> i64 {
        self.score.o_wins
    }

    pub fn ties(&self) -> i64 {
        self.score.ties
    }
}
