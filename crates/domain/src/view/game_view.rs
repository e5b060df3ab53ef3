//! Projection from server events to render plans

use crate::error::DomainError;
use crate::value_objects::{BoardSnapshot, GameSnapshot, PlayerName, ScorePanel};
use crate::view::{ViewPhase, ViewRegion, ViewRegionState};

/// Input to the view state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    /// `new_player`: someone joined (or rejoined) the game
    PlayerJoined(GameSnapshot),
    /// `new_player` with a seat still free; nothing else in it is read
    SeatOpen,
    /// `player_left`: the opponent went away
    PlayerLeft,
    /// `update_board`: a move was accepted
    BoardUpdated(GameSnapshot),
    /// `new_round`: the board was reset for another round
    RoundStarted(GameSnapshot),
    /// `finish_game`: the round ended with a win or a tie
    GameFinished(GameSnapshot),
    /// The channel join was refused
    JoinRejected,
    /// The transport closed
    ConnectionLost,
}

impl ViewEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ViewEvent::PlayerJoined(_) | ViewEvent::SeatOpen => "new_player",
            ViewEvent::PlayerLeft => "player_left",
            ViewEvent::BoardUpdated(_) => "update_board",
            ViewEvent::RoundStarted(_) => "new_round",
            ViewEvent::GameFinished(_) => "finish_game",
            ViewEvent::JoinRejected => "join_rejected",
            ViewEvent::ConnectionLost => "connection_lost",
        }
    }
}

/// What one event asks the view to draw
///
/// `regions` is the complete visibility state after the event. `board` and
/// `score` are present only when the event rewrites them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderPlan {
    pub phase: ViewPhase,
    pub regions: ViewRegionState,
    pub board: Option<BoardSnapshot>,
    pub score: Option<ScorePanel>,
}

/// Client-side mirror of the game page
///
/// Every transition recomputes the regions it touches from scratch, so
/// applying the same event twice leaves the same state behind.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameView {
    phase: ViewPhase,
    regions: ViewRegionState,
    board: Option<BoardSnapshot>,
    score: Option<ScorePanel>,
}

impl GameView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> ViewPhase {
        self.phase
    }

    pub fn regions(&self) -> &ViewRegionState {
        &self.regions
    }

    pub fn board(&self) -> Option<&BoardSnapshot> {
        self.board.as_ref()
    }

    pub fn score(&self) -> Option<&ScorePanel> {
        self.score.as_ref()
    }

    /// Apply one event.
    ///
    /// Returns `Ok(None)` when the view is in a terminal phase and the event
    /// is ignored. A payload missing a field the transition needs is an error
    /// and leaves the view untouched.
    pub fn apply(&mut self, event: ViewEvent) -> Result<Option<RenderPlan>, DomainError> {
        // A refused join still wins over a dropped connection.
        let rejected_after_loss =
            self.phase == ViewPhase::ConnectionLost && event == ViewEvent::JoinRejected;
        if self.phase.is_terminal() && !rejected_after_loss {
            return Ok(None);
        }

        let mut regions = self.regions;
        let mut board = None;
        let mut score = None;

        let phase = match event {
            ViewEvent::PlayerJoined(snapshot) => {
                if let (Some(x), Some(o)) = (&snapshot.x, &snapshot.o) {
                    score = Some(score_panel(x, o, &snapshot)?);
                    board = Some(snapshot.board);
                    regions.hide(ViewRegion::Waiting);
                    regions.hide(ViewRegion::NewGameButton);
                    regions.show(ViewRegion::ActiveGame);
                    regions.show(ViewRegion::StatsPanel);
                    regions.set_turn(snapshot.next);
                    ViewPhase::ActiveTurn(snapshot.next)
                } else {
                    regions = ViewRegionState::only(ViewRegion::Waiting);
                    ViewPhase::Waiting
                }
            }
            ViewEvent::SeatOpen => {
                regions = ViewRegionState::only(ViewRegion::Waiting);
                ViewPhase::Waiting
            }
            ViewEvent::PlayerLeft => {
                regions.hide(ViewRegion::StatsPanel);
                regions.hide(ViewRegion::ActiveGame);
                regions.hide(ViewRegion::NewGameButton);
                regions.show(ViewRegion::Waiting);
                ViewPhase::OpponentLeft
            }
            ViewEvent::BoardUpdated(snapshot) => {
                board = Some(snapshot.board);
                regions.set_turn(snapshot.next);
                ViewPhase::ActiveTurn(snapshot.next)
            }
            ViewEvent::RoundStarted(snapshot) => {
                board = Some(snapshot.board);
                regions.hide(ViewRegion::NewGameButton);
                regions.set_turn(snapshot.next);
                ViewPhase::ActiveTurn(snapshot.next)
            }
            ViewEvent::GameFinished(snapshot) => {
                let x = snapshot.x.as_ref().ok_or(DomainError::missing("x"))?;
                let o = snapshot.o.as_ref().ok_or(DomainError::missing("o"))?;
                score = Some(score_panel(x, o, &snapshot)?);
                board = Some(snapshot.board);
                regions.show(ViewRegion::NewGameButton);
                regions.set_turn(snapshot.next);
                ViewPhase::RoundOver
            }
            ViewEvent::JoinRejected => {
                regions = ViewRegionState::only(ViewRegion::FullGameNotice);
                ViewPhase::JoinFailed
            }
            ViewEvent::ConnectionLost => {
                regions = ViewRegionState::only(ViewRegion::Waiting);
                ViewPhase::ConnectionLost
            }
        };

        self.phase = phase;
        self.regions = regions;
        if let Some(board) = board {
            self.board = Some(board);
        }
        if let Some(score) = &score {
            self.score = Some(score.clone());
        }

        Ok(Some(RenderPlan {
            phase,
            regions,
            board,
            score,
        }))
    }
}

fn score_panel(
    x: &PlayerName,
    o: &PlayerName,
    snapshot: &GameSnapshot,
) -> Result<ScorePanel, DomainError> {
    let score = snapshot.score.ok_or(DomainError::missing("score"))?;
    Ok(ScorePanel {
        x_name: x.to_string(),
        o_name: o.to_string(),
        score,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::{Cell, Score, Symbol};

    fn player(name: &str) -> Option<PlayerName> {
        Some(PlayerName::new(name).unwrap())
    }

    fn snapshot(next: Symbol) -> GameSnapshot {
        GameSnapshot::new(BoardSnapshot::empty(), next)
            .with_players(player("alice"), player("bob"))
            .with_score(Score::default())
    }

    fn full_board() -> BoardSnapshot {
        let x = Cell::Taken(Symbol::X);
        let o = Cell::Taken(Symbol::O);
        BoardSnapshot::from([x, o, x, x, o, o, o, x, x])
    }

    fn visible(view: &GameView) -> Vec<ViewRegion> {
        view.regions().visible_regions().collect()
    }

    #[test]
    fn test_new_player_with_both_seats_starts_turn() {
        let mut view = GameView::new();
        let plan = view
            .apply(ViewEvent::PlayerJoined(snapshot(Symbol::X)))
            .unwrap()
            .unwrap();

        assert_eq!(plan.phase, ViewPhase::ActiveTurn(Symbol::X));
        assert_eq!(plan.board, Some(BoardSnapshot::empty()));
        let score = plan.score.unwrap();
        assert_eq!(score.x_name, "alice");
        assert_eq!(score.o_name, "bob");
        assert_eq!(
            visible(&view),
            vec![
                ViewRegion::ActiveGame,
                ViewRegion::StatsPanel,
                ViewRegion::XTurnBadge
            ]
        );
    }

    #[test]
    fn test_new_player_with_empty_seat_shows_waiting_only() {
        let mut view = GameView::new();
        view.apply(ViewEvent::PlayerJoined(snapshot(Symbol::O)))
            .unwrap();

        let lonely = GameSnapshot::new(full_board(), Symbol::X)
            .with_players(player("alice"), None)
            .with_score(Score {
                x_wins: 3,
                o_wins: 1,
                ties: 0,
            });
        let plan = view
            .apply(ViewEvent::PlayerJoined(lonely))
            .unwrap()
            .unwrap();

        assert_eq!(plan.phase, ViewPhase::Waiting);
        assert_eq!(plan.board, None);
        assert_eq!(plan.score, None);
        assert_eq!(visible(&view), vec![ViewRegion::Waiting]);
    }

    #[test]
    fn test_new_player_without_score_is_malformed() {
        let mut view = GameView::new();
        let snapshot = GameSnapshot::new(BoardSnapshot::empty(), Symbol::X)
            .with_players(player("alice"), player("bob"));

        let err = view.apply(ViewEvent::PlayerJoined(snapshot)).unwrap_err();
        assert_eq!(err, DomainError::MalformedPayload("score"));
        assert_eq!(view, GameView::new());
    }

    #[test]
    fn test_player_left_resets_to_waiting() {
        let mut view = GameView::new();
        view.apply(ViewEvent::PlayerJoined(snapshot(Symbol::X)))
            .unwrap();
        view.apply(ViewEvent::GameFinished(snapshot(Symbol::O)))
            .unwrap();

        view.apply(ViewEvent::PlayerLeft).unwrap();

        assert_eq!(view.phase(), ViewPhase::OpponentLeft);
        let regions = view.regions();
        assert!(regions.is_visible(ViewRegion::Waiting));
        assert!(!regions.is_visible(ViewRegion::StatsPanel));
        assert!(!regions.is_visible(ViewRegion::ActiveGame));
        assert!(!regions.is_visible(ViewRegion::NewGameButton));
    }

    #[test]
    fn test_update_board_only_touches_board_and_badges() {
        let mut view = GameView::new();
        view.apply(ViewEvent::PlayerJoined(snapshot(Symbol::X)))
            .unwrap();
        let before = *view.regions();

        let plan = view
            .apply(ViewEvent::BoardUpdated(GameSnapshot::new(
                full_board(),
                Symbol::O,
            )))
            .unwrap()
            .unwrap();

        assert_eq!(plan.board, Some(full_board()));
        assert_eq!(plan.score, None);
        assert_eq!(
            before.diff(&plan.regions),
            vec![(ViewRegion::XTurnBadge, false), (ViewRegion::OTurnBadge, true)]
        );
        assert!(view.regions().is_visible(ViewRegion::OTurnBadge));
    }

    #[test]
    fn test_finish_game_shows_new_game_button() {
        let mut view = GameView::new();
        view.apply(ViewEvent::PlayerJoined(snapshot(Symbol::X)))
            .unwrap();

        let finished = GameSnapshot::new(full_board(), Symbol::O)
            .with_players(player("alice"), player("bob"))
            .with_score(Score {
                x_wins: 2,
                o_wins: 1,
                ties: 0,
            });
        let plan = view
            .apply(ViewEvent::GameFinished(finished))
            .unwrap()
            .unwrap();

        assert_eq!(plan.phase, ViewPhase::RoundOver);
        assert!(plan.regions.is_visible(ViewRegion::NewGameButton));
        assert_eq!(plan.board, Some(full_board()));
        let score = plan.score.unwrap();
        assert_eq!((score.x_wins(), score.ties(), score.o_wins()), (2, 0, 1));
    }

    #[test]
    fn test_new_round_hides_new_game_button() {
        let mut view = GameView::new();
        view.apply(ViewEvent::PlayerJoined(snapshot(Symbol::X)))
            .unwrap();
        view.apply(ViewEvent::GameFinished(snapshot(Symbol::X)))
            .unwrap();

        view.apply(ViewEvent::RoundStarted(GameSnapshot::new(
            BoardSnapshot::empty(),
            Symbol::O,
        )))
        .unwrap();

        assert_eq!(view.phase(), ViewPhase::ActiveTurn(Symbol::O));
        assert!(!view.regions().is_visible(ViewRegion::NewGameButton));
        assert_eq!(view.board(), Some(&BoardSnapshot::empty()));
    }

    #[test]
    fn test_join_rejected_is_terminal() {
        let mut view = GameView::new();
        view.apply(ViewEvent::PlayerJoined(snapshot(Symbol::X)))
            .unwrap();

        view.apply(ViewEvent::JoinRejected).unwrap();
        assert_eq!(view.phase(), ViewPhase::JoinFailed);
        assert_eq!(visible(&view), vec![ViewRegion::FullGameNotice]);

        let ignored = view
            .apply(ViewEvent::BoardUpdated(snapshot(Symbol::O)))
            .unwrap();
        assert!(ignored.is_none());
        assert_eq!(visible(&view), vec![ViewRegion::FullGameNotice]);
    }

    #[test]
    fn test_connection_lost_hides_board() {
        let mut view = GameView::new();
        view.apply(ViewEvent::PlayerJoined(snapshot(Symbol::X)))
            .unwrap();

        view.apply(ViewEvent::ConnectionLost).unwrap();
        assert_eq!(view.phase(), ViewPhase::ConnectionLost);
        assert_eq!(visible(&view), vec![ViewRegion::Waiting]);
        assert!(view.apply(ViewEvent::PlayerLeft).unwrap().is_none());
    }

    #[test]
    fn test_every_event_is_idempotent() {
        let events = vec![
            ViewEvent::PlayerJoined(snapshot(Symbol::X)),
            ViewEvent::PlayerJoined(
                GameSnapshot::new(BoardSnapshot::empty(), Symbol::X)
                    .with_players(None, player("bob")),
            ),
            ViewEvent::SeatOpen,
            ViewEvent::PlayerLeft,
            ViewEvent::BoardUpdated(GameSnapshot::new(full_board(), Symbol::O)),
            ViewEvent::RoundStarted(GameSnapshot::new(BoardSnapshot::empty(), Symbol::X)),
            ViewEvent::GameFinished(snapshot(Symbol::O)),
            ViewEvent::JoinRejected,
            ViewEvent::ConnectionLost,
        ];

        for event in events {
            let mut once = GameView::new();
            once.apply(ViewEvent::PlayerJoined(snapshot(Symbol::X)))
                .unwrap();
            let mut twice = once.clone();

            once.apply(event.clone()).unwrap();
            twice.apply(event.clone()).unwrap();
            twice.apply(event.clone()).unwrap();

            assert_eq!(once, twice, "{} is not idempotent", event.name());
        }
    }

    #[test]
    fn test_turn_badges_stay_exclusive() {
        let mut view = GameView::new();
        let sequence = vec![
            ViewEvent::PlayerJoined(snapshot(Symbol::X)),
            ViewEvent::BoardUpdated(GameSnapshot::new(full_board(), Symbol::O)),
            ViewEvent::GameFinished(snapshot(Symbol::X)),
            ViewEvent::RoundStarted(GameSnapshot::new(BoardSnapshot::empty(), Symbol::O)),
            ViewEvent::BoardUpdated(GameSnapshot::new(BoardSnapshot::empty(), Symbol::X)),
        ];

        for event in sequence {
            view.apply(event).unwrap();
            let x = view.regions().is_visible(ViewRegion::XTurnBadge);
            let o = view.regions().is_visible(ViewRegion::OTurnBadge);
            assert!(x ^ o, "exactly one turn badge must be visible");
        }
    }

    /// One view per non-terminal phase a client can reach
    fn reachable_views() -> Vec<(&'static str, GameView)> {
        let apply_all = |events: Vec<ViewEvent>| {
            let mut view = GameView::new();
            for event in events {
                view.apply(event).unwrap();
            }
            view
        };

        vec![
            ("initial", GameView::new()),
            (
                "seat open",
                apply_all(vec![
                    ViewEvent::PlayerJoined(snapshot(Symbol::X)),
                    ViewEvent::SeatOpen,
                ]),
            ),
            (
                "active turn",
                apply_all(vec![ViewEvent::PlayerJoined(snapshot(Symbol::O))]),
            ),
            (
                "round over",
                apply_all(vec![
                    ViewEvent::PlayerJoined(snapshot(Symbol::X)),
                    ViewEvent::GameFinished(snapshot(Symbol::O)),
                ]),
            ),
            (
                "opponent left",
                apply_all(vec![
                    ViewEvent::PlayerJoined(snapshot(Symbol::X)),
                    ViewEvent::PlayerLeft,
                ]),
            ),
        ]
    }

    #[test]
    fn test_player_left_from_every_phase_shows_waiting() {
        for (label, mut view) in reachable_views() {
            view.apply(ViewEvent::PlayerLeft).unwrap();

            assert_eq!(view.phase(), ViewPhase::OpponentLeft, "from {}", label);
            let regions = view.regions();
            assert!(regions.is_visible(ViewRegion::Waiting), "from {}", label);
            assert!(!regions.is_visible(ViewRegion::StatsPanel), "from {}", label);
            assert!(!regions.is_visible(ViewRegion::ActiveGame), "from {}", label);
            assert!(!regions.is_visible(ViewRegion::NewGameButton), "from {}", label);
        }
    }

    #[test]
    fn test_join_rejected_from_every_phase_shows_only_full_notice() {
        for (label, mut view) in reachable_views() {
            view.apply(ViewEvent::JoinRejected).unwrap();

            assert_eq!(view.phase(), ViewPhase::JoinFailed, "from {}", label);
            assert_eq!(visible(&view), vec![ViewRegion::FullGameNotice], "from {}", label);
        }
    }

    #[test]
    fn test_join_rejected_after_connection_lost() {
        let mut view = GameView::new();
        view.apply(ViewEvent::ConnectionLost).unwrap();

        let plan = view.apply(ViewEvent::JoinRejected).unwrap().unwrap();

        assert_eq!(plan.phase, ViewPhase::JoinFailed);
        assert_eq!(visible(&view), vec![ViewRegion::FullGameNotice]);
        assert!(view.apply(ViewEvent::ConnectionLost).unwrap().is_none());
    }

    #[test]
    fn test_seat_open_hides_live_board() {
        let mut view = GameView::new();
        view.apply(ViewEvent::PlayerJoined(snapshot(Symbol::X)))
            .unwrap();

        let plan = view.apply(ViewEvent::SeatOpen).unwrap().unwrap();

        assert_eq!(plan.phase, ViewPhase::Waiting);
        assert_eq!(plan.board, None);
        assert_eq!(visible(&view), vec![ViewRegion::Waiting]);
    }
}
