//! Game view synchronizer
//!
//! Feeds view events through the [`GameView`] state machine and renders each
//! resulting plan onto a [`ViewPort`]. The first plan writes every region;
//! after that only regions whose visibility changed are touched. Board and
//! score are written whole whenever a plan carries them. After a failed
//! render the next one starts over: every region plus the last known board
//! and score.

use tictac_domain::{GameView, RenderPlan, ViewEvent, ViewPhase, ViewRegionState};

use crate::ports::outbound::{ViewError, ViewPort};

pub struct GameViewSynchronizer<V: ViewPort> {
    view: V,
    model: GameView,
    applied: Option<ViewRegionState>,
}

impl<V: ViewPort> GameViewSynchronizer<V> {
    pub fn new(view: V) -> Self {
        Self {
            view,
            model: GameView::new(),
            applied: None,
        }
    }

    /// Apply one event and render the outcome.
    ///
    /// Events with unusable payloads are dropped and the view is left as it
    /// was; so are events arriving after a terminal phase.
    pub fn handle(&mut self, event: ViewEvent) {
        let name = event.name();
        match self.model.apply(event) {
            Ok(Some(plan)) => {
                if let Err(e) = self.render(&plan) {
                    tracing::error!(event = name, error = %e, "Failed to render view");
                    self.applied = None;
                }
            }
            Ok(None) => {
                tracing::debug!(event = name, phase = ?self.model.phase(), "View is final, event ignored");
            }
            Err(e) => {
                tracing::warn!(event = name, error = %e, "Dropping event with unusable payload");
            }
        }
    }

    fn render(&mut self, plan: &RenderPlan) -> Result<(), ViewError> {
        // The model already holds this plan's board and score.
        let full = self.applied.is_none();
        let board = if full { self.model.board() } else { plan.board.as_ref() };
        let score = if full { self.model.score() } else { plan.score.as_ref() };

        if let Some(board) = board {
            for (index, cell) in board.iter() {
                self.view.write_cell(index, cell)?;
            }
        }
        if let Some(score) = score {
            self.view.write_score(score)?;
        }

        let changes: Vec<_> = match &self.applied {
            Some(applied) => applied.diff(&plan.regions),
            None => plan.regions.entries().collect(),
        };
        for (region, visible) in changes {
            self.view.set_region_visible(region, visible)?;
        }
        self.applied = Some(plan.regions);

        self.view.present(plan.phase)
    }

    pub fn phase(&self) -> ViewPhase {
        self.model.phase()
    }

    pub fn view(&self) -> &V {
        &self.view
    }
}
