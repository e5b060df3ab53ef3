//! View port - the surface the synchronizer renders onto
//!
//! In the browser this is the host page's DOM; natively it is a terminal.
//! Implementations only write what they are told: every decision about what
//! to show is made by the view state machine before these methods run.

use thiserror::Error;

use tictac_domain::{Cell, CellIndex, ScorePanel, ViewPhase, ViewRegion};

#[derive(Debug, Error)]
pub enum ViewError {
    /// An element the view contract requires is absent
    #[error("Missing element: #{0}")]
    MissingElement(String),

    /// The underlying surface refused an update
    #[error("View update failed: {0}")]
    Surface(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait ViewPort {
    fn set_region_visible(&mut self, region: ViewRegion, visible: bool) -> Result<(), ViewError>;

    fn write_cell(&mut self, index: CellIndex, cell: Cell) -> Result<(), ViewError>;

    /// Writes names, wins and ties in one go
    fn write_score(&mut self, score: &ScorePanel) -> Result<(), ViewError>;

    /// Called once after all writes for an event
    fn present(&mut self, phase: ViewPhase) -> Result<(), ViewError> {
        let _ = phase;
        Ok(())
    }
}
