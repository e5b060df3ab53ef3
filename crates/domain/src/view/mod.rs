//! View-level state machine
//!
//! The authoritative game lives on the server. This module only tracks what
//! the page should show: which regions are visible, which board and score were
//! last written, and which phase the view is in.

mod game_view;
mod phase;
mod region;

pub use game_view::{GameView, RenderPlan, ViewEvent};
pub use phase::ViewPhase;
pub use region::{ViewRegion, ViewRegionState};
