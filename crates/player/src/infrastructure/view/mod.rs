//! View adapters
//!
//! - `memory`: in-process mirror of every region, cell and score field
//! - `terminal`: native text rendering of that mirror
//! - `dom`: the host page, through web-sys

pub mod memory;

#[cfg(not(target_arch = "wasm32"))]
pub mod terminal;

#[cfg(target_arch = "wasm32")]
pub mod dom;

pub use memory::MemoryView;

#[cfg(not(target_arch = "wasm32"))]
pub use terminal::TerminalView;

#[cfg(target_arch = "wasm32")]
pub use dom::{DomView, UiElements};

use tictac_domain::ViewRegion;

/// CSS class whose presence hides an element
pub const HIDDEN_CLASS: &str = "hidden";

/// Id of the page element backing `region`
pub fn element_id(region: ViewRegion) -> &'static str {
    match region {
        ViewRegion::Waiting => "waiting",
        ViewRegion::NewGameButton => "new_game",
        ViewRegion::ActiveGame => "game",
        ViewRegion::FullGameNotice => "full_game",
        ViewRegion::StatsPanel => "stats",
        ViewRegion::XTurnBadge => "x_turn",
        ViewRegion::OTurnBadge => "o_turn",
    }
}
