//! tictac Domain - core types for the tic-tac-toe client.
//!
//! Everything here is pure: no I/O, no transport, no DOM. The view state
//! machine in [`view`] turns server events into render plans that adapters
//! apply to whatever surface they own.

pub mod error;
pub mod value_objects;
pub mod view;

pub use error::DomainError;

pub use value_objects::{
    BoardSnapshot, Cell, CellIndex, GameName, GameSnapshot, OutboundIntent, PlayerName,
    ScorePanel, Score, Symbol, BOARD_SIZE,
};

pub use view::{GameView, RenderPlan, ViewEvent, ViewPhase, ViewRegion, ViewRegionState};
