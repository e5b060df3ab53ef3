//! Value objects - Immutable objects defined by their attributes

mod board;
mod intent;
mod names;
mod score;
mod snapshot;
mod symbol;

pub use board::{BoardSnapshot, Cell, CellIndex, BOARD_SIZE};
pub use intent::OutboundIntent;
pub use names::{GameName, PlayerName};
pub use score::{Score, ScorePanel};
pub use snapshot::GameSnapshot;
pub use symbol::Symbol;
