//! Local user intent forwarded to the server

use crate::value_objects::CellIndex;

/// What the local player asked for
///
/// Produced by a click and sent immediately; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutboundIntent {
    Move { cell: CellIndex },
    RequestNewRound,
}
