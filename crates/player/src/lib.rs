//! Tic-tac-toe player.
//!
//! Joins one game over a Phoenix channel and keeps a view of the board,
//! turn and score in sync with what the server broadcasts.
//! Multi-platform support is provided via compile-time `cfg` selection.

pub mod application;
pub mod config;
pub mod infrastructure;
pub mod ports;
pub mod runner;

// Re-export commonly used entrypoints
pub use application::{ChannelSessionManager, GameViewSynchronizer, SessionError};
pub use config::{ClientConfig, ConfigError};
