//! Application layer: the session manager and the view synchronizer.
//!
//! Both are single-threaded and runtime-agnostic. They reach the outside
//! world only through the outbound ports.

pub mod error;
pub mod message_translator;
pub mod session;
pub mod synchronizer;

pub use error::SessionError;
pub use session::ChannelSessionManager;
pub use synchronizer::GameViewSynchronizer;
