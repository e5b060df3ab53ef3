//! Outbound ports - Interfaces for external services
//!
//! These ports define the contracts that infrastructure adapters must implement,
//! allowing the session and synchronizer to interact with the transport and the
//! view without depending on concrete implementations.

pub mod channel_events;
pub mod channel_port;
pub mod view_port;

pub use channel_events::ChannelEvent;
pub use channel_port::{ChannelPort, ConnectionFactory, SocketPort};
pub use view_port::{ViewError, ViewPort};

#[cfg(any(test, feature = "testing"))]
pub use channel_port::{MockChannelPort, MockConnectionFactory, MockSocketPort};
#[cfg(any(test, feature = "testing"))]
pub use view_port::MockViewPort;
