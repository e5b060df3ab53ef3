pub mod messaging;
pub mod view;
pub mod websocket;

pub use messaging::{CommandBus, SocketCommand};
pub use view::MemoryView;
pub use websocket::{create_connection, Connection, TransportConfig};
