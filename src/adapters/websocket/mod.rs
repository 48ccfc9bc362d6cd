//! WebSocket adapter - the relay's persistent-connection transport.

mod handler;
mod hub;
mod messages;

pub use handler::{websocket_router, RelayState};
pub use hub::ConnectionHub;
pub use messages::{encode_server_frame, parse_client_frame};
