//! Adapters - transport implementations at the edges of the relay.

pub mod http;
pub mod websocket;
