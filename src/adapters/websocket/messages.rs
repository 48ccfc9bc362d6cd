//! Wire framing for the WebSocket protocol.
//!
//! Every frame in either direction is a JSON object of the form
//! `{ "event": <name>, "data": <payload> }`. The event vocabulary itself
//! lives in the domain layer; this module only turns text frames into
//! inbound events and outbound events into text frames.

use crate::domain::events::{InboundEvent, OutboundEvent};

/// Parses one inbound text frame.
///
/// Fails on unknown event names, missing `data`, and payloads that violate
/// the typed contract of their kind; callers log and drop such frames.
pub fn parse_client_frame(text: &str) -> Result<InboundEvent, serde_json::Error> {
    serde_json::from_str(text)
}

/// Encodes one outbound event as a text frame.
pub fn encode_server_frame(event: &OutboundEvent) -> Result<String, serde_json::Error> {
    serde_json::to_string(event)
}
