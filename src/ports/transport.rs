//! EventTransport port - push delivery over a persistent connection.
//!
//! The relay core needs exactly two primitives from its transport: send a
//! named event to one connection, and send one to every connection. Any
//! connection-oriented push transport can implement this; the bundled
//! adapter is a WebSocket hub, and tests use a recording fake.

use async_trait::async_trait;

use crate::domain::events::OutboundEvent;
use crate::domain::foundation::ConnectionId;

/// Port for pushing outbound events to connected clients.
///
/// Delivery is fire-and-forget: implementations log failed sends and never
/// surface them, so one dead connection cannot abort the rest of a fan-out.
/// A dead connection is cleaned up by its own disconnect notification, not
/// inferred from a failed send.
#[async_trait]
pub trait EventTransport: Send + Sync {
    /// Sends an event to a single connection. Best-effort; a missing or
    /// closed connection is logged and ignored.
    async fn send_to(&self, connection: ConnectionId, event: OutboundEvent);

    /// Sends an event to every live connection, registered or not.
    async fn broadcast(&self, event: OutboundEvent);
}
