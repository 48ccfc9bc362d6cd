//! Connection hub - live sockets and the transport port implementation.
//!
//! Tracks every live connection (registered or not) as an unbounded
//! channel feeding that connection's writer task. Because each connection
//! has a single writer draining a single queue, events reach a client in
//! the order the relay processed them.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::{mpsc, RwLock};

use crate::domain::events::OutboundEvent;
use crate::domain::foundation::ConnectionId;
use crate::ports::EventTransport;

/// Map of live connections to their outbound queues.
///
/// # Thread Safety
///
/// Uses `RwLock` since broadcasts (reads) vastly outnumber
/// attach/detach transitions (writes).
pub struct ConnectionHub {
    connections: RwLock<HashMap<ConnectionId, mpsc::UnboundedSender<OutboundEvent>>>,
}

impl ConnectionHub {
    /// Creates an empty hub.
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
        }
    }

    /// Adds a connection and returns the receiving end of its outbound
    /// queue, to be drained by the connection's writer task.
    pub async fn attach(&self, id: ConnectionId) -> mpsc::UnboundedReceiver<OutboundEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.connections.write().await.insert(id, tx);
        rx
    }

    /// Removes a connection. Idempotent; called on disconnect only — a
    /// failed send never evicts (the disconnect notification does).
    pub async fn detach(&self, id: &ConnectionId) {
        self.connections.write().await.remove(id);
    }

    /// Number of live connections, registered or not.
    pub async fn connected_count(&self) -> usize {
        self.connections.read().await.len()
    }
}

impl Default for ConnectionHub {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventTransport for ConnectionHub {
    async fn send_to(&self, connection: ConnectionId, event: OutboundEvent) {
        let connections = self.connections.read().await;
        match connections.get(&connection) {
            Some(tx) => {
                if tx.send(event).is_err() {
                    tracing::debug!(%connection, "send to closed connection dropped");
                }
            }
            None => {
                tracing::debug!(%connection, "send to unknown connection dropped");
            }
        }
    }

    async fn broadcast(&self, event: OutboundEvent) {
        let connections = self.connections.read().await;
        for (connection, tx) in connections.iter() {
            if tx.send(event.clone()).is_err() {
                tracing::debug!(%connection, "broadcast to closed connection dropped");
            }
        }
    }
}
