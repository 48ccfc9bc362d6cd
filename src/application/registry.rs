//! In-memory registry of registered connections.
//!
//! Maps each live connection to the identity it registered. A connection
//! that has not registered yet is simply absent: it still receives
//! broadcast traffic (the transport hub tracks live sockets separately)
//! but can never appear in a role-filtered delivery set.
//!
//! No persistence, no capacity bound, no eviction. The relay serves one
//! restaurant floor; the map is bounded by concurrently connected staff
//! devices, realistically tens. Keep it simple.

use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::domain::foundation::{ClientIdentity, ConnectionId, Role};

/// Registry of connection → registered identity.
///
/// # Thread Safety
///
/// Uses `RwLock` since role lookups during fan-out vastly outnumber
/// register/unregister transitions.
pub struct ConnectionRegistry {
    connections: RwLock<HashMap<ConnectionId, ClientIdentity>>,
}

impl ConnectionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
        }
    }

    /// Stores (or overwrites) the identity for a connection.
    pub async fn register(&self, id: ConnectionId, identity: ClientIdentity) {
        self.connections.write().await.insert(id, identity);
    }

    /// Removes the entry for a connection.
    ///
    /// Idempotent: removing an unknown id is a no-op. Returns the removed
    /// identity so the caller can log who left.
    pub async fn unregister(&self, id: &ConnectionId) -> Option<ClientIdentity> {
        self.connections.write().await.remove(id)
    }

    /// Returns the stored identity for a connection, if registered.
    pub async fn get(&self, id: &ConnectionId) -> Option<ClientIdentity> {
        self.connections.read().await.get(id).cloned()
    }

    /// Returns the connections whose registered role satisfies the predicate.
    pub async fn find_by_role<P>(&self, predicate: P) -> Vec<ConnectionId>
    where
        P: Fn(Role) -> bool,
    {
        self.connections
            .read()
            .await
            .iter()
            .filter(|(_, identity)| predicate(identity.role))
            .map(|(id, _)| *id)
            .collect()
    }

    /// Number of registered connections.
    pub async fn registered_count(&self) -> usize {
        self.connections.read().await.len()
    }

    /// True when nobody is registered. Gates the heartbeat.
    pub async fn is_empty(&self) -> bool {
        self.connections.read().await.is_empty()
    }
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
