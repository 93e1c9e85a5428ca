//! Connection registry — maps live connections to user identities.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::mpsc;
use tracing::{debug, info};

use foodbridge_core::types::{ConnectionId, UserId};

use super::handle::ConnectionHandle;

/// Tracks all live connections and their (many-to-one) user bindings.
///
/// A connection is registered on socket open, bound to a user when the
/// client sends `identify`, and removed only on disconnect — the
/// disconnect event is the sole authority for removal, so no stale
/// handle outlives its connection.
#[derive(Debug)]
pub struct ConnectionRegistry {
    /// Outbound buffer size for new connections.
    buffer_size: usize,
    /// Connection ID → handle, for direct lookup and broadcast.
    by_id: DashMap<ConnectionId, Arc<ConnectionHandle>>,
    /// Connection ID → bound user, if identified.
    identity: DashMap<ConnectionId, UserId>,
    /// User ID → connection IDs (one user may hold multiple connections).
    by_user: DashMap<UserId, Vec<ConnectionId>>,
}

impl ConnectionRegistry {
    /// Create an empty registry.
    pub fn new(buffer_size: usize) -> Self {
        Self {
            buffer_size,
            by_id: DashMap::new(),
            identity: DashMap::new(),
            by_user: DashMap::new(),
        }
    }

    /// Register a newly opened connection.
    ///
    /// Returns the handle and the receiver for its outbound events.
    pub fn register(&self) -> (Arc<ConnectionHandle>, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(self.buffer_size);
        let handle = Arc::new(ConnectionHandle::new(tx));
        self.by_id.insert(handle.id, handle.clone());

        info!(conn_id = %handle.id, "Connection registered");
        (handle, rx)
    }

    /// Bind (or rebind) a connection to a user identity.
    pub fn identify(&self, conn_id: ConnectionId, user_id: UserId) {
        if !self.by_id.contains_key(&conn_id) {
            debug!(conn_id = %conn_id, "Identify for unknown connection ignored");
            return;
        }

        if let Some(previous) = self.identity.insert(conn_id, user_id.clone()) {
            if previous != user_id {
                self.unbind(&previous, &conn_id);
            }
        }

        let mut conns = self.by_user.entry(user_id.clone()).or_default();
        if !conns.contains(&conn_id) {
            conns.push(conn_id);
        }
        drop(conns);

        info!(conn_id = %conn_id, user_id = %user_id, "Connection identified");
    }

    /// Remove a connection and its user binding. Called on disconnect.
    pub fn forget(&self, conn_id: &ConnectionId) {
        if let Some((_, handle)) = self.by_id.remove(conn_id) {
            handle.mark_closed();
            if let Some((_, user_id)) = self.identity.remove(conn_id) {
                self.unbind(&user_id, conn_id);
            }
            info!(conn_id = %conn_id, "Connection unregistered");
        }
    }

    /// All connections bound to a user, for targeted delivery.
    pub fn connections_for(&self, user_id: &UserId) -> Vec<Arc<ConnectionHandle>> {
        self.by_user
            .get(user_id)
            .map(|conns| {
                conns
                    .iter()
                    .filter_map(|id| self.by_id.get(id).map(|entry| entry.value().clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// All live connections, identified or not.
    pub fn all_connections(&self) -> Vec<Arc<ConnectionHandle>> {
        self.by_id.iter().map(|entry| entry.value().clone()).collect()
    }

    /// Number of live connections.
    pub fn connection_count(&self) -> usize {
        self.by_id.len()
    }

    fn unbind(&self, user_id: &UserId, conn_id: &ConnectionId) {
        if let Some(mut conns) = self.by_user.get_mut(user_id) {
            conns.retain(|c| c != conn_id);
            if conns.is_empty() {
                drop(conns);
                self.by_user.remove(user_id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identify_and_lookup() {
        let registry = ConnectionRegistry::new(8);
        let (conn, _rx) = registry.register();

        assert!(registry.connections_for(&UserId::new("u1")).is_empty());
        registry.identify(conn.id, UserId::new("u1"));
        assert_eq!(registry.connections_for(&UserId::new("u1")).len(), 1);
    }

    #[test]
    fn test_one_user_many_connections() {
        let registry = ConnectionRegistry::new(8);
        let (a, _rx_a) = registry.register();
        let (b, _rx_b) = registry.register();

        registry.identify(a.id, UserId::new("u1"));
        registry.identify(b.id, UserId::new("u1"));
        assert_eq!(registry.connections_for(&UserId::new("u1")).len(), 2);
    }

    #[test]
    fn test_reidentify_moves_binding() {
        let registry = ConnectionRegistry::new(8);
        let (conn, _rx) = registry.register();

        registry.identify(conn.id, UserId::new("u1"));
        registry.identify(conn.id, UserId::new("u2"));

        assert!(registry.connections_for(&UserId::new("u1")).is_empty());
        assert_eq!(registry.connections_for(&UserId::new("u2")).len(), 1);
    }

    #[test]
    fn test_forget_removes_everything() {
        let registry = ConnectionRegistry::new(8);
        let (conn, _rx) = registry.register();
        registry.identify(conn.id, UserId::new("u1"));

        registry.forget(&conn.id);
        assert_eq!(registry.connection_count(), 0);
        assert!(registry.connections_for(&UserId::new("u1")).is_empty());
        assert!(!conn.is_alive());
    }

    #[test]
    fn test_identify_unknown_connection_is_ignored() {
        let registry = ConnectionRegistry::new(8);
        registry.identify(ConnectionId::new(), UserId::new("u1"));
        assert!(registry.connections_for(&UserId::new("u1")).is_empty());
    }
}
