//! Event bus — fans lifecycle events out to live connections.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, error};

use foodbridge_core::types::{ConnectionId, UserId};

use crate::connection::ConnectionRegistry;
use crate::message::ServerEvent;

/// Publishes lifecycle events to connections resolved through the
/// [`ConnectionRegistry`].
///
/// Delivery is fire-and-forget and at-most-once: the event is serialized
/// once and pushed into each connection's bounded outbound queue without
/// awaiting; a disconnected or backed-up recipient simply misses it.
/// Events published in sequence reach any single connection in
/// publication order.
#[derive(Debug)]
pub struct EventBus {
    registry: Arc<ConnectionRegistry>,
}

impl EventBus {
    /// Create an event bus over the given registry.
    pub fn new(registry: Arc<ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// Broadcast an event to every live connection.
    pub fn publish(&self, event: &ServerEvent) {
        let Some(msg) = serialize(event) else {
            return;
        };

        let connections = self.registry.all_connections();
        let mut delivered = 0usize;
        for conn in &connections {
            if conn.send(msg.clone()) {
                delivered += 1;
            }
        }

        debug!(
            event = event.name(),
            connections = connections.len(),
            delivered,
            "Event broadcast"
        );
    }

    /// Deliver an event only to the given users' connections.
    pub fn publish_to(&self, users: &[UserId], event: &ServerEvent) {
        let Some(msg) = serialize(event) else {
            return;
        };

        // A user may appear twice in the target list; deliver once per connection.
        let mut seen: HashSet<ConnectionId> = HashSet::new();
        let mut delivered = 0usize;
        for user in users {
            for conn in self.registry.connections_for(user) {
                if seen.insert(conn.id) && conn.send(msg.clone()) {
                    delivered += 1;
                }
            }
        }

        debug!(
            event = event.name(),
            targets = users.len(),
            delivered,
            "Event delivered to targets"
        );
    }
}

fn serialize(event: &ServerEvent) -> Option<String> {
    match serde_json::to_string(event) {
        Ok(msg) => Some(msg),
        Err(e) => {
            error!(event = event.name(), error = %e, "Failed to serialize event");
            None
        }
    }
}
