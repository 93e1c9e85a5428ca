//! Real-time WebSocket engine configuration.

use serde::{Deserialize, Serialize};

/// Real-time (WebSocket) engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealtimeConfig {
    /// Per-connection outbound message buffer size.
    #[serde(default = "default_channel_buffer")]
    pub channel_buffer_size: usize,
    /// Delivery scope for lifecycle (accept/pick/deliver) events.
    #[serde(default)]
    pub lifecycle_notifications: LifecycleScope,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            channel_buffer_size: default_channel_buffer(),
            lifecycle_notifications: LifecycleScope::default(),
        }
    }
}

/// Who receives `listing_accepted` / `listing_picked` / `listing_delivered`
/// events. `new_listing` is always broadcast regardless of this setting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleScope {
    /// All live connections.
    #[default]
    Broadcast,
    /// Only the listing's donor and the acting user.
    Participants,
}

fn default_channel_buffer() -> usize {
    64
}
