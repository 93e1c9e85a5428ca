//! Wire message type definitions for the real-time channel.

use serde::{Deserialize, Serialize};

use foodbridge_core::types::{ListingId, UserId};
use foodbridge_entity::Listing;

/// Messages sent by the client to the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InboundMessage {
    /// Associate this connection with a logged-in user.
    Identify {
        /// The user identity issued by the Authentication Service.
        #[serde(rename = "userId")]
        user_id: UserId,
    },
}

/// Lifecycle events pushed to clients.
///
/// Serialized with an `event` tag so clients can dispatch on the event
/// name (`new_listing`, `listing_accepted`, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ServerEvent {
    /// A donor posted a new listing. Carries the full record.
    NewListing {
        /// The created listing.
        listing: Listing,
    },
    /// A listing was accepted.
    ListingAccepted {
        /// The listing that changed.
        #[serde(rename = "listingId")]
        listing_id: ListingId,
        /// The accepting user.
        by: UserId,
    },
    /// A listing was picked up.
    ListingPicked {
        /// The listing that changed.
        #[serde(rename = "listingId")]
        listing_id: ListingId,
        /// The acting user.
        by: UserId,
    },
    /// A listing was delivered.
    ListingDelivered {
        /// The listing that changed.
        #[serde(rename = "listingId")]
        listing_id: ListingId,
        /// The acting user.
        by: UserId,
    },
}

impl ServerEvent {
    /// The event name as it appears on the wire.
    pub fn name(&self) -> &'static str {
        match self {
            Self::NewListing { .. } => "new_listing",
            Self::ListingAccepted { .. } => "listing_accepted",
            Self::ListingPicked { .. } => "listing_picked",
            Self::ListingDelivered { .. } => "listing_delivered",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identify_wire_form() {
        let msg: InboundMessage =
            serde_json::from_str(r#"{"type":"identify","userId":"u1"}"#).unwrap();
        let InboundMessage::Identify { user_id } = msg;
        assert_eq!(user_id, UserId::new("u1"));
    }

    #[test]
    fn test_event_tag_matches_name() {
        let event = ServerEvent::ListingAccepted {
            listing_id: ListingId::new(),
            by: UserId::new("u2"),
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value.get("event").unwrap(), event.name());
        assert_eq!(value.get("by").unwrap(), "u2");
        assert!(value.get("listingId").is_some());
    }
}
