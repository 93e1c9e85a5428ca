//! Listing lifecycle state machine and event publication.

use std::sync::Arc;

use tracing::info;

use foodbridge_core::config::realtime::LifecycleScope;
use foodbridge_core::types::{ListingId, UserId};
use foodbridge_core::{AppError, AppResult};
use foodbridge_entity::{Listing, ListingStatus, NewListing};
use foodbridge_realtime::{EventBus, ServerEvent};
use foodbridge_store::ListingStore;

/// Request to post a new listing.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PostListing {
    /// The posting donor.
    pub donor_id: UserId,
    /// Short title of the offer.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Free-form quantity.
    pub quantity: String,
}

/// Enforces the listing lifecycle and rejects invalid transitions before
/// they reach storage.
///
/// Every transition is a guarded read-modify-write delegated to
/// [`ListingStore::update`], whose per-id atomicity is what keeps two
/// simultaneous accept attempts from both succeeding. Events are published
/// only after the store write succeeds, outside any transactional unit:
/// a lost event leaves state correct.
#[derive(Debug)]
pub struct ListingService {
    store: Arc<ListingStore>,
    bus: Arc<EventBus>,
    lifecycle_scope: LifecycleScope,
}

impl ListingService {
    /// Create a new listing service.
    pub fn new(store: Arc<ListingStore>, bus: Arc<EventBus>, lifecycle_scope: LifecycleScope) -> Self {
        Self {
            store,
            bus,
            lifecycle_scope,
        }
    }

    /// Post a new listing in `available` state and broadcast `new_listing`.
    pub async fn post(&self, req: PostListing) -> AppResult<Listing> {
        if req.donor_id.as_str().trim().is_empty() {
            return Err(AppError::validation("donorId is required"));
        }
        if req.title.trim().is_empty() {
            return Err(AppError::validation("title is required"));
        }

        let listing = self
            .store
            .create(Listing::new(NewListing {
                donor_id: req.donor_id,
                title: req.title,
                description: req.description,
                quantity: req.quantity,
            }))
            .await?;

        info!(listing_id = %listing.id, donor_id = %listing.donor_id, "Listing posted");

        self.bus.publish(&ServerEvent::NewListing {
            listing: listing.clone(),
        });
        Ok(listing)
    }

    /// Accept an available listing on behalf of `user_id`.
    pub async fn accept(&self, listing_id: ListingId, user_id: UserId) -> AppResult<Listing> {
        let acceptor = user_id.clone();
        let listing = self
            .store
            .update(listing_id, move |l| l.accept(acceptor))
            .await?;

        info!(listing_id = %listing_id, by = %user_id, "Listing accepted");

        self.publish_lifecycle(
            &listing,
            &user_id,
            ServerEvent::ListingAccepted {
                listing_id,
                by: user_id.clone(),
            },
        );
        Ok(listing)
    }

    /// Mark an accepted listing as picked up.
    pub async fn mark_picked(&self, listing_id: ListingId, user_id: UserId) -> AppResult<Listing> {
        let listing = self.store.update(listing_id, |l| l.mark_picked()).await?;

        info!(listing_id = %listing_id, by = %user_id, "Listing picked up");

        self.publish_lifecycle(
            &listing,
            &user_id,
            ServerEvent::ListingPicked {
                listing_id,
                by: user_id.clone(),
            },
        );
        Ok(listing)
    }

    /// Mark a picked listing as delivered.
    pub async fn mark_delivered(&self, listing_id: ListingId, user_id: UserId) -> AppResult<Listing> {
        let listing = self.store.update(listing_id, |l| l.mark_delivered()).await?;

        info!(listing_id = %listing_id, by = %user_id, "Listing delivered");

        self.publish_lifecycle(
            &listing,
            &user_id,
            ServerEvent::ListingDelivered {
                listing_id,
                by: user_id.clone(),
            },
        );
        Ok(listing)
    }

    /// Fetch a single listing.
    pub async fn get(&self, listing_id: ListingId) -> AppResult<Listing> {
        self.store.get(listing_id).await
    }

    /// List listings, newest first, optionally filtered by status.
    pub async fn list(&self, status: Option<ListingStatus>) -> AppResult<Vec<Listing>> {
        self.store.list(status).await
    }

    fn publish_lifecycle(&self, listing: &Listing, actor: &UserId, event: ServerEvent) {
        match self.lifecycle_scope {
            LifecycleScope::Broadcast => self.bus.publish(&event),
            LifecycleScope::Participants => self
                .bus
                .publish_to(&[listing.donor_id.clone(), actor.clone()], &event),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use foodbridge_core::error::ErrorKind;
    use foodbridge_realtime::ConnectionRegistry;
    use foodbridge_store::MemoryStore;

    fn service_with(scope: LifecycleScope) -> (Arc<ListingService>, Arc<ConnectionRegistry>) {
        let registry = Arc::new(ConnectionRegistry::new(16));
        let bus = Arc::new(EventBus::new(registry.clone()));
        let store = Arc::new(ListingStore::new(Arc::new(MemoryStore::new())));
        (
            Arc::new(ListingService::new(store, bus, scope)),
            registry,
        )
    }

    fn post_req(donor: &str, title: &str) -> PostListing {
        PostListing {
            donor_id: UserId::new(donor),
            title: title.to_string(),
            description: String::new(),
            quantity: String::new(),
        }
    }

    #[tokio::test]
    async fn test_post_requires_donor_and_title() {
        let (service, _) = service_with(LifecycleScope::Broadcast);

        let err = service.post(post_req("", "Bread")).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let err = service.post(post_req("u1", "  ")).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_post_then_get_roundtrip() {
        let (service, _) = service_with(LifecycleScope::Broadcast);

        let listing = service.post(post_req("u1", "Bread")).await.unwrap();
        let fetched = service.get(listing.id).await.unwrap();

        assert_eq!(fetched.status, ListingStatus::Available);
        assert_eq!(fetched.description, "");
        assert_eq!(fetched.quantity, "");
        assert!(fetched.accepted_by.is_none());
    }

    #[tokio::test]
    async fn test_full_lifecycle_scenario() {
        let (service, _) = service_with(LifecycleScope::Broadcast);

        let listing = service.post(post_req("u1", "Bread")).await.unwrap();
        assert_eq!(listing.status, ListingStatus::Available);

        let listing = service.accept(listing.id, UserId::new("u2")).await.unwrap();
        assert_eq!(listing.status, ListingStatus::Accepted);
        assert_eq!(listing.accepted_by, Some(UserId::new("u2")));

        // A second accept conflicts and leaves state unchanged.
        let err = service
            .accept(listing.id, UserId::new("u3"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidTransition);
        let current = service.get(listing.id).await.unwrap();
        assert_eq!(current.accepted_by, Some(UserId::new("u2")));

        let listing = service
            .mark_picked(listing.id, UserId::new("u2"))
            .await
            .unwrap();
        assert_eq!(listing.status, ListingStatus::Picked);

        let listing = service
            .mark_delivered(listing.id, UserId::new("u2"))
            .await
            .unwrap();
        assert_eq!(listing.status, ListingStatus::Delivered);

        // Terminal: no further transition.
        let err = service
            .mark_delivered(listing.id, UserId::new("u2"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidTransition);
    }

    #[tokio::test]
    async fn test_transition_requires_immediately_preceding_state() {
        let (service, _) = service_with(LifecycleScope::Broadcast);
        let listing = service.post(post_req("u1", "Bread")).await.unwrap();

        let err = service
            .mark_picked(listing.id, UserId::new("u2"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidTransition);

        let err = service
            .mark_delivered(listing.id, UserId::new("u2"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidTransition);
    }

    #[tokio::test]
    async fn test_unknown_listing_is_not_found() {
        let (service, _) = service_with(LifecycleScope::Broadcast);
        let err = service
            .accept(ListingId::new(), UserId::new("u2"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_concurrent_accepts_exactly_one_wins() {
        let (service, _) = service_with(LifecycleScope::Broadcast);
        let listing = service.post(post_req("u1", "Bread")).await.unwrap();

        let (a, b) = tokio::join!(
            service.accept(listing.id, UserId::new("u2")),
            service.accept(listing.id, UserId::new("u3")),
        );
        assert!(a.is_ok() != b.is_ok(), "exactly one accept must win");

        let current = service.get(listing.id).await.unwrap();
        assert_eq!(current.status, ListingStatus::Accepted);
    }

    #[tokio::test]
    async fn test_connection_observes_events_in_publication_order() {
        let (service, registry) = service_with(LifecycleScope::Broadcast);
        let (_conn, mut rx) = registry.register();

        let listing = service.post(post_req("u1", "Bread")).await.unwrap();
        service.accept(listing.id, UserId::new("u2")).await.unwrap();

        assert!(rx.try_recv().unwrap().contains("new_listing"));
        assert!(rx.try_recv().unwrap().contains("listing_accepted"));
    }

    #[tokio::test]
    async fn test_participants_scope_targets_donor_and_actor() {
        let (service, registry) = service_with(LifecycleScope::Participants);

        let (donor_conn, mut donor_rx) = registry.register();
        registry.identify(donor_conn.id, UserId::new("u1"));
        let (bystander_conn, mut bystander_rx) = registry.register();
        registry.identify(bystander_conn.id, UserId::new("u9"));

        let listing = service.post(post_req("u1", "Bread")).await.unwrap();
        service.accept(listing.id, UserId::new("u2")).await.unwrap();

        // new_listing is always broadcast.
        assert!(bystander_rx.try_recv().unwrap().contains("new_listing"));
        // The lifecycle event reaches only the participants.
        assert!(bystander_rx.try_recv().is_err());
        assert!(donor_rx.try_recv().unwrap().contains("new_listing"));
        assert!(donor_rx.try_recv().unwrap().contains("listing_accepted"));
    }

    #[tokio::test]
    async fn test_picked_and_delivered_events_carry_the_actor() {
        let (service, registry) = service_with(LifecycleScope::Broadcast);

        let listing = service.post(post_req("u1", "Bread")).await.unwrap();
        service.accept(listing.id, UserId::new("u2")).await.unwrap();

        let (_conn, mut rx) = registry.register();
        service
            .mark_picked(listing.id, UserId::new("u2"))
            .await
            .unwrap();
        service
            .mark_delivered(listing.id, UserId::new("u2"))
            .await
            .unwrap();

        let picked = rx.try_recv().unwrap();
        assert!(picked.contains("listing_picked"));
        assert!(picked.contains("\"by\":\"u2\""));
        let delivered = rx.try_recv().unwrap();
        assert!(delivered.contains("listing_delivered"));
        assert!(delivered.contains("\"by\":\"u2\""));
    }

    #[tokio::test]
    async fn test_failed_transition_publishes_nothing() {
        let (service, registry) = service_with(LifecycleScope::Broadcast);
        let listing = service.post(post_req("u1", "Bread")).await.unwrap();

        let (_conn, mut rx) = registry.register();
        let _ = service.mark_picked(listing.id, UserId::new("u2")).await;
        assert!(rx.try_recv().is_err());
    }
}
