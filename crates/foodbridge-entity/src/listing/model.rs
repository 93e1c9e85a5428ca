//! Donation listing model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use foodbridge_core::types::{ListingId, UserId};
use foodbridge_core::{AppError, AppResult};

use super::status::ListingStatus;

/// A surplus-food donation offer progressing through a fixed lifecycle.
///
/// Listings are append-only: they are created in `available` state, mutated
/// only through the guarded transition methods below, and never deleted.
/// Each stage timestamp is set exactly once, when the stage is reached.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    /// Unique listing identifier.
    pub id: ListingId,
    /// The donor who posted the listing.
    pub donor_id: UserId,
    /// Short title of the offer.
    pub title: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Free-form quantity (e.g. "3 loaves").
    #[serde(default)]
    pub quantity: String,
    /// Current lifecycle stage.
    pub status: ListingStatus,
    /// The user who accepted the listing. Set exactly once.
    pub accepted_by: Option<UserId>,
    /// When the listing was posted.
    pub created_at: DateTime<Utc>,
    /// When the listing was accepted.
    pub accepted_at: Option<DateTime<Utc>>,
    /// When the listing was picked up.
    pub picked_at: Option<DateTime<Utc>>,
    /// When the listing was delivered.
    pub delivered_at: Option<DateTime<Utc>>,
}

/// Data required to create a new listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewListing {
    /// The posting donor.
    pub donor_id: UserId,
    /// Short title of the offer.
    pub title: String,
    /// Free-form description (defaults to empty).
    pub description: String,
    /// Free-form quantity (defaults to empty).
    pub quantity: String,
}

impl Listing {
    /// Create a fresh listing in `available` state.
    pub fn new(data: NewListing) -> Self {
        Self {
            id: ListingId::new(),
            donor_id: data.donor_id,
            title: data.title,
            description: data.description,
            quantity: data.quantity,
            status: ListingStatus::Available,
            accepted_by: None,
            created_at: Utc::now(),
            accepted_at: None,
            picked_at: None,
            delivered_at: None,
        }
    }

    /// Transition `available` → `accepted`, recording the acceptor.
    ///
    /// Fails without mutating if the listing is not currently available.
    pub fn accept(&mut self, user_id: UserId) -> AppResult<()> {
        self.guard(ListingStatus::Available, ListingStatus::Accepted)?;
        self.status = ListingStatus::Accepted;
        self.accepted_by = Some(user_id);
        self.accepted_at = Some(Utc::now());
        Ok(())
    }

    /// Transition `accepted` → `picked`.
    pub fn mark_picked(&mut self) -> AppResult<()> {
        self.guard(ListingStatus::Accepted, ListingStatus::Picked)?;
        self.status = ListingStatus::Picked;
        self.picked_at = Some(Utc::now());
        Ok(())
    }

    /// Transition `picked` → `delivered`.
    pub fn mark_delivered(&mut self) -> AppResult<()> {
        self.guard(ListingStatus::Picked, ListingStatus::Delivered)?;
        self.status = ListingStatus::Delivered;
        self.delivered_at = Some(Utc::now());
        Ok(())
    }

    fn guard(&self, expected: ListingStatus, target: ListingStatus) -> AppResult<()> {
        if self.status != expected {
            return Err(AppError::invalid_transition(format!(
                "Cannot move listing to '{target}': status is '{}', expected '{expected}'",
                self.status
            )));
        }
        Ok(())
    }
}
