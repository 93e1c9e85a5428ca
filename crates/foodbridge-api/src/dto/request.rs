//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /listings`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PostListingRequest {
    /// The posting donor's identity.
    #[validate(length(min = 1, message = "donorId is required"))]
    pub donor_id: String,
    /// Short title of the offer.
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Free-form quantity.
    #[serde(default)]
    pub quantity: String,
}

/// Body of the accept / mark-picked / mark-delivered endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TransitionRequest {
    /// The acting user's identity.
    #[serde(rename = "userId")]
    #[validate(length(min = 1, message = "userId is required"))]
    pub user_id: String,
}

/// Query parameters of `GET /listings`.
#[derive(Debug, Clone, Deserialize)]
pub struct ListingQuery {
    /// Optional exact-match status filter.
    pub status: Option<String>,
}
