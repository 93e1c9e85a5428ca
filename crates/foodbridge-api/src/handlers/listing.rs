//! Listing lifecycle handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};
use validator::Validate;

use foodbridge_core::error::AppError;
use foodbridge_core::types::{ListingId, UserId};
use foodbridge_entity::ListingStatus;
use foodbridge_service::PostListing;

use crate::dto::{ListingQuery, PostListingRequest, TransitionRequest};
use crate::error::ApiError;
use crate::state::AppState;

/// POST /listings
pub async fn post_listing(
    State(state): State<AppState>,
    Json(req): Json<PostListingRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let listing = state
        .listing_service
        .post(PostListing {
            donor_id: UserId::new(req.donor_id),
            title: req.title,
            description: req.description,
            quantity: req.quantity,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(json!({ "listing": listing }))))
}

/// GET /listings?status=<s>
pub async fn list_listings(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> Result<Json<Value>, ApiError> {
    let status = query
        .status
        .as_deref()
        .map(str::parse::<ListingStatus>)
        .transpose()?;

    let listings = state.listing_service.list(status).await?;
    Ok(Json(json!({ "listings": listings })))
}

/// GET /listings/{id}
pub async fn get_listing(
    State(state): State<AppState>,
    Path(id): Path<ListingId>,
) -> Result<Json<Value>, ApiError> {
    let listing = state.listing_service.get(id).await?;
    Ok(Json(json!({ "listing": listing })))
}

/// POST /listings/{id}/accept
pub async fn accept_listing(
    State(state): State<AppState>,
    Path(id): Path<ListingId>,
    Json(req): Json<TransitionRequest>,
) -> Result<Json<Value>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let listing = state
        .listing_service
        .accept(id, UserId::new(req.user_id))
        .await?;
    Ok(Json(json!({ "listing": listing })))
}

/// POST /listings/{id}/mark-picked
pub async fn mark_picked(
    State(state): State<AppState>,
    Path(id): Path<ListingId>,
    Json(req): Json<TransitionRequest>,
) -> Result<Json<Value>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let listing = state
        .listing_service
        .mark_picked(id, UserId::new(req.user_id))
        .await?;
    Ok(Json(json!({ "listing": listing })))
}

/// POST /listings/{id}/mark-delivered
pub async fn mark_delivered(
    State(state): State<AppState>,
    Path(id): Path<ListingId>,
    Json(req): Json<TransitionRequest>,
) -> Result<Json<Value>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let listing = state
        .listing_service
        .mark_delivered(id, UserId::new(req.user_id))
        .await?;
    Ok(Json(json!({ "listing": listing })))
}
