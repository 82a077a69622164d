//! Food request handlers.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use foodunity_core::{DeleteAck, FoodRequest, InsertAck, RequestId};
use serde::Deserialize;
use tracing::instrument;

use crate::{error::ApiError, server::AppState};

/// Query parameters for the request collection.
#[derive(Debug, Deserialize)]
pub struct ListRequestsParams {
    /// Exact-match filter on the requester email.
    pub email: Option<String>,
}

/// `GET /requests` — all requests, optionally filtered by requester email.
#[instrument(name = "list_requests", skip(state))]
pub async fn list_requests(
    State(state): State<AppState>,
    Query(params): Query<ListRequestsParams>,
) -> Result<Json<Vec<FoodRequest>>, ApiError> {
    Ok(Json(state.storage.requests.find_all(params.email.as_deref()).await?))
}

/// `GET /manage/{food_id}` — requests for one listing.
///
/// `food_id` is compared as a raw string and never validated as a store
/// identifier; the reference to the listing is soft.
#[instrument(name = "list_requests_for_listing", skip(state))]
pub async fn list_requests_for_listing(
    State(state): State<AppState>,
    Path(food_id): Path<String>,
) -> Result<Json<Vec<FoodRequest>>, ApiError> {
    Ok(Json(state.storage.requests.find_by_listing(&food_id).await?))
}

/// `POST /requests` — insert the request payload verbatim.
#[instrument(name = "create_request", skip(state, request))]
pub async fn create_request(
    State(state): State<AppState>,
    Json(request): Json<FoodRequest>,
) -> Result<Json<InsertAck>, ApiError> {
    Ok(Json(state.storage.requests.insert(request).await?))
}

/// `DELETE /requests/{id}` — remove a request by identifier.
#[instrument(name = "delete_request", skip(state))]
pub async fn delete_request(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteAck>, ApiError> {
    let id = RequestId::parse(&id)?;
    Ok(Json(state.storage.requests.delete(&id).await?))
}
