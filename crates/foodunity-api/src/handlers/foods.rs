//! Food listing handlers.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use foodunity_core::{
    expiry, DeleteAck, FoodListing, InsertAck, ListingId, ListingPatch, ListingQuery, SortOrder,
    UpdateAck,
};
use serde::Deserialize;
use tracing::instrument;

use crate::{error::ApiError, server::AppState};

/// Number of listings the homepage teaser fetches.
const FEATURED_LIMIT: usize = 6;

/// Query parameters for the full listing collection.
#[derive(Debug, Deserialize)]
pub struct ListFoodsParams {
    /// `asc` (default) or `desc`.
    pub sort: Option<String>,
    /// Exact-match filter on the owner email.
    pub email: Option<String>,
}

/// `GET /first-six` — up to six listings in the store's natural order.
#[instrument(name = "list_first_six", skip(state))]
pub async fn list_first_six(
    State(state): State<AppState>,
) -> Result<Json<Vec<FoodListing>>, ApiError> {
    Ok(Json(state.storage.foods.find_first(FEATURED_LIMIT).await?))
}

/// `GET /foods` — all listings, filtered and ordered by expiry.
///
/// The store sorts by the raw expiry value first; the re-sort over parsed
/// timestamps below is the authoritative order. Both stages are required:
/// stored expiry values have no enforced type, so the stages can disagree.
#[instrument(name = "list_foods", skip(state))]
pub async fn list_foods(
    State(state): State<AppState>,
    Query(params): Query<ListFoodsParams>,
) -> Result<Json<Vec<FoodListing>>, ApiError> {
    let query = ListingQuery {
        sort: SortOrder::from_param(params.sort.as_deref()),
        email: params.email,
    };

    let mut listings = state.storage.foods.find_all(&query).await?;
    expiry::sort_listings(&mut listings, query.sort);

    Ok(Json(listings))
}

/// `GET /foods/{id}` — a single listing, or JSON null when absent.
#[instrument(name = "get_food", skip(state))]
pub async fn get_food(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Option<FoodListing>>, ApiError> {
    let id = ListingId::parse(&id)?;
    Ok(Json(state.storage.foods.find_by_id(&id).await?))
}

/// `GET /update/{id}` — same fetch as [`get_food`] on a separate route
/// used by the edit form.
#[instrument(name = "get_food_for_edit", skip(state))]
pub async fn get_food_for_edit(
    state: State<AppState>,
    id: Path<String>,
) -> Result<Json<Option<FoodListing>>, ApiError> {
    get_food(state, id).await
}

/// `POST /foods` — insert the listing payload verbatim.
#[instrument(name = "create_food", skip(state, listing))]
pub async fn create_food(
    State(state): State<AppState>,
    Json(listing): Json<FoodListing>,
) -> Result<Json<InsertAck>, ApiError> {
    Ok(Json(state.storage.foods.insert(listing).await?))
}

/// `PUT /update/{id}` — blind overwrite of the six fixed fields, creating
/// the document when the identifier matches nothing (upsert).
#[instrument(name = "update_food", skip(state, patch))]
pub async fn update_food(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<ListingPatch>,
) -> Result<Json<UpdateAck>, ApiError> {
    let id = ListingId::parse(&id)?;
    Ok(Json(state.storage.foods.upsert_fields(&id, &patch).await?))
}

/// `DELETE /foods/{id}` — remove a listing by identifier.
#[instrument(name = "delete_food", skip(state))]
pub async fn delete_food(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteAck>, ApiError> {
    let id = ListingId::parse(&id)?;
    Ok(Json(state.storage.foods.delete(&id).await?))
}
