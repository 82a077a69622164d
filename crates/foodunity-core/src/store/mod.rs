//! Storage seam for the document store.
//!
//! Handlers never talk to the driver directly: they go through the
//! [`FoodStore`] and [`RequestStore`] traits, bundled into a [`Storage`]
//! container that is injected into the HTTP state. Production uses the
//! MongoDB-backed implementations in [`mongo`]; tests substitute in-memory
//! doubles.

use std::sync::Arc;

use async_trait::async_trait;

pub mod mongo;

use crate::{
    error::Result,
    models::{
        DeleteAck, FoodListing, FoodRequest, InsertAck, ListingId, ListingPatch, ListingQuery,
        RequestId, UpdateAck,
    },
};

/// Document-store operations over the food listing collection.
#[async_trait]
pub trait FoodStore: Send + Sync {
    /// Fetches up to `limit` listings in the store's natural order.
    async fn find_first(&self, limit: usize) -> Result<Vec<FoodListing>>;

    /// Fetches listings matching the query, sorted at the store level by
    /// the raw expiry value. Callers re-sort by parsed expiry afterwards.
    async fn find_all(&self, query: &ListingQuery) -> Result<Vec<FoodListing>>;

    /// Fetches a single listing by identifier.
    async fn find_by_id(&self, id: &ListingId) -> Result<Option<FoodListing>>;

    /// Inserts a new listing, assigning an identifier if absent.
    async fn insert(&self, listing: FoodListing) -> Result<InsertAck>;

    /// Overwrites exactly the six patch fields, inserting a new document
    /// when no listing with this identifier exists.
    async fn upsert_fields(&self, id: &ListingId, patch: &ListingPatch) -> Result<UpdateAck>;

    /// Removes a listing by identifier.
    async fn delete(&self, id: &ListingId) -> Result<DeleteAck>;

    /// Verifies the store connection is alive.
    async fn ping(&self) -> Result<()>;
}

/// Document-store operations over the food request collection.
#[async_trait]
pub trait RequestStore: Send + Sync {
    /// Fetches requests, optionally filtered by exact requester email.
    async fn find_all(&self, email: Option<&str>) -> Result<Vec<FoodRequest>>;

    /// Fetches all requests whose `foodId` equals the raw string.
    async fn find_by_listing(&self, food_id: &str) -> Result<Vec<FoodRequest>>;

    /// Inserts a new request, assigning an identifier if absent.
    async fn insert(&self, request: FoodRequest) -> Result<InsertAck>;

    /// Removes a request by identifier.
    async fn delete(&self, id: &RequestId) -> Result<DeleteAck>;
}

/// Container bundling the store handles for injection into handlers.
#[derive(Clone)]
pub struct Storage {
    /// Food listing collection.
    pub foods: Arc<dyn FoodStore>,
    /// Food request collection.
    pub requests: Arc<dyn RequestStore>,
}

impl Storage {
    /// Creates production storage over a MongoDB database handle.
    pub fn mongo(db: &mongodb::Database) -> Self {
        Self {
            foods: Arc::new(mongo::MongoFoodStore::new(db)),
            requests: Arc::new(mongo::MongoRequestStore::new(db)),
        }
    }

    /// Performs a health check against the document store.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Store` if the store does not answer the ping.
    pub async fn health_check(&self) -> Result<()> {
        self.foods.ping().await
    }
}
