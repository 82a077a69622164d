//! MongoDB-backed store implementations.
//!
//! Each trait method performs exactly one driver call and echoes the
//! driver's acknowledgment, keeping the HTTP layer a thin mapping over
//! collection operations. Identifiers are stored as their hex string form,
//! so filters bind plain strings.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, to_document, Bson},
    Collection, Database,
};
pub use mongodb::Client;
use tracing::instrument;

use crate::{
    error::Result,
    models::{
        DeleteAck, FoodListing, FoodRequest, InsertAck, ListingId, ListingPatch, ListingQuery,
        RequestId, UpdateAck,
    },
    store::{FoodStore, RequestStore},
};

const FOODS_COLLECTION: &str = "foods";
const REQUESTS_COLLECTION: &str = "requests";

/// Connects a client and verifies it with a ping.
///
/// # Errors
///
/// Returns `CoreError::Store` if the URL is invalid or the deployment does
/// not answer the ping.
pub async fn connect(url: &str) -> Result<Client> {
    let client = Client::with_uri_str(url).await?;
    client.database("admin").run_command(doc! {"ping": 1}).await?;
    Ok(client)
}

/// Food listing collection backed by MongoDB.
pub struct MongoFoodStore {
    db: Database,
    collection: Collection<FoodListing>,
}

impl MongoFoodStore {
    /// Creates a store over the `foods` collection of the given database.
    pub fn new(db: &Database) -> Self {
        Self { db: db.clone(), collection: db.collection(FOODS_COLLECTION) }
    }
}

#[async_trait]
impl FoodStore for MongoFoodStore {
    #[instrument(skip(self))]
    async fn find_first(&self, limit: usize) -> Result<Vec<FoodListing>> {
        let cursor = self
            .collection
            .find(doc! {})
            .limit(i64::try_from(limit).unwrap_or(i64::MAX))
            .await?;
        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self))]
    async fn find_all(&self, query: &ListingQuery) -> Result<Vec<FoodListing>> {
        let filter = match &query.email {
            Some(email) => doc! {"donatorEmail": email},
            None => doc! {},
        };
        let cursor = self
            .collection
            .find(filter)
            .sort(doc! {"expiredDateTime": query.sort.store_direction()})
            .await?;
        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &ListingId) -> Result<Option<FoodListing>> {
        Ok(self.collection.find_one(doc! {"_id": id.as_str()}).await?)
    }

    #[instrument(skip(self, listing))]
    async fn insert(&self, mut listing: FoodListing) -> Result<InsertAck> {
        let id = listing.id.take().unwrap_or_else(ListingId::generate);
        listing.id = Some(id.clone());
        self.collection.insert_one(&listing).await?;
        Ok(InsertAck { acknowledged: true, inserted_id: id.to_string() })
    }

    #[instrument(skip(self, patch))]
    async fn upsert_fields(&self, id: &ListingId, patch: &ListingPatch) -> Result<UpdateAck> {
        let set = to_document(patch)?;
        let result = self
            .collection
            .update_one(doc! {"_id": id.as_str()}, doc! {"$set": set})
            .upsert(true)
            .await?;
        Ok(UpdateAck {
            acknowledged: true,
            matched_count: result.matched_count,
            modified_count: result.modified_count,
            upserted_id: result.upserted_id.map(bson_id_to_string),
        })
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &ListingId) -> Result<DeleteAck> {
        let result = self.collection.delete_one(doc! {"_id": id.as_str()}).await?;
        Ok(DeleteAck { acknowledged: true, deleted_count: result.deleted_count })
    }

    async fn ping(&self) -> Result<()> {
        self.db.run_command(doc! {"ping": 1}).await?;
        Ok(())
    }
}

/// Food request collection backed by MongoDB.
pub struct MongoRequestStore {
    collection: Collection<FoodRequest>,
}

impl MongoRequestStore {
    /// Creates a store over the `requests` collection of the given database.
    pub fn new(db: &Database) -> Self {
        Self { collection: db.collection(REQUESTS_COLLECTION) }
    }
}

#[async_trait]
impl RequestStore for MongoRequestStore {
    #[instrument(skip(self))]
    async fn find_all(&self, email: Option<&str>) -> Result<Vec<FoodRequest>> {
        let filter = match email {
            Some(email) => doc! {"userEmail": email},
            None => doc! {},
        };
        let cursor = self.collection.find(filter).await?;
        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self))]
    async fn find_by_listing(&self, food_id: &str) -> Result<Vec<FoodRequest>> {
        let cursor = self.collection.find(doc! {"foodId": food_id}).await?;
        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self, request))]
    async fn insert(&self, mut request: FoodRequest) -> Result<InsertAck> {
        let id = request.id.take().unwrap_or_else(RequestId::generate);
        request.id = Some(id.clone());
        self.collection.insert_one(&request).await?;
        Ok(InsertAck { acknowledged: true, inserted_id: id.to_string() })
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &RequestId) -> Result<DeleteAck> {
        let result = self.collection.delete_one(doc! {"_id": id.as_str()}).await?;
        Ok(DeleteAck { acknowledged: true, deleted_count: result.deleted_count })
    }
}

fn bson_id_to_string(id: Bson) -> String {
    match id {
        Bson::String(s) => s,
        Bson::ObjectId(oid) => oid.to_hex(),
        other => other.to_string(),
    }
}
