//! In-memory store implementations for tests.
//!
//! Behave like the production store down to the detail that matters for
//! ordering: the "store-level" sort compares the raw JSON encoding of the
//! expiry value, not a parsed timestamp, so tests exercise the two-stage
//! ordering the listing queries rely on.

use async_trait::async_trait;
use foodunity_core::{
    DeleteAck, FoodListing, FoodRequest, FoodStore, InsertAck, ListingId, ListingPatch,
    ListingQuery, RequestId, RequestStore, Result, SortOrder, UpdateAck,
};
use serde_json::Value;
use tokio::sync::RwLock;

/// In-memory food listing collection.
#[derive(Default)]
pub struct MemoryFoodStore {
    docs: RwLock<Vec<FoodListing>>,
}

fn raw_expiry_key(listing: &FoodListing) -> String {
    listing.expired_date_time.as_ref().map(Value::to_string).unwrap_or_default()
}

fn six_fields(listing: &FoodListing) -> [Option<Value>; 6] {
    [
        listing.food_name.clone(),
        listing.food_image.clone(),
        listing.food_quantity.clone(),
        listing.pickup_location.clone(),
        listing.expired_date_time.clone(),
        listing.food_status.clone(),
    ]
}

fn apply_patch(listing: &mut FoodListing, patch: &ListingPatch) {
    listing.food_name = Some(patch.food_name.clone());
    listing.food_image = Some(patch.food_image.clone());
    listing.food_quantity = Some(patch.food_quantity.clone());
    listing.pickup_location = Some(patch.pickup_location.clone());
    listing.expired_date_time = Some(patch.expired_date_time.clone());
    listing.food_status = Some(patch.food_status.clone());
}

#[async_trait]
impl FoodStore for MemoryFoodStore {
    async fn find_first(&self, limit: usize) -> Result<Vec<FoodListing>> {
        Ok(self.docs.read().await.iter().take(limit).cloned().collect())
    }

    async fn find_all(&self, query: &ListingQuery) -> Result<Vec<FoodListing>> {
        let docs = self.docs.read().await;
        let mut matching: Vec<FoodListing> = docs
            .iter()
            .filter(|doc| match &query.email {
                Some(email) => doc.donator_email.as_deref() == Some(email.as_str()),
                None => true,
            })
            .cloned()
            .collect();

        // Raw-value sort, as the store would do it over untyped fields.
        matching.sort_by(|a, b| {
            let ordering = raw_expiry_key(a).cmp(&raw_expiry_key(b));
            match query.sort {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });

        Ok(matching)
    }

    async fn find_by_id(&self, id: &ListingId) -> Result<Option<FoodListing>> {
        Ok(self.docs.read().await.iter().find(|doc| doc.id.as_ref() == Some(id)).cloned())
    }

    async fn insert(&self, mut listing: FoodListing) -> Result<InsertAck> {
        let id = listing.id.take().unwrap_or_else(ListingId::generate);
        listing.id = Some(id.clone());
        self.docs.write().await.push(listing);
        Ok(InsertAck { acknowledged: true, inserted_id: id.to_string() })
    }

    async fn upsert_fields(&self, id: &ListingId, patch: &ListingPatch) -> Result<UpdateAck> {
        let mut docs = self.docs.write().await;

        if let Some(doc) = docs.iter_mut().find(|doc| doc.id.as_ref() == Some(id)) {
            let before = six_fields(doc);
            apply_patch(doc, patch);
            let modified = u64::from(six_fields(doc) != before);
            return Ok(UpdateAck {
                acknowledged: true,
                matched_count: 1,
                modified_count: modified,
                upserted_id: None,
            });
        }

        let mut doc = FoodListing {
            id: Some(id.clone()),
            food_name: None,
            food_image: None,
            food_quantity: None,
            pickup_location: None,
            expired_date_time: None,
            food_status: None,
            donator_email: None,
            extra: serde_json::Map::new(),
        };
        apply_patch(&mut doc, patch);
        docs.push(doc);

        Ok(UpdateAck {
            acknowledged: true,
            matched_count: 0,
            modified_count: 0,
            upserted_id: Some(id.to_string()),
        })
    }

    async fn delete(&self, id: &ListingId) -> Result<DeleteAck> {
        let mut docs = self.docs.write().await;
        let before = docs.len();
        docs.retain(|doc| doc.id.as_ref() != Some(id));
        Ok(DeleteAck { acknowledged: true, deleted_count: (before - docs.len()) as u64 })
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

/// In-memory food request collection.
#[derive(Default)]
pub struct MemoryRequestStore {
    docs: RwLock<Vec<FoodRequest>>,
}

#[async_trait]
impl RequestStore for MemoryRequestStore {
    async fn find_all(&self, email: Option<&str>) -> Result<Vec<FoodRequest>> {
        Ok(self
            .docs
            .read()
            .await
            .iter()
            .filter(|doc| match email {
                Some(email) => doc.user_email.as_deref() == Some(email),
                None => true,
            })
            .cloned()
            .collect())
    }

    async fn find_by_listing(&self, food_id: &str) -> Result<Vec<FoodRequest>> {
        Ok(self
            .docs
            .read()
            .await
            .iter()
            .filter(|doc| doc.food_id.as_deref() == Some(food_id))
            .cloned()
            .collect())
    }

    async fn insert(&self, mut request: FoodRequest) -> Result<InsertAck> {
        let id = request.id.take().unwrap_or_else(RequestId::generate);
        request.id = Some(id.clone());
        self.docs.write().await.push(request);
        Ok(InsertAck { acknowledged: true, inserted_id: id.to_string() })
    }

    async fn delete(&self, id: &RequestId) -> Result<DeleteAck> {
        let mut docs = self.docs.write().await;
        let before = docs.len();
        docs.retain(|doc| doc.id.as_ref() != Some(id));
        Ok(DeleteAck { acknowledged: true, deleted_count: (before - docs.len()) as u64 })
    }
}
