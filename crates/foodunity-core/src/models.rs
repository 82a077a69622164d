//! Domain documents and strongly-typed identifiers.
//!
//! Listings and requests are weakly-typed documents: the conventional
//! fields are optional and permissive, and anything else the client sends
//! is carried verbatim through a flattened map. Identifiers wrap the hex
//! form of a store ObjectId so they serialize as plain strings on the
//! wire while still enforcing the store identifier shape at the boundary.

use std::fmt;

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::CoreError;

/// Strongly-typed food listing identifier.
///
/// Holds the 24-hex encoding of a store ObjectId. Construct with
/// [`ListingId::generate`] for new documents or [`ListingId::parse`] for
/// client-supplied values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListingId(String);

impl ListingId {
    /// Assigns a fresh identifier.
    pub fn generate() -> Self {
        Self(ObjectId::new().to_hex())
    }

    /// Parses a client-supplied identifier, enforcing the ObjectId shape.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidId` if the value is not 24 hex characters.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        ObjectId::parse_str(value)
            .map(|oid| Self(oid.to_hex()))
            .map_err(|_| CoreError::InvalidId(value.to_string()))
    }

    /// Returns the identifier as a hex string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Strongly-typed food request identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(String);

impl RequestId {
    /// Assigns a fresh identifier.
    pub fn generate() -> Self {
        Self(ObjectId::new().to_hex())
    }

    /// Parses a client-supplied identifier, enforcing the ObjectId shape.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidId` if the value is not 24 hex characters.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        ObjectId::parse_str(value)
            .map(|oid| Self(oid.to_hex()))
            .map_err(|_| CoreError::InvalidId(value.to_string()))
    }

    /// Returns the identifier as a hex string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A surplus food listing.
///
/// The expiry and quantity fields accept any JSON value because clients
/// send them in whatever shape they like; malformed expiry values degrade
/// ordering rather than failing the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodListing {
    /// Store-assigned identifier; absent on payloads not yet inserted.
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ListingId>,

    /// Display name of the food item.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub food_name: Option<Value>,

    /// Image reference for the item.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub food_image: Option<Value>,

    /// Quantity, in whatever unit the donator typed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub food_quantity: Option<Value>,

    /// Pickup location free text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pickup_location: Option<Value>,

    /// Expiry timestamp; default sort key for listing queries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expired_date_time: Option<Value>,

    /// Listing status, e.g. "available" or "requested".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub food_status: Option<Value>,

    /// Email of the owner who listed the item.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub donator_email: Option<String>,

    /// Any additional fields the client submitted, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A request for someone else's listing.
///
/// `food_id` is a soft reference: it is compared as a raw string and never
/// checked against existing listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodRequest {
    /// Store-assigned identifier; absent on payloads not yet inserted.
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<RequestId>,

    /// Identifier of the listing being requested, as a raw string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub food_id: Option<String>,

    /// Email of the requester.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,

    /// Any additional fields the client submitted, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Sort direction for listing queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Ascending expiry, soonest first. The default.
    #[default]
    Asc,
    /// Descending expiry, latest first.
    Desc,
}

impl SortOrder {
    /// Maps the `?sort=` query value; anything other than `desc` is `Asc`.
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("desc") => Self::Desc,
            _ => Self::Asc,
        }
    }

    /// Store-level sort direction (1 ascending, -1 descending).
    pub const fn store_direction(self) -> i32 {
        match self {
            Self::Asc => 1,
            Self::Desc => -1,
        }
    }
}

/// Query for the full listing collection.
#[derive(Debug, Clone, Default)]
pub struct ListingQuery {
    /// Expiry sort direction applied at the store level.
    pub sort: SortOrder,
    /// Exact-match filter on the owner email, when present.
    pub email: Option<String>,
}

/// The six fields a listing update overwrites, and nothing else.
///
/// Fields default to JSON null when absent so the overwrite is blind:
/// whatever the client sent (or did not send) replaces the stored value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingPatch {
    /// Replacement food name.
    #[serde(default)]
    pub food_name: Value,
    /// Replacement image reference.
    #[serde(default)]
    pub food_image: Value,
    /// Replacement quantity.
    #[serde(default)]
    pub food_quantity: Value,
    /// Replacement pickup location.
    #[serde(default)]
    pub pickup_location: Value,
    /// Replacement expiry timestamp.
    #[serde(default)]
    pub expired_date_time: Value,
    /// Replacement status.
    #[serde(default)]
    pub food_status: Value,
}

/// Acknowledgment of a document insert, echoing the store result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertAck {
    /// Whether the store acknowledged the write.
    pub acknowledged: bool,
    /// Identifier assigned to the inserted document.
    pub inserted_id: String,
}

/// Acknowledgment of an upsert-style update, echoing the store counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAck {
    /// Whether the store acknowledged the write.
    pub acknowledged: bool,
    /// Number of documents matching the filter.
    pub matched_count: u64,
    /// Number of documents actually modified.
    pub modified_count: u64,
    /// Identifier of the document created by the upsert, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upserted_id: Option<String>,
}

/// Acknowledgment of a document delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAck {
    /// Whether the store acknowledged the delete.
    pub acknowledged: bool,
    /// Number of documents removed (0 or 1).
    pub deleted_count: u64,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn listing_id_rejects_non_object_id_shapes() {
        assert!(ListingId::parse("abc").is_err());
        assert!(ListingId::parse("zzzzzzzzzzzzzzzzzzzzzzzz").is_err());
        assert!(ListingId::parse("65f0a1b2c3d4e5f60718293a").is_ok());
    }

    #[test]
    fn listing_round_trips_extra_fields_verbatim() {
        let payload = json!({
            "foodName": "Rice",
            "foodQuantity": "2kg",
            "expiredDateTime": "2024-01-10",
            "donatorEmail": "a@b.com",
            "notes": {"allergens": ["gluten"]},
        });

        let listing: FoodListing = serde_json::from_value(payload.clone()).unwrap();
        assert_eq!(listing.food_name, Some(json!("Rice")));
        assert_eq!(listing.donator_email.as_deref(), Some("a@b.com"));
        assert_eq!(listing.extra.get("notes"), Some(&json!({"allergens": ["gluten"]})));

        let back = serde_json::to_value(&listing).unwrap();
        assert_eq!(back, payload);
    }

    #[test]
    fn request_keeps_food_id_as_raw_string() {
        let request: FoodRequest = serde_json::from_value(json!({
            "foodId": "not-an-object-id",
            "userEmail": "x@y.com",
        }))
        .unwrap();

        assert_eq!(request.food_id.as_deref(), Some("not-an-object-id"));
    }

    #[test]
    fn sort_order_defaults_to_ascending() {
        assert_eq!(SortOrder::from_param(None), SortOrder::Asc);
        assert_eq!(SortOrder::from_param(Some("asc")), SortOrder::Asc);
        assert_eq!(SortOrder::from_param(Some("anything")), SortOrder::Asc);
        assert_eq!(SortOrder::from_param(Some("desc")), SortOrder::Desc);
    }

    #[test]
    fn patch_defaults_absent_fields_to_null() {
        let patch: ListingPatch =
            serde_json::from_value(json!({"foodName": "Bread"})).unwrap();
        assert_eq!(patch.food_name, json!("Bread"));
        assert_eq!(patch.food_status, Value::Null);
    }
}
