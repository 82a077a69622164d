//! Fixture builders for test documents.

use foodunity_core::{FoodListing, FoodRequest};
use serde_json::{Map, Value};

/// Builder for test food listings with sensible defaults.
pub struct ListingBuilder {
    listing: FoodListing,
}

impl Default for ListingBuilder {
    fn default() -> Self {
        Self {
            listing: FoodListing {
                id: None,
                food_name: Some(Value::from("Rice")),
                food_image: Some(Value::from("https://example.com/rice.jpg")),
                food_quantity: Some(Value::from("2kg")),
                pickup_location: Some(Value::from("Community Fridge")),
                expired_date_time: Some(Value::from("2024-01-10")),
                food_status: Some(Value::from("available")),
                donator_email: Some("donator@example.com".to_string()),
                extra: Map::new(),
            },
        }
    }
}

impl ListingBuilder {
    /// Creates a builder with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the food name.
    #[must_use]
    pub fn name(mut self, name: &str) -> Self {
        self.listing.food_name = Some(Value::from(name));
        self
    }

    /// Sets the quantity.
    #[must_use]
    pub fn quantity(mut self, quantity: impl Into<Value>) -> Self {
        self.listing.food_quantity = Some(quantity.into());
        self
    }

    /// Sets the expiry value, in whatever shape the test needs.
    #[must_use]
    pub fn expiry(mut self, expiry: impl Into<Value>) -> Self {
        self.listing.expired_date_time = Some(expiry.into());
        self
    }

    /// Sets the listing status.
    #[must_use]
    pub fn status(mut self, status: &str) -> Self {
        self.listing.food_status = Some(Value::from(status));
        self
    }

    /// Sets the owner email.
    #[must_use]
    pub fn email(mut self, email: &str) -> Self {
        self.listing.donator_email = Some(email.to_string());
        self
    }

    /// Adds an arbitrary extra field.
    #[must_use]
    pub fn extra(mut self, key: &str, value: Value) -> Self {
        self.listing.extra.insert(key.to_string(), value);
        self
    }

    /// Returns the built listing.
    pub fn build(self) -> FoodListing {
        self.listing
    }
}

/// Builder for test food requests with sensible defaults.
pub struct RequestBuilder {
    request: FoodRequest,
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self {
            request: FoodRequest {
                id: None,
                food_id: Some("65f0a1b2c3d4e5f60718293a".to_string()),
                user_email: Some("requester@example.com".to_string()),
                extra: Map::new(),
            },
        }
    }
}

impl RequestBuilder {
    /// Creates a builder with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the referenced listing identifier (raw string).
    #[must_use]
    pub fn food_id(mut self, food_id: &str) -> Self {
        self.request.food_id = Some(food_id.to_string());
        self
    }

    /// Sets the requester email.
    #[must_use]
    pub fn email(mut self, email: &str) -> Self {
        self.request.user_email = Some(email.to_string());
        self
    }

    /// Adds an arbitrary extra field.
    #[must_use]
    pub fn extra(mut self, key: &str, value: Value) -> Self {
        self.request.extra.insert(key.to_string(), value);
        self
    }

    /// Returns the built request.
    pub fn build(self) -> FoodRequest {
        self.request
    }
}
