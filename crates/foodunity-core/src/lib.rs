//! Core domain models and storage access for the Food Unity backend.
//!
//! Defines the weakly-typed listing and request documents, newtype
//! identifiers, expiry-date ordering, and the storage seam every other
//! crate depends on. Persistence is delegated to an external document
//! store; this crate treats it as a collaborator offering per-document
//! CRUD with filter/sort queries.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod expiry;
pub mod models;
pub mod store;

pub use error::{CoreError, Result};
pub use models::{
    DeleteAck, FoodListing, FoodRequest, InsertAck, ListingId, ListingPatch, ListingQuery,
    RequestId, SortOrder, UpdateAck,
};
pub use store::{FoodStore, RequestStore, Storage};
