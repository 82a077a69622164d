//! Food listing endpoint tests.
//!
//! Exercises the listing lifecycle end to end against the real router
//! with in-memory storage: create, fetch, two-stage expiry ordering,
//! exact email filtering, six-field updates, upserts, and deletes.

use axum::http::StatusCode;
use foodunity_core::expiry::parse_expiry;
use foodunity_testing::{ListingBuilder, TestEnv};
use serde_json::{json, Value};

/// An identifier with a valid store shape that matches no document.
const UNKNOWN_ID: &str = "65f0a1b2c3d4e5f60718293b";

#[tokio::test]
async fn create_then_get_returns_a_superset_of_the_payload() {
    let env = TestEnv::new();

    let payload = json!({
        "foodName": "Rice",
        "foodQuantity": "2kg",
        "expiredDateTime": "2024-01-10",
        "donatorEmail": "a@b.com",
        "notes": "pickup after 6pm",
    });

    let created = env.post_json("/foods", &payload).await;
    assert_eq!(created.status, StatusCode::OK);

    let ack = created.json();
    assert_eq!(ack["acknowledged"], json!(true));
    let id = ack["insertedId"].as_str().expect("insertedId should be a string").to_string();

    let fetched = env.get(&format!("/foods/{id}")).await;
    assert_eq!(fetched.status, StatusCode::OK);

    let listing = fetched.json();
    for (key, value) in payload.as_object().unwrap() {
        assert_eq!(&listing[key], value, "field {key} should round-trip");
    }
    assert_eq!(listing["_id"], json!(id));
}

#[tokio::test]
async fn listing_order_is_chronological_not_lexicographic() {
    let env = TestEnv::new();

    // Lexicographically "2024-01-10" sorts before "2024-1-2"; the re-sort
    // over parsed dates must put January 2nd first.
    env.seed_listing(ListingBuilder::new().name("Bread").expiry("2024-01-10").build()).await;
    env.seed_listing(ListingBuilder::new().name("Milk").expiry("2024-1-2").build()).await;
    env.seed_listing(ListingBuilder::new().name("Soup").expiry("2024-01-05T08:00").build()).await;

    let response = env.get("/foods?sort=asc").await;
    assert_eq!(response.status, StatusCode::OK);

    let listings = response.json();
    let names: Vec<&str> =
        listings.as_array().unwrap().iter().map(|l| l["foodName"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Milk", "Soup", "Bread"]);
}

#[tokio::test]
async fn ascending_sort_has_non_decreasing_parsed_expiries() {
    let env = TestEnv::new();
    for expiry in ["2024-03-01", "2024-01-15", "2024-02-20T12:00", "2023-12-31"] {
        env.seed_listing(ListingBuilder::new().expiry(expiry).build()).await;
    }

    let listings = env.get("/foods?sort=asc").await.json();
    let parsed: Vec<_> = listings
        .as_array()
        .unwrap()
        .iter()
        .map(|l| parse_expiry(&l["expiredDateTime"]).expect("seeded expiries parse"))
        .collect();

    assert!(parsed.windows(2).all(|pair| pair[0] <= pair[1]));
}

#[tokio::test]
async fn descending_sort_has_non_increasing_parsed_expiries() {
    let env = TestEnv::new();
    for expiry in ["2024-03-01", "2024-01-15", "2024-02-20T12:00", "2023-12-31"] {
        env.seed_listing(ListingBuilder::new().expiry(expiry).build()).await;
    }

    let listings = env.get("/foods?sort=desc").await.json();
    let parsed: Vec<_> = listings
        .as_array()
        .unwrap()
        .iter()
        .map(|l| parse_expiry(&l["expiredDateTime"]).expect("seeded expiries parse"))
        .collect();

    assert!(parsed.windows(2).all(|pair| pair[0] >= pair[1]));
}

#[tokio::test]
async fn email_filter_matches_exactly_not_partially() {
    let env = TestEnv::new();
    env.seed_listing(ListingBuilder::new().name("Mine").email("a@b.com").build()).await;
    env.seed_listing(ListingBuilder::new().name("NotMine").email("aa@b.com").build()).await;

    let listings = env.get("/foods?email=a@b.com").await.json();
    let listings = listings.as_array().unwrap();

    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0]["foodName"], json!("Mine"));
}

#[tokio::test]
async fn first_six_returns_at_most_six_listings() {
    let env = TestEnv::new();
    for i in 0..8 {
        env.seed_listing(ListingBuilder::new().name(&format!("Item{i}")).build()).await;
    }

    let response = env.get("/first-six").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json().as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn update_overwrites_exactly_six_fields_and_nothing_else() {
    let env = TestEnv::new();
    let id = env
        .seed_listing(
            ListingBuilder::new()
                .name("Rice")
                .email("owner@example.com")
                .extra("notes", json!("keep me"))
                .build(),
        )
        .await;

    let patch = json!({
        "foodName": "Brown Rice",
        "foodImage": "https://example.com/brown-rice.jpg",
        "foodQuantity": "1kg",
        "pickupLocation": "Main Hall",
        "expiredDateTime": "2024-02-01",
        "foodStatus": "requested",
    });

    let updated = env.put_json(&format!("/update/{id}"), &patch).await;
    assert_eq!(updated.status, StatusCode::OK);

    let ack = updated.json();
    assert_eq!(ack["matchedCount"], json!(1));
    assert_eq!(ack["modifiedCount"], json!(1));

    let listing = env.get(&format!("/foods/{id}")).await.json();
    for (key, value) in patch.as_object().unwrap() {
        assert_eq!(&listing[key], value, "field {key} should be overwritten");
    }
    assert_eq!(listing["donatorEmail"], json!("owner@example.com"));
    assert_eq!(listing["notes"], json!("keep me"));
}

#[tokio::test]
async fn update_on_unknown_identifier_upserts_a_new_document() {
    let env = TestEnv::new();

    let patch = json!({
        "foodName": "Fresh Bread",
        "foodImage": "https://example.com/bread.jpg",
        "foodQuantity": 3,
        "pickupLocation": "Bakery",
        "expiredDateTime": "2024-01-20",
        "foodStatus": "available",
    });

    let response = env.put_json(&format!("/update/{UNKNOWN_ID}"), &patch).await;
    assert_eq!(response.status, StatusCode::OK);

    let ack = response.json();
    assert_eq!(ack["matchedCount"], json!(0));
    assert_eq!(ack["upsertedId"], json!(UNKNOWN_ID));

    let listing = env.get(&format!("/foods/{UNKNOWN_ID}")).await.json();
    assert_eq!(listing["foodName"], json!("Fresh Bread"));
}

#[tokio::test]
async fn get_for_edit_returns_the_same_listing_as_get() {
    let env = TestEnv::new();
    let id = env.seed_listing(ListingBuilder::new().name("Apples").build()).await;

    let via_get = env.get(&format!("/foods/{id}")).await.json();
    let via_edit = env.get(&format!("/update/{id}")).await.json();

    assert_eq!(via_get, via_edit);
}

#[tokio::test]
async fn delete_then_get_yields_null() {
    let env = TestEnv::new();
    let id = env.seed_listing(ListingBuilder::new().build()).await;

    let deleted = env.delete(&format!("/foods/{id}")).await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.json()["deletedCount"], json!(1));

    let fetched = env.get(&format!("/foods/{id}")).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.json(), Value::Null);
}

#[tokio::test]
async fn malformed_identifiers_are_rejected_with_400() {
    let env = TestEnv::new();

    assert_eq!(env.get("/foods/not-an-id").await.status, StatusCode::BAD_REQUEST);
    assert_eq!(env.delete("/foods/not-an-id").await.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        env.put_json("/update/not-an-id", &json!({"foodName": "x"})).await.status,
        StatusCode::BAD_REQUEST
    );
}

#[tokio::test]
async fn created_listing_appears_in_sorted_collection() {
    let env = TestEnv::new();
    env.seed_listing(ListingBuilder::new().name("Earlier").expiry("2024-01-05").build()).await;
    env.seed_listing(ListingBuilder::new().name("Later").expiry("2024-01-15").build()).await;

    let created = env
        .post_json(
            "/foods",
            &json!({"foodName": "Rice", "foodQuantity": "2kg", "expiredDateTime": "2024-01-10"}),
        )
        .await;
    assert_eq!(created.status, StatusCode::OK);

    let listings = env.get("/foods?sort=asc").await.json();
    let names: Vec<&str> =
        listings.as_array().unwrap().iter().map(|l| l["foodName"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Earlier", "Rice", "Later"]);
}
