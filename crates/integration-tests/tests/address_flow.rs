//! Address CRUD flows and their authentication boundary.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use pinpoint_integration_tests::TestContext;
use serde_json::json;

#[tokio::test]
async fn create_requires_a_token() {
    let ctx = TestContext::new();

    let (status, _) = ctx
        .post_json("/api/v1/addresss", &json!({"x": 1.0, "y": 2.0}), None)
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn full_address_lifecycle() {
    let ctx = TestContext::new();
    let token = ctx.register("a@x.com", "A", "555", "pw1").await;

    // Create
    let (status, created) = ctx
        .post_json("/api/v1/addresss", &json!({"x": 1.0, "y": 2.0}), Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["x"], 1.0);
    assert_eq!(created["y"], 2.0);
    let id = created["id"].as_i64().unwrap();

    // Fetch by id, no auth required
    let (status, fetched) = ctx.get(&format!("/api/v1/addresss/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["id"], created["id"]);
    assert_eq!(fetched["user_id"], created["user_id"]);

    // Fetch by exact coordinates
    let (status, by_coords) = ctx.get("/api/v1/addresss/1/2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_coords["id"], created["id"]);

    // Delete needs the token...
    let (status, _) = ctx.delete(&format!("/api/v1/addresss/{id}"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // ...and with it returns a confirmation string
    let (status, confirmation) = ctx
        .delete(&format!("/api/v1/addresss/{id}"), Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(confirmation, json!("address deleted successfully"));

    // Gone afterwards
    let (status, _) = ctx.get(&format!("/api/v1/addresss/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn own_listing_is_scoped_but_all_is_not() {
    let ctx = TestContext::new();
    let alice = ctx.register("alice@x.com", "Alice", "555", "pw1").await;
    let bob = ctx.register("bob@x.com", "Bob", "556", "pw2").await;

    ctx.post_json("/api/v1/addresss", &json!({"x": 1.0, "y": 1.0}), Some(&alice))
        .await;
    ctx.post_json("/api/v1/addresss", &json!({"x": 2.0, "y": 2.0}), Some(&bob))
        .await;
    ctx.post_json("/api/v1/addresss", &json!({"x": 3.0, "y": 3.0}), Some(&alice))
        .await;

    // Alice sees exactly her two, in insertion order.
    let (status, mine) = ctx.get("/api/v1/addresss/user", Some(&alice)).await;
    assert_eq!(status, StatusCode::OK);
    let mine = mine.as_array().unwrap();
    assert_eq!(mine.len(), 2);
    assert_eq!(mine[0]["x"], 1.0);
    assert_eq!(mine[1]["x"], 3.0);

    // The unscoped listing is public and shows everything.
    let (status, all) = ctx.get("/api/v1/addresss/all", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 3);

    // Listing your own without a token is rejected.
    let (status, _) = ctx.get("/api/v1/addresss/user", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn coordinate_lookup_returns_first_match_and_404s_on_miss() {
    let ctx = TestContext::new();
    let token = ctx.register("a@x.com", "A", "555", "pw1").await;

    let (_, first) = ctx
        .post_json("/api/v1/addresss", &json!({"x": 5.0, "y": 5.0}), Some(&token))
        .await;
    ctx.post_json("/api/v1/addresss", &json!({"x": 5.0, "y": 5.0}), Some(&token))
        .await;

    let (status, found) = ctx.get("/api/v1/addresss/5/5", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found["id"], first["id"]);

    let (status, _) = ctx.get("/api/v1/addresss/8/9", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_rewrites_coordinates_without_any_auth() {
    let ctx = TestContext::new();
    let token = ctx.register("a@x.com", "A", "555", "pw1").await;

    let (_, created) = ctx
        .post_json("/api/v1/addresss", &json!({"x": 1.0, "y": 2.0}), Some(&token))
        .await;
    let id = created["id"].as_i64().unwrap();

    // The coordinate-update PUT lives under /users/ and carries no auth;
    // both quirks are published contract.
    let (status, updated) = ctx
        .put_json(&format!("/api/v1/users/{id}"), &json!({"x": 9.0, "y": 8.0}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["x"], 9.0);
    assert_eq!(updated["y"], 8.0);
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["user_id"], created["user_id"]);

    // The rewrite is visible on the next read.
    let (_, fetched) = ctx.get(&format!("/api/v1/addresss/{id}"), None).await;
    assert_eq!(fetched["x"], 9.0);

    // Updating a missing address 404s.
    let (status, _) = ctx
        .put_json("/api/v1/users/999", &json!({"x": 0.0, "y": 0.0}))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_of_missing_address_404s() {
    let ctx = TestContext::new();
    let token = ctx.register("a@x.com", "A", "555", "pw1").await;

    let (status, _) = ctx.delete("/api/v1/addresss/12345", Some(&token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
