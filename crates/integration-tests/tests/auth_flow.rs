//! Registration, login, and token-resolution flows against the real router.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use pinpoint_integration_tests::TestContext;
use serde_json::{Value, json};

#[tokio::test]
async fn register_returns_bearer_token() {
    let ctx = TestContext::new();

    let (status, body) = ctx
        .post_json(
            "/api/v1/users",
            &json!({"email": "a@x.com", "name": "A", "phone": "555", "password": "pw1"}),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_type"], "bearer");
    assert!(!body["access_token"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn duplicate_registration_is_rejected() {
    let ctx = TestContext::new();
    ctx.register("a@x.com", "A", "555", "pw1").await;

    // Same email, every other field different.
    let (status, _) = ctx
        .post_json(
            "/api/v1/users",
            &json!({"email": "a@x.com", "name": "B", "phone": "777", "password": "pw2"}),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_email_is_rejected() {
    let ctx = TestContext::new();

    let (status, _) = ctx
        .post_json(
            "/api/v1/users",
            &json!({"email": "not-an-email", "name": "A", "phone": "555", "password": "pw1"}),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_succeeds_with_correct_credentials() {
    let ctx = TestContext::new();
    ctx.register("a@x.com", "A", "555", "pw1").await;

    let (status, body) = ctx
        .post_form("/api/v1/login", "username=a%40x.com&password=pw1")
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_type"], "bearer");
    assert!(!body["access_token"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let ctx = TestContext::new();
    ctx.register("a@x.com", "A", "555", "pw1").await;

    let (wrong_pw_status, wrong_pw_body) = ctx
        .post_form("/api/v1/login", "username=a%40x.com&password=wrong")
        .await;
    let (unknown_status, unknown_body) = ctx
        .post_form("/api/v1/login", "username=nobody%40x.com&password=pw1")
        .await;

    assert_eq!(wrong_pw_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    // Identical body too, so the response leaks nothing about which
    // half of the credentials failed.
    assert_eq!(wrong_pw_body, unknown_body);
}

#[tokio::test]
async fn current_user_resolves_from_token() {
    let ctx = TestContext::new();
    let token = ctx.register("a@x.com", "A", "555", "pw1").await;

    let (status, body) = ctx.get("/api/v1/users/current-user", Some(&token)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "a@x.com");
    assert_eq!(body["name"], "A");
    assert_eq!(body["phone"], "555");
    assert!(body["id"].is_i64());
    assert!(body["created_at"].is_string());
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn current_user_rejects_missing_or_forged_tokens() {
    let ctx = TestContext::new();
    ctx.register("a@x.com", "A", "555", "pw1").await;

    let (no_token, _) = ctx.get("/api/v1/users/current-user", None).await;
    assert_eq!(no_token, StatusCode::UNAUTHORIZED);

    let (forged, _) = ctx
        .get("/api/v1/users/current-user", Some("for.ged.token"))
        .await;
    assert_eq!(forged, StatusCode::UNAUTHORIZED);

    let token = ctx.register("b@x.com", "B", "556", "pw2").await;
    let mut tampered = token.clone();
    let last = tampered.pop().unwrap();
    tampered.push(if last == 'A' { 'B' } else { 'A' });
    let (tampered_status, _) = ctx
        .get("/api/v1/users/current-user", Some(&tampered))
        .await;
    assert_eq!(tampered_status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn public_user_lookup_by_id() {
    let ctx = TestContext::new();
    let token = ctx.register("a@x.com", "A", "555", "pw1").await;

    let (_, me) = ctx.get("/api/v1/users/current-user", Some(&token)).await;
    let id = me["id"].as_i64().unwrap();

    // No token needed for the public profile.
    let (status, body) = ctx.get(&format!("/api/v1/users/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "a@x.com");

    let (missing, _) = ctx.get("/api/v1/users/999", None).await;
    assert_eq!(missing, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_endpoints_respond() {
    let ctx = TestContext::new();

    let (live, body) = ctx.get("/health", None).await;
    assert_eq!(live, StatusCode::OK);
    assert_eq!(body, Value::String("ok".to_owned()));

    // Memory-backed state is always ready.
    let (ready, _) = ctx.get("/health/ready", None).await;
    assert_eq!(ready, StatusCode::OK);
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let ctx = TestContext::new();

    let request = axum::http::Request::builder()
        .method("GET")
        .uri("/api/v1/addresss/all")
        .header("Origin", "https://elsewhere.example")
        .body(axum::body::Body::empty())
        .unwrap();

    let response = ctx.response(request).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}
