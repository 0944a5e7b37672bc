//! Integration tests for the Pinpoint API.
//!
//! The harness builds the real router, the same one the binary serves,
//! over the in-memory stores, then drives it request-by-request with
//! `tower::ServiceExt::oneshot`. No database or socket is involved, so
//! these tests run anywhere `cargo test` does.
//!
//! # Test Categories
//!
//! - `auth_flow` - Registration, login, and token resolution
//! - `address_flow` - Address CRUD and its authentication boundary

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::missing_panics_doc)] // panicking on malformed responses is the point

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use secrecy::SecretString;
use serde_json::Value;
use tower::ServiceExt;

use pinpoint_api::config::ApiConfig;
use pinpoint_api::db::{MemoryAddressStore, MemoryUserStore};
use pinpoint_api::state::AppState;

/// A router wired to fresh in-memory stores, plus request helpers.
pub struct TestContext {
    app: Router,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    /// Build a fresh API instance. State is per-context; two contexts
    /// never share users or addresses.
    #[must_use]
    pub fn new() -> Self {
        let config = ApiConfig {
            database_url: SecretString::from("postgres://unused-in-tests"),
            host: std::net::IpAddr::from([127, 0, 0, 1]),
            port: 0,
            token_secret: SecretString::from("kR8vM2xQ9pL4wN7jF3hT6yB1cD5gS0aZ"),
            token_ttl: None,
            sentry_dsn: None,
        };

        let state = AppState::with_stores(
            config,
            Arc::new(MemoryUserStore::new()),
            Arc::new(MemoryAddressStore::new()),
        );

        Self {
            app: pinpoint_api::app(state),
        }
    }

    /// Send one request and return the raw response, headers included.
    pub async fn response(&self, request: Request<Body>) -> axum::response::Response {
        self.app
            .clone()
            .oneshot(request)
            .await
            .expect("router never fails")
    }

    /// Send one request and return `(status, body)`. JSON bodies are
    /// parsed; anything else comes back as a JSON string.
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.response(request).await;

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body read failed");

        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

        (status, body)
    }

    /// GET a path, optionally with a bearer token.
    pub async fn get(&self, path: &str, token: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method("GET").uri(path);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        self.send(builder.body(Body::empty()).expect("request build failed"))
            .await
    }

    /// POST a JSON body, optionally with a bearer token.
    pub async fn post_json(
        &self,
        path: &str,
        body: &Value,
        token: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        self.send(
            builder
                .body(Body::from(body.to_string()))
                .expect("request build failed"),
        )
        .await
    }

    /// POST a form-encoded body (the login endpoint's shape).
    pub async fn post_form(&self, path: &str, body: &str) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method("POST")
                .uri(path)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body.to_owned()))
                .expect("request build failed"),
        )
        .await
    }

    /// PUT a JSON body (no token; the coordinate-update route is open).
    pub async fn put_json(&self, path: &str, body: &Value) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method("PUT")
                .uri(path)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .expect("request build failed"),
        )
        .await
    }

    /// DELETE a path, optionally with a bearer token.
    pub async fn delete(&self, path: &str, token: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method("DELETE").uri(path);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        self.send(builder.body(Body::empty()).expect("request build failed"))
            .await
    }

    /// Register a user and return their bearer token.
    pub async fn register(&self, email: &str, name: &str, phone: &str, password: &str) -> String {
        let (status, body) = self
            .post_json(
                "/api/v1/users",
                &serde_json::json!({
                    "email": email,
                    "name": name,
                    "phone": phone,
                    "password": password,
                }),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::OK, "registration failed: {body}");

        body.get("access_token")
            .and_then(Value::as_str)
            .expect("registration response carries access_token")
            .to_owned()
    }
}
