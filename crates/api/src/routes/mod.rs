//! HTTP route handlers for the Pinpoint API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                          - Liveness check
//! GET  /health/ready                    - Readiness check (pings the database)
//!
//! # Users & auth
//! POST /api/v1/users                    - Register, returns a bearer token
//! POST /api/v1/login                    - Login (form-encoded), returns a bearer token
//! GET  /api/v1/users/current-user       - Authenticated caller's profile     [auth]
//! GET  /api/v1/users/{user_id}          - Any user's public profile
//!
//! # Addresses
//! POST   /api/v1/addresss               - Create for the caller              [auth]
//! GET    /api/v1/addresss/user          - Caller's own addresses             [auth]
//! GET    /api/v1/addresss/all           - Every address, unscoped
//! GET    /api/v1/addresss/{address_id}  - One address by id
//! GET    /api/v1/addresss/{x}/{y}       - First address at exact coordinates
//! PUT    /api/v1/users/{address_id}     - Update coordinates (open!)
//! DELETE /api/v1/addresss/{address_id}  - Hard delete                        [auth]
//! ```
//!
//! The `addresss` spelling and the coordinate-update PUT living under
//! `/users/` are the published v1 contract; both are kept verbatim so
//! existing clients don't break. The PUT being open to unauthenticated
//! callers is likewise contract, not oversight on our side.

pub mod addresses;
pub mod users;

use axum::extract::State;
use axum::http::StatusCode;
use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the user and auth routes router.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/users", post(users::register))
        .route("/api/v1/login", post(users::login))
        .route("/api/v1/users/current-user", get(users::current_user))
        // GET reads a user; PUT rewrites an *address*. Same path slot,
        // so both handlers hang off one route entry.
        .route(
            "/api/v1/users/{user_id}",
            get(users::get_user).put(addresses::update),
        )
}

/// Create the address routes router.
pub fn address_routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/addresss", post(addresses::create))
        .route("/api/v1/addresss/user", get(addresses::list_mine))
        .route("/api/v1/addresss/all", get(addresses::list_all))
        .route(
            "/api/v1/addresss/{address_id}",
            get(addresses::get).delete(addresses::delete),
        )
        // The router allows one capture name per segment position, so the
        // coordinate route reuses the id route's first segment name; the
        // handler reads it as x.
        .route(
            "/api/v1/addresss/{address_id}/{y}",
            get(addresses::get_by_coordinates),
        )
}

/// Create all routes for the API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(user_routes())
        .merge(address_routes())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies database connectivity before returning OK. Returns 503
/// Service Unavailable if the database is not reachable. Memory-backed
/// state (tests) is always ready.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.pool() {
        Some(pool) => match sqlx::query("SELECT 1").fetch_one(pool).await {
            Ok(_) => StatusCode::OK,
            Err(_) => StatusCode::SERVICE_UNAVAILABLE,
        },
        None => StatusCode::OK,
    }
}
