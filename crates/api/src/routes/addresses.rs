//! Address route handlers.
//!
//! Creation, listing-own, and deletion require a bearer token. Everything
//! else, coordinate updates included, is open: any caller holding an
//! address id may read or rewrite that address. That asymmetry is part of
//! the published API contract (see the route table in [`super`]), so it
//! stays until the contract itself is versioned away.

use axum::{Json, extract::Path, extract::State};
use serde::Deserialize;

use pinpoint_core::AddressId;

use crate::db::RepositoryError;
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::address::AddressView;
use crate::state::AppState;

/// Request body for creating or updating an address.
#[derive(Debug, Deserialize)]
pub struct AddressRequest {
    pub x: f64,
    pub y: f64,
}

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("address {id}"))
}

fn map_row_error(id: i32, e: RepositoryError) -> AppError {
    match e {
        RepositoryError::NotFound => not_found(id),
        other => AppError::Database(other),
    }
}

/// Create an address owned by the authenticated caller.
///
/// POST /api/v1/addresss
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<AddressRequest>,
) -> Result<Json<AddressView>> {
    let address = state.addresses().insert(user.id, req.x, req.y).await?;
    Ok(Json(AddressView::from(address)))
}

/// List the authenticated caller's own addresses.
///
/// GET /api/v1/addresss/user
pub async fn list_mine(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Vec<AddressView>>> {
    let addresses = state.addresses().list_by_user(user.id).await?;
    Ok(Json(addresses.into_iter().map(AddressView::from).collect()))
}

/// List every address, unscoped and unauthenticated.
///
/// GET /api/v1/addresss/all
pub async fn list_all(State(state): State<AppState>) -> Result<Json<Vec<AddressView>>> {
    let addresses = state.addresses().list_all().await?;
    Ok(Json(addresses.into_iter().map(AddressView::from).collect()))
}

/// Fetch one address by id.
///
/// GET /api/v1/addresss/{address_id}
///
/// # Errors
///
/// 404 if no such address exists.
pub async fn get(
    State(state): State<AppState>,
    Path(address_id): Path<i32>,
) -> Result<Json<AddressView>> {
    let address = state
        .addresses()
        .find_by_id(AddressId::new(address_id))
        .await?
        .ok_or_else(|| not_found(address_id))?;

    Ok(Json(AddressView::from(address)))
}

/// Fetch the first address at exactly (x, y).
///
/// GET /api/v1/addresss/{x}/{y}
///
/// # Errors
///
/// 404 if nothing sits at those coordinates.
pub async fn get_by_coordinates(
    State(state): State<AppState>,
    Path((x, y)): Path<(f64, f64)>,
) -> Result<Json<AddressView>> {
    let address = state
        .addresses()
        .find_by_coordinates(x, y)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("address at ({x}, {y})")))?;

    Ok(Json(AddressView::from(address)))
}

/// Replace an address's coordinates in place.
///
/// PUT /api/v1/users/{address_id}
///
/// # Errors
///
/// 404 if no such address exists.
pub async fn update(
    State(state): State<AppState>,
    Path(address_id): Path<i32>,
    Json(req): Json<AddressRequest>,
) -> Result<Json<AddressView>> {
    let address = state
        .addresses()
        .update_coordinates(AddressId::new(address_id), req.x, req.y)
        .await
        .map_err(|e| map_row_error(address_id, e))?;

    Ok(Json(AddressView::from(address)))
}

/// Hard-delete an address.
///
/// DELETE /api/v1/addresss/{address_id}
///
/// # Errors
///
/// 404 if no such address exists.
pub async fn delete(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(address_id): Path<i32>,
) -> Result<Json<&'static str>> {
    state
        .addresses()
        .delete(AddressId::new(address_id))
        .await
        .map_err(|e| map_row_error(address_id, e))?;

    Ok(Json("address deleted successfully"))
}
