//! User and authentication route handlers.

use axum::{Form, Json, extract::Path, extract::State};
use serde::{Deserialize, Serialize};

use pinpoint_core::UserId;

use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::user::UserView;
use crate::services::AuthService;
use crate::state::AppState;

/// Request body for registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub name: String,
    pub phone: String,
    pub password: String,
}

/// Form body for login. Field names follow the OAuth2 password-grant
/// convention, which is why the email travels as `username`.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Issued-token response returned by registration and login.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
}

impl TokenResponse {
    fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer",
        }
    }
}

/// Register a new user.
///
/// POST /api/v1/users
///
/// # Errors
///
/// 400 for a taken or malformed email.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<TokenResponse>> {
    let auth = AuthService::new(state.users(), state.tokens());
    let token = auth
        .register(&req.email, &req.name, &req.phone, &req.password)
        .await?;

    Ok(Json(TokenResponse::bearer(token)))
}

/// Login with email and password.
///
/// POST /api/v1/login
///
/// # Errors
///
/// 401 for an unknown email or a wrong password; the two cases are
/// indistinguishable to the caller.
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Json<TokenResponse>> {
    let auth = AuthService::new(state.users(), state.tokens());
    let token = auth.login(&form.username, &form.password).await?;

    Ok(Json(TokenResponse::bearer(token)))
}

/// Return the authenticated caller's own profile.
///
/// GET /api/v1/users/current-user
pub async fn current_user(RequireAuth(user): RequireAuth) -> Json<UserView> {
    Json(UserView::from(user))
}

/// Fetch any user's public profile by id.
///
/// GET /api/v1/users/{user_id}
///
/// # Errors
///
/// 404 if no such user exists.
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<Json<UserView>> {
    let user = state
        .users()
        .find_by_id(UserId::new(user_id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user {user_id}")))?;

    Ok(Json(UserView::from(user)))
}
