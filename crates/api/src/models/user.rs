//! User domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use pinpoint_core::{Email, UserId};

/// A registered user (domain type).
///
/// Carries the stored password hash; it never leaves the service layer.
/// Serialize [`UserView`] instead when responding to clients.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Login identity. Unique, matched case-sensitively.
    pub email: Email,
    /// Display name.
    pub name: String,
    /// Contact phone number (free-form).
    pub phone: String,
    /// Salted one-way password hash.
    pub password_hash: String,
    /// When the user registered. Set once, never updated.
    pub created_at: DateTime<Utc>,
}

/// Fields for a user about to be persisted. The store assigns `id` and
/// `created_at`.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Validated login identity.
    pub email: Email,
    /// Display name.
    pub name: String,
    /// Contact phone number.
    pub phone: String,
    /// Salted one-way password hash.
    pub password_hash: String,
}

/// Public view of a user, safe to serialize in responses.
#[derive(Debug, Clone, Serialize)]
pub struct UserView {
    pub id: UserId,
    pub email: Email,
    pub name: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            phone: user.phone,
            created_at: user.created_at,
        }
    }
}
