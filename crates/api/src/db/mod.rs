//! Data access for the Pinpoint `PostgreSQL` database.
//!
//! ## Tables
//!
//! - `users` - Registration identities (email is the login key)
//! - `addresses` - x/y coordinate pins owned by a user
//!
//! ## Store traits
//!
//! Handlers and services never touch `sqlx` directly; they go through the
//! [`UserStore`] and [`AddressStore`] traits. Production wires in the
//! `Pg*` implementations ([`users::PgUserStore`],
//! [`addresses::PgAddressStore`]); tests wire in the in-memory fakes from
//! [`memory`]. Each `PostgreSQL` query checks a connection out of the pool
//! for its own duration and returns it unconditionally, so there is no
//! per-request session to manage by hand.
//!
//! ## Migrations
//!
//! Migrations live in `crates/api/migrations/` and are embedded via
//! `sqlx::migrate!`; the binary applies them at startup.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use pinpoint_core::{AddressId, Email, UserId};

use crate::models::address::Address;
use crate::models::user::{NewUser, User};

pub mod addresses;
pub mod memory;
pub mod users;

pub use addresses::PgAddressStore;
pub use memory::{MemoryAddressStore, MemoryUserStore};
pub use users::PgUserStore;

/// Errors produced by the store implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Underlying database failure.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A uniqueness constraint rejected the write.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The targeted row does not exist.
    #[error("row not found")]
    NotFound,

    /// A stored value could not be mapped back into a domain type.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// Persistence seam for users.
///
/// Lookups by email are case-sensitive exact matches on the raw string;
/// no normalization happens at this layer.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Find a user by exact email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;

    /// Find a user by id.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError>;

    /// Insert a new user; the store assigns `id` and `created_at`.
    ///
    /// Returns [`RepositoryError::Conflict`] when the email is already
    /// taken.
    async fn insert(&self, new: NewUser) -> Result<User, RepositoryError>;
}

/// Persistence seam for coordinate addresses.
#[async_trait]
pub trait AddressStore: Send + Sync {
    /// Insert a new address owned by `owner`; the store assigns `id` and
    /// `created_at`.
    async fn insert(&self, owner: UserId, x: f64, y: f64) -> Result<Address, RepositoryError>;

    /// Find an address by id.
    async fn find_by_id(&self, id: AddressId) -> Result<Option<Address>, RepositoryError>;

    /// Find the first address at exactly (`x`, `y`). Coordinates are not
    /// unique; earlier insertions win.
    async fn find_by_coordinates(
        &self,
        x: f64,
        y: f64,
    ) -> Result<Option<Address>, RepositoryError>;

    /// All addresses owned by `owner`, in insertion order.
    async fn list_by_user(&self, owner: UserId) -> Result<Vec<Address>, RepositoryError>;

    /// Every address, unscoped, in insertion order.
    async fn list_all(&self) -> Result<Vec<Address>, RepositoryError>;

    /// Replace the coordinates of an existing address.
    ///
    /// Returns [`RepositoryError::NotFound`] if the row is gone.
    async fn update_coordinates(
        &self,
        id: AddressId,
        x: f64,
        y: f64,
    ) -> Result<Address, RepositoryError>;

    /// Hard-delete an address.
    ///
    /// Returns [`RepositoryError::NotFound`] if the row is gone.
    async fn delete(&self, id: AddressId) -> Result<(), RepositoryError>;
}

/// Helper shared by the `Pg*` stores: turn a stored email back into the
/// validated domain type.
pub(crate) fn email_from_row(raw: &str) -> Result<Email, RepositoryError> {
    Email::parse(raw)
        .map_err(|e| RepositoryError::DataCorruption(format!("invalid email in database: {e}")))
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Apply the embedded migrations.
///
/// # Errors
///
/// Returns `sqlx::migrate::MigrateError` if a migration fails.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!().run(pool).await
}
