//! `PostgreSQL`-backed address store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use pinpoint_core::{AddressId, UserId};

use super::{AddressStore, RepositoryError};
use crate::models::address::Address;

/// Internal row type for `PostgreSQL` address queries.
#[derive(Debug, sqlx::FromRow)]
struct AddressRow {
    id: i32,
    user_id: i32,
    x: f64,
    y: f64,
    created_at: DateTime<Utc>,
}

impl From<AddressRow> for Address {
    fn from(row: AddressRow) -> Self {
        Self {
            id: AddressId::new(row.id),
            user_id: UserId::new(row.user_id),
            x: row.x,
            y: row.y,
            created_at: row.created_at,
        }
    }
}

/// Address store over a `PostgreSQL` pool.
#[derive(Debug, Clone)]
pub struct PgAddressStore {
    pool: PgPool,
}

impl PgAddressStore {
    /// Create a new `PostgreSQL` address store.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AddressStore for PgAddressStore {
    async fn insert(&self, owner: UserId, x: f64, y: f64) -> Result<Address, RepositoryError> {
        let row = sqlx::query_as::<_, AddressRow>(
            "INSERT INTO addresses (user_id, x, y) \
             VALUES ($1, $2, $3) \
             RETURNING id, user_id, x, y, created_at",
        )
        .bind(owner.as_i32())
        .bind(x)
        .bind(y)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: AddressId) -> Result<Option<Address>, RepositoryError> {
        let row = sqlx::query_as::<_, AddressRow>(
            "SELECT id, user_id, x, y, created_at FROM addresses WHERE id = $1",
        )
        .bind(id.as_i32())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Address::from))
    }

    async fn find_by_coordinates(
        &self,
        x: f64,
        y: f64,
    ) -> Result<Option<Address>, RepositoryError> {
        // Coordinates carry no uniqueness constraint; the earliest row wins.
        let row = sqlx::query_as::<_, AddressRow>(
            "SELECT id, user_id, x, y, created_at FROM addresses \
             WHERE x = $1 AND y = $2 ORDER BY id ASC LIMIT 1",
        )
        .bind(x)
        .bind(y)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Address::from))
    }

    async fn list_by_user(&self, owner: UserId) -> Result<Vec<Address>, RepositoryError> {
        let rows = sqlx::query_as::<_, AddressRow>(
            "SELECT id, user_id, x, y, created_at FROM addresses \
             WHERE user_id = $1 ORDER BY id ASC",
        )
        .bind(owner.as_i32())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Address::from).collect())
    }

    async fn list_all(&self) -> Result<Vec<Address>, RepositoryError> {
        let rows = sqlx::query_as::<_, AddressRow>(
            "SELECT id, user_id, x, y, created_at FROM addresses ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Address::from).collect())
    }

    async fn update_coordinates(
        &self,
        id: AddressId,
        x: f64,
        y: f64,
    ) -> Result<Address, RepositoryError> {
        let row = sqlx::query_as::<_, AddressRow>(
            "UPDATE addresses SET x = $1, y = $2 WHERE id = $3 \
             RETURNING id, user_id, x, y, created_at",
        )
        .bind(x)
        .bind(y)
        .bind(id.as_i32())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Address::from).ok_or(RepositoryError::NotFound)
    }

    async fn delete(&self, id: AddressId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM addresses WHERE id = $1")
            .bind(id.as_i32())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
