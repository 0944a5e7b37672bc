//! In-memory store fakes.
//!
//! Same contract as the `Pg*` stores, backed by a mutex-guarded `Vec`.
//! Used by unit tests and by the integration-test harness so the full
//! router can be exercised without a running database.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use pinpoint_core::{AddressId, UserId};

use super::{AddressStore, RepositoryError, UserStore};
use crate::models::address::Address;
use crate::models::user::{NewUser, User};

/// In-memory [`UserStore`].
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    inner: Mutex<Vec<User>>,
}

impl MemoryUserStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let users = self.inner.lock().expect("user store mutex poisoned");
        Ok(users.iter().find(|u| u.email.as_str() == email).cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let users = self.inner.lock().expect("user store mutex poisoned");
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn insert(&self, new: NewUser) -> Result<User, RepositoryError> {
        let mut users = self.inner.lock().expect("user store mutex poisoned");

        if users.iter().any(|u| u.email == new.email) {
            return Err(RepositoryError::Conflict("email already exists".to_owned()));
        }

        let next_id = i32::try_from(users.len()).unwrap_or(i32::MAX - 1) + 1;
        let user = User {
            id: UserId::new(next_id),
            email: new.email,
            name: new.name,
            phone: new.phone,
            password_hash: new.password_hash,
            created_at: Utc::now(),
        };
        users.push(user.clone());
        Ok(user)
    }
}

/// In-memory [`AddressStore`].
#[derive(Debug, Default)]
pub struct MemoryAddressStore {
    inner: Mutex<AddressRows>,
}

#[derive(Debug, Default)]
struct AddressRows {
    next_id: i32,
    rows: Vec<Address>,
}

impl MemoryAddressStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AddressStore for MemoryAddressStore {
    async fn insert(&self, owner: UserId, x: f64, y: f64) -> Result<Address, RepositoryError> {
        let mut inner = self.inner.lock().expect("address store mutex poisoned");
        inner.next_id += 1;
        let address = Address {
            id: AddressId::new(inner.next_id),
            user_id: owner,
            x,
            y,
            created_at: Utc::now(),
        };
        inner.rows.push(address.clone());
        Ok(address)
    }

    async fn find_by_id(&self, id: AddressId) -> Result<Option<Address>, RepositoryError> {
        let inner = self.inner.lock().expect("address store mutex poisoned");
        Ok(inner.rows.iter().find(|a| a.id == id).cloned())
    }

    async fn find_by_coordinates(
        &self,
        x: f64,
        y: f64,
    ) -> Result<Option<Address>, RepositoryError> {
        let inner = self.inner.lock().expect("address store mutex poisoned");
        Ok(inner
            .rows
            .iter()
            .find(|a| a.x == x && a.y == y)
            .cloned())
    }

    async fn list_by_user(&self, owner: UserId) -> Result<Vec<Address>, RepositoryError> {
        let inner = self.inner.lock().expect("address store mutex poisoned");
        Ok(inner
            .rows
            .iter()
            .filter(|a| a.user_id == owner)
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<Address>, RepositoryError> {
        let inner = self.inner.lock().expect("address store mutex poisoned");
        Ok(inner.rows.clone())
    }

    async fn update_coordinates(
        &self,
        id: AddressId,
        x: f64,
        y: f64,
    ) -> Result<Address, RepositoryError> {
        let mut inner = self.inner.lock().expect("address store mutex poisoned");
        let address = inner
            .rows
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(RepositoryError::NotFound)?;
        address.x = x;
        address.y = y;
        Ok(address.clone())
    }

    async fn delete(&self, id: AddressId) -> Result<(), RepositoryError> {
        let mut inner = self.inner.lock().expect("address store mutex poisoned");
        let before = inner.rows.len();
        inner.rows.retain(|a| a.id != id);
        if inner.rows.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
