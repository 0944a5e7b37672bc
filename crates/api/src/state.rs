//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::ApiConfig;
use crate::db::{AddressStore, PgAddressStore, PgUserStore, UserStore};
use crate::services::TokenCodec;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources: the store implementations, the token codec, and the
/// configuration. Handlers only see the store traits, so the same router
/// runs over `PostgreSQL` in production and over the in-memory fakes in
/// tests.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ApiConfig,
    pool: Option<PgPool>,
    users: Arc<dyn UserStore>,
    addresses: Arc<dyn AddressStore>,
    tokens: TokenCodec,
}

impl AppState {
    /// Create application state backed by `PostgreSQL`.
    #[must_use]
    pub fn new(config: ApiConfig, pool: PgPool) -> Self {
        let users = Arc::new(PgUserStore::new(pool.clone()));
        let addresses = Arc::new(PgAddressStore::new(pool.clone()));
        Self::build(config, Some(pool), users, addresses)
    }

    /// Create application state over explicit store implementations.
    ///
    /// This is the seam the integration tests use to run the real router
    /// over the in-memory stores.
    #[must_use]
    pub fn with_stores(
        config: ApiConfig,
        users: Arc<dyn UserStore>,
        addresses: Arc<dyn AddressStore>,
    ) -> Self {
        Self::build(config, None, users, addresses)
    }

    fn build(
        config: ApiConfig,
        pool: Option<PgPool>,
        users: Arc<dyn UserStore>,
        addresses: Arc<dyn AddressStore>,
    ) -> Self {
        let tokens = TokenCodec::new(&config.token_secret, config.token_ttl);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                users,
                addresses,
                tokens,
            }),
        }
    }

    /// Get a reference to the API configuration.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }

    /// Get the database connection pool, if this state is `PostgreSQL`-backed.
    #[must_use]
    pub fn pool(&self) -> Option<&PgPool> {
        self.inner.pool.as_ref()
    }

    /// Get the user store.
    #[must_use]
    pub fn users(&self) -> &dyn UserStore {
        self.inner.users.as_ref()
    }

    /// Get the address store.
    #[must_use]
    pub fn addresses(&self) -> &dyn AddressStore {
        self.inner.addresses.as_ref()
    }

    /// Get the bearer-token codec.
    #[must_use]
    pub fn tokens(&self) -> &TokenCodec {
        &self.inner.tokens
    }
}
