//! Shared request state.

use std::sync::Arc;

use crate::config::JwtConfig;
use crate::db::AsyncDbPool;
use crate::repositories::Repositories;
use crate::services::{AccountDirectory, Services};

/// Handed to every handler through axum's `State` extractor.
///
/// Cloning is cheap: the pool is reference-counted and services only hold
/// repositories wrapping that pool.
#[derive(Clone)]
pub struct AppState {
    pub services: Services,
    /// Used directly by the health check
    pub db_pool: AsyncDbPool,
    pub jwt_config: JwtConfig,
    /// Consulted by the auth middleware for every bearer token
    pub accounts: Arc<dyn AccountDirectory>,
}

impl AppState {
    pub fn new(pool: AsyncDbPool, jwt_config: JwtConfig) -> Self {
        let repos = Repositories::new(pool.clone());
        let accounts = Arc::new(repos.users.clone());
        let services = Services::new(repos);
        Self {
            services,
            db_pool: pool,
            jwt_config,
            accounts,
        }
    }

    /// Replaces the account lookup used to authenticate requests.
    pub fn with_accounts(mut self, accounts: Arc<dyn AccountDirectory>) -> Self {
        self.accounts = accounts;
        self
    }
}
