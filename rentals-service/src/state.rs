//! Application state management

use sqlx::PgPool;
use std::sync::Arc;

use crate::{
    config::Config,
    database,
    error::Result,
    rentals::{RentalRepository, RentalService},
};

/// Application state shared across handlers
///
/// Cloning is cheap: the config is behind an `Arc` and `PgPool` is a handle.
#[derive(Debug, Clone)]
pub struct AppState {
    config: Arc<Config>,
    pool: PgPool,
    rentals: RentalService,
}

impl AppState {
    /// Wire the rental service onto an existing pool
    pub fn new(config: Config, pool: PgPool) -> Self {
        let rentals = RentalService::new(RentalRepository::new(pool.clone()));
        Self {
            config: Arc::new(config),
            pool,
            rentals,
        }
    }

    /// Connect to the database and build the state
    ///
    /// Fails if the store cannot be reached within the configured retries.
    pub async fn connect(config: Config) -> Result<Self> {
        let pool = database::create_pool(&config.database).await?;
        Ok(Self::new(config, pool))
    }

    /// Build the state on a pool that connects on first use
    pub fn lazy(config: Config) -> Result<Self> {
        let pool = database::create_lazy_pool(&config.database)?;
        Ok(Self::new(config, pool))
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the database pool
    pub fn db(&self) -> &PgPool {
        &self.pool
    }

    /// Get the rental lookup service
    pub fn rentals(&self) -> &RentalService {
        &self.rentals
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_lazy_state_keeps_config() {
        let mut config = Config::default();
        config.service.name = "rentals-under-test".to_string();
        config.database.url = "postgres://u:p@127.0.0.1:1/rentals".to_string();

        let state = AppState::lazy(config).unwrap();
        assert_eq!(state.config().service.name, "rentals-under-test");
        assert_eq!(state.db().size(), 0);
    }

    #[tokio::test]
    async fn test_clones_share_the_pool() {
        let mut config = Config::default();
        config.database.url = "postgres://u:p@127.0.0.1:1/rentals".to_string();

        let state = AppState::lazy(config).unwrap();
        let clone = state.clone();
        assert!(Arc::ptr_eq(&state.config, &clone.config));
    }
}
