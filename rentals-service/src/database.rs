//! Database connection pool management

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;

use crate::{
    config::DatabaseConfig,
    error::{sanitize_url, DatabaseError, Result},
};

/// Upper bound on the wait between startup connection attempts
pub const MAX_RETRY_DELAY: Duration = Duration::from_secs(60);

/// Create a PostgreSQL connection pool
///
/// The first connection is established eagerly so that an unreachable store
/// fails startup. With `max_retries > 0` the attempt is repeated with
/// exponential backoff before giving up.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool> {
    let mut attempt = 0;
    let base_delay = Duration::from_secs(config.retry_delay_secs);

    loop {
        match try_create_pool(config).await {
            Ok(pool) => {
                tracing::info!(
                    url = %sanitize_url(&config.url),
                    "Database connection pool created: max={}, min={}",
                    config.max_connections,
                    config.min_connections
                );
                return Ok(pool);
            }
            Err(e) => {
                attempt += 1;

                if attempt > config.max_retries {
                    tracing::error!(
                        "Failed to connect to database after {} attempt(s): {}",
                        attempt,
                        e
                    );
                    return Err(e.into());
                }

                let delay = retry_delay(base_delay, attempt);

                tracing::warn!(
                    "Database connection attempt {} failed: {}. Retrying in {:?}...",
                    attempt,
                    e,
                    delay
                );

                tokio::time::sleep(delay).await;
            }
        }
    }
}

/// Backoff before retry number `attempt` (1-based), doubling from `base` and
/// capped at [`MAX_RETRY_DELAY`]
pub fn retry_delay(base: Duration, attempt: u32) -> Duration {
    2_u32
        .checked_pow(attempt.saturating_sub(1))
        .and_then(|factor| base.checked_mul(factor))
        .map_or(MAX_RETRY_DELAY, |delay| delay.min(MAX_RETRY_DELAY))
}

/// Create a pool that defers connecting until first use
///
/// Used where a pool handle is needed without touching the network.
pub fn create_lazy_pool(config: &DatabaseConfig) -> Result<PgPool> {
    let pool = pool_options(config).connect_lazy(&config.url).map_err(|e| {
        DatabaseError::from(e).add_context(sanitize_url(&config.url))
    })?;
    Ok(pool)
}

/// Attempt to create a database pool (single try)
async fn try_create_pool(config: &DatabaseConfig) -> std::result::Result<PgPool, DatabaseError> {
    pool_options(config)
        .connect(&config.url)
        .await
        .map_err(|e| {
            let category = categorize_db_error(&e);
            DatabaseError::from(e)
                .add_context(format!("{} ({})", sanitize_url(&config.url), category))
        })
}

fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.connection_timeout())
}

/// Categorize database error for better operator guidance
fn categorize_db_error(err: &sqlx::Error) -> &'static str {
    use sqlx::Error;
    match err {
        Error::Configuration(_) => "configuration error - check the connection URL format",
        Error::Database(_) => "database rejected the connection - check credentials",
        Error::Io(_) => "network I/O error - check connectivity",
        Error::Tls(_) => "TLS/SSL error - check certificate configuration",
        Error::PoolTimedOut => "connection pool timeout - database may be overloaded",
        Error::PoolClosed => "connection pool closed",
        Error::WorkerCrashed => "database worker crashed",
        _ => "connection error",
    }
}
