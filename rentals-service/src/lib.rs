//! # rentals-service
//!
//! Read-only HTTP API over a PostgreSQL catalogue of rental vehicles.
//!
//! ## Endpoints
//!
//! - `GET /rentals/{id}`: a single rental with its owner
//! - `GET /rentals`: rentals filtered by `price_min`, `price_max`, `ids` and
//!   `near`, ordered by `sort`, paged by `limit` and `offset`
//! - `GET /health`, `GET /ready`: liveness and readiness probes
//!
//! ## Example
//!
//! ```rust,no_run
//! use rentals_service::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Config::load()?;
//!     init_tracing(&config)?;
//!
//!     let state = AppState::connect(config.clone()).await?;
//!
//!     Server::new(config).serve(router(state)).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod database;
pub mod error;
pub mod health;
pub mod middleware;
pub mod observability;
pub mod rentals;
pub mod routes;
pub mod server;
pub mod state;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{Config, DatabaseConfig, MiddlewareConfig, ServiceConfig};
    pub use crate::database::{create_lazy_pool, create_pool};
    pub use crate::error::{
        DatabaseError, DatabaseErrorKind, DatabaseOperation, Error, ErrorResponse, Result,
    };
    pub use crate::health::{health, readiness};
    pub use crate::observability::init_tracing;
    pub use crate::rentals::{
        QueryParamError, Rental, RentalRepository, RentalResponse, RentalSearchQuery,
        RentalService, SortField, User,
    };
    pub use crate::routes::router;
    pub use crate::server::Server;
    pub use crate::state::AppState;

    pub use axum::{
        extract::{Path, Query, State},
        routing::get,
        Json, Router,
    };
}
