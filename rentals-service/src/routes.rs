//! Route table

use axum::{routing::get, Router};

use crate::{
    health::{health, readiness},
    rentals::{get_rental, list_rentals},
    state::AppState,
};

/// Build the application router
///
/// Middleware is applied by [`Server::serve`](crate::server::Server::serve),
/// so the bare router can be driven directly in tests.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(readiness))
        .route("/rentals", get(list_rentals))
        .route("/rentals/{id}", get(get_rental))
        .with_state(state)
}
