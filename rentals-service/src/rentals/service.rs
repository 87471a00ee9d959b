//! Rental lookup service

use tracing::instrument;

use super::model::Rental;
use super::query::RentalSearchQuery;
use super::repository::RentalRepository;
use crate::error::DatabaseError;

/// Lookups over the rental store
///
/// Results and errors pass through unchanged; failures are logged here so
/// that every store error carries the operation that hit it.
#[derive(Debug, Clone)]
pub struct RentalService {
    repository: RentalRepository,
}

impl RentalService {
    pub fn new(repository: RentalRepository) -> Self {
        Self { repository }
    }

    /// Look up a rental by identifier
    #[instrument(name = "rentals.get", skip(self))]
    pub async fn get(&self, id: i32) -> Result<Option<Rental>, DatabaseError> {
        self.repository.find_by_id(id).await.inspect_err(|e| {
            tracing::error!(
                operation = %e.operation,
                kind = %e.kind,
                rental_id = id,
                "Failed to fetch rental: {}",
                e.message
            );
        })
    }

    /// List rentals matching `query`
    #[instrument(name = "rentals.list", skip(self))]
    pub async fn list(&self, query: &RentalSearchQuery) -> Result<Vec<Rental>, DatabaseError> {
        let rentals = self.repository.find_all(query).await.inspect_err(|e| {
            tracing::error!(
                operation = %e.operation,
                kind = %e.kind,
                "Failed to list rentals: {}",
                e.message
            );
        })?;

        tracing::debug!(count = rentals.len(), "Listed rentals");
        Ok(rentals)
    }
}
