//! HTTP handlers for `/rentals`

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};

use super::query::{RawRentalQuery, RentalSearchQuery};
use super::response::RentalResponse;
use crate::{error::Error, state::AppState};

/// Parse the `{id}` path segment
pub fn parse_rental_id(raw: &str) -> Result<i32, Error> {
    raw.trim().parse().map_err(|_| {
        Error::BadRequest(format!(
            "invalid rental id: expected an integer, got {:?}",
            raw
        ))
    })
}

/// `GET /rentals/{id}`
pub async fn get_rental(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RentalResponse>, Error> {
    let id = parse_rental_id(&id)?;

    let rental = state
        .rentals()
        .get(id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("rental {} not found", id)))?;

    Ok(Json(RentalResponse::from(rental)))
}

/// `GET /rentals`
pub async fn list_rentals(
    State(state): State<AppState>,
    query: Result<Query<RawRentalQuery>, QueryRejection>,
) -> Result<Json<Vec<RentalResponse>>, Error> {
    let Query(raw) = query.map_err(|e| Error::BadRequest(e.body_text()))?;
    let query = RentalSearchQuery::try_from(raw)?;

    let rentals = state.rentals().list(&query).await?;

    Ok(Json(rentals.iter().map(RentalResponse::from).collect()))
}
