//! PostgreSQL access for rentals
//!
//! Every read joins each rental with its owning user in a single statement.
//! The joined row is decoded into [`RentalRow`] and split into a [`Rental`]
//! carrying its [`User`].
//!
//! Search statements are assembled with [`QueryBuilder`]. Request values are
//! always bound; the only identifiers pushed as SQL text are the columns of
//! [`SortField`](super::SortField).

use chrono::NaiveDateTime;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::model::{Rental, User};
use super::query::RentalSearchQuery;
use crate::error::DatabaseError;

/// Projection shared by every rental read
///
/// Numeric columns are cast so that `numeric` storage decodes as floats.
const SELECT_RENTALS: &str = "SELECT \
    r.id, r.user_id, r.name, r.type AS rental_type, r.description, \
    r.sleeps::int4 AS sleeps, r.price_per_day::int8 AS price_per_day, \
    r.home_city, r.home_state, r.home_zip, r.home_country, \
    r.vehicle_make, r.vehicle_model, r.vehicle_year::int4 AS vehicle_year, \
    r.vehicle_length::float4 AS vehicle_length, \
    r.created::timestamp AS created, r.updated::timestamp AS updated, \
    r.lat::float8 AS lat, r.lng::float8 AS lng, r.primary_image_url, \
    u.first_name, u.last_name \
    FROM rentals r \
    INNER JOIN users u ON u.id = r.user_id";

/// A `rentals` row joined with its owner
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RentalRow {
    pub id: i32,
    pub user_id: i32,
    pub name: Option<String>,
    pub rental_type: Option<String>,
    pub description: Option<String>,
    pub sleeps: Option<i32>,
    pub price_per_day: Option<i64>,
    pub home_city: Option<String>,
    pub home_state: Option<String>,
    pub home_zip: Option<String>,
    pub home_country: Option<String>,
    pub vehicle_make: Option<String>,
    pub vehicle_model: Option<String>,
    pub vehicle_year: Option<i32>,
    pub vehicle_length: Option<f32>,
    pub created: Option<NaiveDateTime>,
    pub updated: Option<NaiveDateTime>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub primary_image_url: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl From<RentalRow> for Rental {
    fn from(row: RentalRow) -> Self {
        Self {
            id: row.id,
            user: User {
                id: row.user_id,
                first_name: row.first_name.unwrap_or_default(),
                last_name: row.last_name.unwrap_or_default(),
            },
            name: row.name.unwrap_or_default(),
            rental_type: row.rental_type.unwrap_or_default(),
            description: row.description.unwrap_or_default(),
            sleeps: row.sleeps.unwrap_or_default(),
            price_per_day: row.price_per_day.unwrap_or_default(),
            home_city: row.home_city.unwrap_or_default(),
            home_state: row.home_state.unwrap_or_default(),
            home_zip: row.home_zip.unwrap_or_default(),
            home_country: row.home_country.unwrap_or_default(),
            vehicle_make: row.vehicle_make.unwrap_or_default(),
            vehicle_model: row.vehicle_model.unwrap_or_default(),
            vehicle_year: row.vehicle_year.unwrap_or_default(),
            vehicle_length: row.vehicle_length.unwrap_or_default(),
            created: row.created,
            updated: row.updated,
            lat: row.lat.unwrap_or_default(),
            lng: row.lng.unwrap_or_default(),
            primary_image_url: row.primary_image_url.unwrap_or_default(),
        }
    }
}

/// Read-only store adapter for rentals
#[derive(Debug, Clone)]
pub struct RentalRepository {
    pool: PgPool,
}

impl RentalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch a single rental with its owner
    ///
    /// A missing rental is `Ok(None)`, never an error.
    pub async fn find_by_id(&self, id: i32) -> Result<Option<Rental>, DatabaseError> {
        let mut builder = QueryBuilder::<Postgres>::new(SELECT_RENTALS);
        builder.push(" WHERE r.id = ").push_bind(id);

        let row = builder
            .build_query_as::<RentalRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DatabaseError::from(e).add_context(format!("rentals.id = {}", id)))?;

        Ok(row.map(Rental::from))
    }

    /// Fetch every rental matching `query`, in store order unless sorted
    pub async fn find_all(&self, query: &RentalSearchQuery) -> Result<Vec<Rental>, DatabaseError> {
        let mut builder = build_search_query(query);

        let rows = builder
            .build_query_as::<RentalRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DatabaseError::from(e).add_context("rentals search"))?;

        Ok(rows.into_iter().map(Rental::from).collect())
    }
}

/// Build the search statement for `query`
///
/// Predicates are emitted in a fixed order (ids, price bounds, bounding box)
/// followed by ORDER BY, LIMIT and OFFSET, each only when present. Sorted
/// results break ties on `r.id` so every page agrees with the full ordering.
pub fn build_search_query(query: &RentalSearchQuery) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::<Postgres>::new(SELECT_RENTALS);
    let mut has_where = false;

    if let Some(ids) = &query.ids {
        push_conjunction(&mut builder, &mut has_where);
        builder.push("r.id = ANY(").push_bind(ids.clone()).push(")");
    }

    if let Some(min) = query.price_min {
        push_conjunction(&mut builder, &mut has_where);
        builder.push("r.price_per_day >= ").push_bind(min);
    }

    if let Some(max) = query.price_max {
        push_conjunction(&mut builder, &mut has_where);
        builder.push("r.price_per_day <= ").push_bind(max);
    }

    if let Some(point) = query.near {
        let (lat_low, lat_high) = point.lat_range();
        let (lng_low, lng_high) = point.lng_range();

        push_conjunction(&mut builder, &mut has_where);
        builder
            .push("r.lat::float8 BETWEEN ")
            .push_bind(lat_low)
            .push(" AND ")
            .push_bind(lat_high);

        push_conjunction(&mut builder, &mut has_where);
        builder
            .push("r.lng::float8 BETWEEN ")
            .push_bind(lng_low)
            .push(" AND ")
            .push_bind(lng_high);
    }

    if let Some(sort) = query.sort {
        builder
            .push(" ORDER BY r.")
            .push(sort.column())
            .push(" ASC, r.id ASC");
    }

    if let Some(limit) = query.limit {
        builder.push(" LIMIT ").push_bind(i64::from(limit));
    }

    if let Some(offset) = query.offset {
        builder.push(" OFFSET ").push_bind(i64::from(offset));
    }

    builder
}

fn push_conjunction(builder: &mut QueryBuilder<'static, Postgres>, has_where: &mut bool) {
    if *has_where {
        builder.push(" AND ");
    } else {
        builder.push(" WHERE ");
        *has_where = true;
    }
}
