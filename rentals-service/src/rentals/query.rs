//! Search parameters for rental list operations
//!
//! [`RawRentalQuery`] is what axum deserializes from the query string: every
//! parameter as optional text. Converting it into a [`RentalSearchQuery`]
//! parses each parameter independently and fails on the first malformed one,
//! so a request is either fully understood or rejected.
//!
//! # Example
//!
//! ```rust
//! use rentals_service::rentals::{RawRentalQuery, RentalSearchQuery, SortField};
//!
//! let raw = RawRentalQuery {
//!     price_min: Some("5000".to_string()),
//!     sort: Some("PRICE".to_string()),
//!     ..RawRentalQuery::default()
//! };
//! let query = RentalSearchQuery::try_from(raw).unwrap();
//!
//! assert_eq!(query.price_min, Some(5000));
//! assert_eq!(query.sort, Some(SortField::Price));
//! assert!(query.price_max.is_none());
//! ```

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

/// Half-width, in degrees, of the box searched around a `near` point
pub const NEAR_THRESHOLD_DEGREES: f64 = 50.0;

/// A malformed search parameter
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryParamError {
    /// An integer parameter could not be parsed
    #[error("invalid value for `{param}`: expected an integer, got {value:?}")]
    InvalidInteger { param: &'static str, value: String },

    /// A paging parameter was negative or not an integer
    #[error("invalid value for `{param}`: expected a non-negative integer, got {value:?}")]
    InvalidCount { param: &'static str, value: String },

    /// An entry of the `ids` list is empty or not an integer
    #[error("invalid entry in `ids`: expected a comma-separated list of integers, got {0:?}")]
    InvalidId(String),

    /// `near` did not contain exactly a latitude and a longitude
    #[error("invalid value for `near`: expected `lat,lng`, got {0:?}")]
    IncompleteCoordinates(String),

    /// A `near` coordinate is not a finite number
    #[error("invalid coordinate in `near`: expected a number, got {0:?}")]
    InvalidCoordinate(String),

    /// `sort` names a field outside the allow-list
    #[error(
        "invalid value for `sort`: {0:?} is not one of {fields}",
        fields = SortField::allowed()
    )]
    InvalidSort(String),
}

/// Fields a rental list can be ordered by (always ascending)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    Id,
    Name,
    Description,
    Type,
    Make,
    Model,
    Year,
    Sleeps,
    Price,
}

impl SortField {
    pub const ALL: [SortField; 9] = [
        Self::Id,
        Self::Name,
        Self::Description,
        Self::Type,
        Self::Make,
        Self::Model,
        Self::Year,
        Self::Sleeps,
        Self::Price,
    ];

    /// Name accepted in the `sort` parameter
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Description => "description",
            Self::Type => "type",
            Self::Make => "make",
            Self::Model => "model",
            Self::Year => "year",
            Self::Sleeps => "sleeps",
            Self::Price => "price",
        }
    }

    /// Physical column in the `rentals` table
    #[must_use]
    pub const fn column(&self) -> &'static str {
        match self {
            Self::Price => "price_per_day",
            Self::Make => "vehicle_make",
            Self::Model => "vehicle_model",
            Self::Year => "vehicle_year",
            other => other.as_str(),
        }
    }

    fn allowed() -> String {
        Self::ALL
            .iter()
            .map(SortField::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = QueryParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == wanted)
            .ok_or_else(|| QueryParamError::InvalidSort(s.to_string()))
    }
}

/// Latitude/longitude pair used for proximity filtering
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    /// Inclusive latitude range of the bounding box around this point
    #[must_use]
    pub fn lat_range(&self) -> (f64, f64) {
        (self.lat - NEAR_THRESHOLD_DEGREES, self.lat + NEAR_THRESHOLD_DEGREES)
    }

    /// Inclusive longitude range of the bounding box around this point
    #[must_use]
    pub fn lng_range(&self) -> (f64, f64) {
        (self.lng - NEAR_THRESHOLD_DEGREES, self.lng + NEAR_THRESHOLD_DEGREES)
    }
}

impl FromStr for GeoPoint {
    type Err = QueryParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').collect();
        let [lat, lng] = parts.as_slice() else {
            return Err(QueryParamError::IncompleteCoordinates(s.to_string()));
        };
        Ok(Self {
            lat: parse_coordinate(lat)?,
            lng: parse_coordinate(lng)?,
        })
    }
}

fn parse_coordinate(raw: &str) -> Result<f64, QueryParamError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(QueryParamError::IncompleteCoordinates(raw.to_string()));
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| QueryParamError::InvalidCoordinate(raw.to_string()))
}

/// Query string of `GET /rentals`, before validation
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct RawRentalQuery {
    pub price_min: Option<String>,
    pub price_max: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
    pub ids: Option<String>,
    pub near: Option<String>,
    pub sort: Option<String>,
}

/// Validated rental search; every absent field imposes no constraint
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RentalSearchQuery {
    /// Inclusive lower bound on price per day
    pub price_min: Option<i64>,
    /// Inclusive upper bound on price per day
    pub price_max: Option<i64>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    /// Restrict results to these identifiers
    pub ids: Option<Vec<i32>>,
    pub near: Option<GeoPoint>,
    pub sort: Option<SortField>,
}

impl RentalSearchQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_price_range(mut self, min: Option<i64>, max: Option<i64>) -> Self {
        self.price_min = min;
        self.price_max = max;
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    #[must_use]
    pub fn with_ids(mut self, ids: Vec<i32>) -> Self {
        self.ids = Some(ids);
        self
    }

    #[must_use]
    pub fn with_near(mut self, lat: f64, lng: f64) -> Self {
        self.near = Some(GeoPoint { lat, lng });
        self
    }

    #[must_use]
    pub fn with_sort(mut self, sort: SortField) -> Self {
        self.sort = Some(sort);
        self
    }
}

impl TryFrom<RawRentalQuery> for RentalSearchQuery {
    type Error = QueryParamError;

    fn try_from(raw: RawRentalQuery) -> Result<Self, Self::Error> {
        Ok(Self {
            price_min: raw
                .price_min
                .as_deref()
                .map(|v| parse_integer("price_min", v))
                .transpose()?,
            price_max: raw
                .price_max
                .as_deref()
                .map(|v| parse_integer("price_max", v))
                .transpose()?,
            limit: raw
                .limit
                .as_deref()
                .map(|v| parse_count("limit", v))
                .transpose()?,
            offset: raw
                .offset
                .as_deref()
                .map(|v| parse_count("offset", v))
                .transpose()?,
            ids: raw.ids.as_deref().map(parse_ids).transpose()?,
            near: raw.near.as_deref().map(str::parse).transpose()?,
            sort: raw.sort.as_deref().map(str::parse).transpose()?,
        })
    }
}

fn parse_integer(param: &'static str, value: &str) -> Result<i64, QueryParamError> {
    value
        .trim()
        .parse()
        .map_err(|_| QueryParamError::InvalidInteger {
            param,
            value: value.to_string(),
        })
}

fn parse_count(param: &'static str, value: &str) -> Result<u32, QueryParamError> {
    value
        .trim()
        .parse()
        .map_err(|_| QueryParamError::InvalidCount {
            param,
            value: value.to_string(),
        })
}

fn parse_ids(value: &str) -> Result<Vec<i32>, QueryParamError> {
    value
        .split(',')
        .map(|entry| {
            entry
                .trim()
                .parse()
                .map_err(|_| QueryParamError::InvalidId(entry.to_string()))
        })
        .collect()
}
