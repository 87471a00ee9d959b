//! Rental listings: query parsing, storage, lookup and HTTP handlers
//!
//! Requests flow handler → [`RentalService`] → [`RentalRepository`]; each
//! layer is a plain struct built by constructor injection:
//!
//! ```rust,ignore
//! let rentals = RentalService::new(RentalRepository::new(pool));
//! ```

mod handlers;
mod model;
mod query;
mod repository;
mod response;
mod service;

pub use handlers::{get_rental, list_rentals, parse_rental_id};
pub use model::{Rental, User};
pub use query::{
    GeoPoint, QueryParamError, RawRentalQuery, RentalSearchQuery, SortField,
    NEAR_THRESHOLD_DEGREES,
};
pub use repository::{build_search_query, RentalRepository, RentalRow};
pub use response::{LocationResponse, PriceResponse, RentalResponse, UserResponse};
pub use service::RentalService;
