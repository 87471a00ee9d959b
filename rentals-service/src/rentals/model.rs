//! Rental and user entities

use chrono::NaiveDateTime;

/// Owner of a rental listing
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
}

/// A vehicle available for rent, with its owning user loaded eagerly
#[derive(Debug, Clone, PartialEq)]
pub struct Rental {
    pub id: i32,
    pub user: User,
    pub name: String,
    pub rental_type: String,
    pub description: String,
    pub sleeps: i32,
    /// Price per day in minor currency units (cents)
    pub price_per_day: i64,
    pub home_city: String,
    pub home_state: String,
    pub home_zip: String,
    pub home_country: String,
    pub vehicle_make: String,
    pub vehicle_model: String,
    pub vehicle_year: i32,
    pub vehicle_length: f32,
    pub created: Option<NaiveDateTime>,
    pub updated: Option<NaiveDateTime>,
    pub lat: f64,
    pub lng: f64,
    pub primary_image_url: String,
}
