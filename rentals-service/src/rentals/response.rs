//! JSON representation of rentals

use serde::{Deserialize, Serialize};

use super::model::{Rental, User};

/// Rental as returned by the HTTP API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentalResponse {
    pub id: i32,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub rental_type: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub length: f32,
    pub sleeps: i32,
    pub primary_image_url: String,
    pub price: PriceResponse,
    pub location: LocationResponse,
    pub user: UserResponse,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceResponse {
    /// Price per day in cents
    pub day: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationResponse {
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
        }
    }
}

impl From<&Rental> for RentalResponse {
    fn from(rental: &Rental) -> Self {
        Self {
            id: rental.id,
            name: rental.name.clone(),
            description: rental.description.clone(),
            rental_type: rental.rental_type.clone(),
            make: rental.vehicle_make.clone(),
            model: rental.vehicle_model.clone(),
            year: rental.vehicle_year,
            length: rental.vehicle_length,
            sleeps: rental.sleeps,
            primary_image_url: rental.primary_image_url.clone(),
            price: PriceResponse {
                day: rental.price_per_day,
            },
            location: LocationResponse {
                city: rental.home_city.clone(),
                state: rental.home_state.clone(),
                zip: rental.home_zip.clone(),
                country: rental.home_country.clone(),
                lat: rental.lat,
                lng: rental.lng,
            },
            user: UserResponse::from(&rental.user),
        }
    }
}

impl From<Rental> for RentalResponse {
    fn from(rental: Rental) -> Self {
        Self::from(&rental)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rental() -> Rental {
        Rental {
            id: 2,
            user: User {
                id: 1,
                first_name: "John".into(),
                last_name: "Smith".into(),
            },
            name: "'Abaco' VW Bay Window".into(),
            rental_type: "camper-van".into(),
            description: "ultrices consectetur".into(),
            sleeps: 4,
            price_per_day: 16900,
            home_city: "Costa Mesa".into(),
            home_state: "CA".into(),
            home_zip: "92627".into(),
            home_country: "US".into(),
            vehicle_make: "Volkswagen".into(),
            vehicle_model: "Bay Window".into(),
            vehicle_year: 1978,
            vehicle_length: 15.0,
            created: None,
            updated: None,
            lat: 33.64,
            lng: -117.93,
            primary_image_url: "https://example.com/abaco.jpg".into(),
        }
    }

    #[test]
    fn test_response_shape() {
        let value = serde_json::to_value(RentalResponse::from(&rental())).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 2,
                "name": "'Abaco' VW Bay Window",
                "description": "ultrices consectetur",
                "type": "camper-van",
                "make": "Volkswagen",
                "model": "Bay Window",
                "year": 1978,
                "length": 15.0,
                "sleeps": 4,
                "primary_image_url": "https://example.com/abaco.jpg",
                "price": { "day": 16900 },
                "location": {
                    "city": "Costa Mesa",
                    "state": "CA",
                    "zip": "92627",
                    "country": "US",
                    "lat": 33.64,
                    "lng": -117.93
                },
                "user": { "id": 1, "first_name": "John", "last_name": "Smith" }
            })
        );
    }

    #[test]
    fn test_price_is_an_integer() {
        let value = serde_json::to_value(RentalResponse::from(rental())).unwrap();
        assert!(value["price"]["day"].is_i64());
    }

    #[test]
    fn test_timestamps_are_not_exposed() {
        let value = serde_json::to_value(RentalResponse::from(&rental())).unwrap();
        let object = value.as_object().unwrap();
        assert!(!object.contains_key("created"));
        assert!(!object.contains_key("updated"));
        assert!(!object.contains_key("price_per_day"));
    }
}
