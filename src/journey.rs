//! Wire model for the journeys API.
//!
//! These types describe the request side of the contract. Responses stay as
//! [`serde_json::Value`] throughout the harness because the service's
//! envelope is not contractually fixed; see [`crate::schema`] and
//! [`crate::identity`] for how responses are checked instead.

use chrono::DateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Inclusive latitude domain.
pub const LATITUDE_RANGE: (f64, f64) = (-90.0, 90.0);

/// Inclusive longitude domain.
pub const LONGITUDE_RANGE: (f64, f64) = (-180.0, 180.0);

/// Minimum accepted phone number length. Format beyond length is the
/// service's concern, not the harness's.
pub const MIN_PHONE_LEN: usize = 5;

/// A WGS-84 point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Whether both components lie in their inclusive domains.
    pub fn in_bounds(&self) -> bool {
        (LATITUDE_RANGE.0..=LATITUDE_RANGE.1).contains(&self.latitude)
            && (LONGITUDE_RANGE.0..=LONGITUDE_RANGE.1).contains(&self.longitude)
    }

    /// Component-wise comparison within `tolerance`.
    pub fn approx_eq(&self, other: &Coordinates, tolerance: f64) -> bool {
        (self.latitude - other.latitude).abs() <= tolerance
            && (self.longitude - other.longitude).abs() <= tolerance
    }
}

/// The person the journey is booked for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Passenger {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,
    pub phone_number: String,
}

/// Body of `POST /api/journeys`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JourneyRequest {
    pub pickup: Coordinates,
    pub dropoff: Coordinates,
    pub passenger: Passenger,
    pub departure_date: String,
}

impl JourneyRequest {
    /// The JSON body sent over the wire.
    pub fn to_value(&self) -> Value {
        // Plain structs of numbers and strings cannot fail to serialize
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Whether two departure timestamps name the same instant.
///
/// The service may normalize the format it echoes back; comparing parsed
/// instants tolerates that where comparing text would not. Unparseable
/// input on either side is a mismatch.
pub fn same_departure_instant(sent: &str, received: &str) -> bool {
    match (
        DateTime::parse_from_rfc3339(sent),
        DateTime::parse_from_rfc3339(received),
    ) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
