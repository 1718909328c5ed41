//! Request-body fixtures for create and update scenarios.
//!
//! The only non-deterministic value produced here is the departure
//! timestamp, and it always resolves strictly into the future of the
//! moment it was generated.

use crate::journey::{Coordinates, JourneyRequest, Passenger};
use chrono::{Duration, SecondsFormat, Utc};
use serde_json::{json, Value};

/// Default minutes ahead of now for generated departures.
pub const DEFAULT_DEPARTURE_OFFSET_MINUTES: i64 = 120;

/// RFC 3339 timestamp `minutes` ahead of now (behind, when negative).
pub fn departure_in(minutes: i64) -> String {
    (Utc::now() + Duration::minutes(minutes)).to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Canonical valid journey: a Singapore pickup and dropoff, a named
/// passenger, departure two hours out.
pub fn valid_journey() -> JourneyRequest {
    JourneyRequest {
        pickup: Coordinates::new(1.3521, 103.8198),
        dropoff: Coordinates::new(1.2801, 103.85),
        passenger: Passenger {
            name: "John".to_string(),
            surname: Some("Doe".to_string()),
            phone_number: "+6598765432".to_string(),
        },
        departure_date: departure_in(DEFAULT_DEPARTURE_OFFSET_MINUTES),
    }
}

/// [`valid_journey`] as a wire body.
pub fn valid_body() -> Value {
    valid_journey().to_value()
}

/// Deliberately invalid create bodies, labeled for diagnostics.
///
/// Each entry breaks exactly one contract rule so a scenario can tell
/// which rejection it is probing.
pub fn invalid_bodies() -> Vec<(&'static str, Value)> {
    let mut pickup_missing_longitude = valid_body();
    pickup_missing_longitude["pickup"] = json!({ "latitude": 1.23 });

    let mut dropoff_missing_latitude = valid_body();
    dropoff_missing_latitude["dropoff"] = json!({ "longitude": 103.85 });

    let mut blank_passenger = valid_body();
    blank_passenger["passenger"] = json!({ "name": "", "phone_number": "+65" });

    let mut malformed_departure = valid_body();
    malformed_departure["departure_date"] = json!("not-an-iso");

    vec![
        ("empty body", json!({})),
        ("pickup missing longitude", pickup_missing_longitude),
        ("dropoff missing latitude", dropoff_missing_latitude),
        ("blank passenger name and short phone", blank_passenger),
        ("malformed departure_date", malformed_departure),
    ]
}

/// The extreme corners of the coordinate domain, both inclusive.
pub fn boundary_coordinates() -> [Coordinates; 2] {
    [
        Coordinates::new(-90.0, -180.0),
        Coordinates::new(90.0, 180.0),
    ]
}

/// Valid journey with both ends pinned to `coords`.
pub fn journey_at(coords: Coordinates) -> JourneyRequest {
    let mut journey = valid_journey();
    journey.pickup = coords;
    journey.dropoff = coords;
    journey
}

/// Structurally valid body whose departure is an hour in the past.
///
/// Whether the service rejects temporally-suspect journeys is its own
/// business; this probes, it does not assert a contract.
pub fn past_departure_body() -> Value {
    let mut body = valid_body();
    body["departure_date"] = json!(departure_in(-60));
    body
}

/// Phone formats the service is probed with: international, bare local,
/// and dashed international.
pub fn phone_number_samples() -> [&'static str; 3] {
    ["+6598765432", "98765432", "+60-12-345-6789"]
}

/// Valid journey with a minimal passenger carrying `phone_number`.
pub fn journey_with_phone(phone_number: &str) -> Value {
    let mut body = valid_body();
    body["passenger"] = json!({ "name": "N", "phone_number": phone_number });
    body
}
