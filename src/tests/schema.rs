// Unit Tests for Payload Schema Validation
//
// UNIT UNDER TEST: Schema
//
// BUSINESS RESPONSIBILITY:
//   - Checks request and response bodies structurally, field by field
//   - Reports every violation with its dotted path and the broken constraint
//   - Accepts any identifier convention the extractor understands
//
// TEST COVERAGE:
//   - Clean pass for the canonical valid body
//   - Missing fields, wrong types, range, length, and date-time violations
//   - Accumulation of multiple violations in one pass
//   - Response contracts with the different identifier envelopes

use crate::fixtures;
use crate::schema::{Schema, ViolationKind};
use serde_json::json;

mod create_request_tests {
    use super::*;

    #[test]
    fn test_valid_body_passes() {
        let body = fixtures::valid_body();

        assert!(Schema::CreateRequest.validate(&body).is_ok());
    }

    #[test]
    fn test_empty_body_reports_every_required_field() {
        let failure = Schema::CreateRequest
            .validate(&json!({}))
            .expect_err("empty body must not validate");

        for path in ["pickup", "dropoff", "passenger", "departure_date"] {
            assert!(
                failure.mentions(path),
                "expected a violation at {path}, got: {failure}"
            );
        }
    }

    #[test]
    fn test_missing_longitude_is_reported_with_its_path() {
        let mut body = fixtures::valid_body();
        body["pickup"] = json!({ "latitude": 1.23 });

        let failure = Schema::CreateRequest.validate(&body).unwrap_err();

        assert!(failure.mentions("pickup.longitude"));
        assert_eq!(failure.violations.len(), 1, "only one field is broken");
        assert_eq!(failure.violations[0].kind, ViolationKind::Missing);
    }

    #[test]
    fn test_out_of_range_latitude_carries_bounds() {
        let mut body = fixtures::valid_body();
        body["pickup"]["latitude"] = json!(90.5);

        let failure = Schema::CreateRequest.validate(&body).unwrap_err();

        assert!(failure.mentions("pickup.latitude"));
        match &failure.violations[0].kind {
            ViolationKind::OutOfRange { value, min, max } => {
                assert_eq!(*value, 90.5);
                assert_eq!((*min, *max), (-90.0, 90.0));
            }
            other => panic!("expected OutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn test_boundary_coordinates_are_inside_the_domain() {
        // Bounds are inclusive: the exact corners must validate
        for coords in fixtures::boundary_coordinates() {
            let body = fixtures::journey_at(coords).to_value();
            assert!(
                Schema::CreateRequest.validate(&body).is_ok(),
                "corner {coords:?} should validate"
            );
        }
    }

    #[test]
    fn test_blank_passenger_reports_name_and_phone() {
        let mut body = fixtures::valid_body();
        body["passenger"] = json!({ "name": "", "phone_number": "+65" });

        let failure = Schema::CreateRequest.validate(&body).unwrap_err();

        assert!(failure.mentions("passenger.name"));
        assert!(failure.mentions("passenger.phone_number"));
        assert!(failure
            .violations
            .iter()
            .any(|v| v.kind == ViolationKind::Empty));
        assert!(failure
            .violations
            .iter()
            .any(|v| matches!(v.kind, ViolationKind::TooShort { len: 3, min: 5 })));
    }

    #[test]
    fn test_surname_is_optional_but_must_be_text() {
        let mut without_surname = fixtures::valid_body();
        without_surname["passenger"] = json!({ "name": "John", "phone_number": "+6598765432" });
        assert!(Schema::CreateRequest.validate(&without_surname).is_ok());

        let mut numeric_surname = fixtures::valid_body();
        numeric_surname["passenger"]["surname"] = json!(42);
        let failure = Schema::CreateRequest.validate(&numeric_surname).unwrap_err();
        assert!(failure.mentions("passenger.surname"));
    }

    #[test]
    fn test_malformed_departure_date_is_not_a_datetime() {
        let mut body = fixtures::valid_body();
        body["departure_date"] = json!("not-an-iso");

        let failure = Schema::CreateRequest.validate(&body).unwrap_err();

        assert_eq!(failure.violations[0].kind, ViolationKind::NotDateTime);
    }

    #[test]
    fn test_wrong_type_pickup_is_reported_once() {
        // A non-object pickup reports one violation, not one per subfield
        let mut body = fixtures::valid_body();
        body["pickup"] = json!("somewhere in Singapore");

        let failure = Schema::CreateRequest.validate(&body).unwrap_err();

        assert_eq!(failure.violations.len(), 1);
        assert_eq!(
            failure.violations[0].kind,
            ViolationKind::WrongType { expected: "object" }
        );
    }

    #[test]
    fn test_every_invalid_fixture_fails_validation() {
        // The deliberately-broken fixtures and the validator must agree
        for (label, body) in fixtures::invalid_bodies() {
            assert!(
                Schema::CreateRequest.validate(&body).is_err(),
                "fixture {label:?} unexpectedly validated"
            );
        }
    }
}

mod response_contract_tests {
    use super::*;

    #[test]
    fn test_create_response_accepts_any_known_identifier_envelope() {
        let envelopes = [
            json!({ "_id": "abc123" }),
            json!({ "journey_id": "abc123" }),
            json!({ "id": "abc123" }),
            json!({ "data": { "_id": "abc123" } }),
            json!({ "data": { "id": "abc123" } }),
        ];

        for envelope in envelopes {
            assert!(
                Schema::CreateResponse.validate(&envelope).is_ok(),
                "envelope {envelope} should carry a valid identifier"
            );
        }
    }

    #[test]
    fn test_create_response_without_identifier_fails() {
        let failure = Schema::CreateResponse
            .validate(&json!({ "status": "ok" }))
            .unwrap_err();

        assert!(failure.mentions("identifier"));
    }

    #[test]
    fn test_create_response_empty_identifier_fails() {
        assert!(Schema::CreateResponse.validate(&json!({ "_id": "" })).is_err());
    }

    #[test]
    fn test_get_response_accepts_normalized_departure_text() {
        // The service may reformat departure_date; GetResponse only
        // requires non-empty text, not ISO-8601 shape
        let mut body = fixtures::valid_body();
        body["_id"] = json!("abc123");
        body["departure_date"] = json!("Mon Aug 10 2026 14:00:00 GMT+0000");

        assert!(Schema::GetResponse.validate(&body).is_ok());
    }

    #[test]
    fn test_get_response_rejects_empty_departure_text() {
        let mut body = fixtures::valid_body();
        body["_id"] = json!("abc123");
        body["departure_date"] = json!("");

        let failure = Schema::GetResponse.validate(&body).unwrap_err();

        assert!(failure.mentions("departure_date"));
    }

    #[test]
    fn test_get_response_validates_echoed_coordinates() {
        let mut body = fixtures::valid_body();
        body["_id"] = json!("abc123");
        body["dropoff"]["longitude"] = json!(980.0);

        let failure = Schema::GetResponse.validate(&body).unwrap_err();

        assert!(failure.mentions("dropoff.longitude"));
    }

    #[test]
    fn test_null_body_reports_everything() {
        // A non-JSON reply reaches the validator as null
        let failure = Schema::GetResponse
            .validate(&serde_json::Value::Null)
            .unwrap_err();

        assert!(failure.mentions("identifier"));
        assert!(failure.mentions("pickup"));
        assert!(failure.mentions("departure_date"));
    }
}
