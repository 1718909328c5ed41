//! Test helper utilities for journeys-harness integration tests
//!
//! Shared fixtures for driving the harness against a wiremock stand-in
//! for the journeys service.

// Allow dead code in test utilities - helpers are used across different test files
#![allow(dead_code)]

use journeys_harness::{fixtures, HarnessConfig};
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Journeys collection path used by every test.
pub const JOURNEYS: &str = "/api/journeys";

/// Install a test-writer subscriber so RUST_LOG surfaces harness logs.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Harness configuration pointed at a mock server, with a timeout short
/// enough that a misbehaving mock fails the test quickly.
pub fn config_for(mock_uri: &str) -> HarnessConfig {
    HarnessConfig {
        base_url: mock_uri.to_string(),
        request_timeout: Duration::from_secs(5),
        ..HarnessConfig::default()
    }
}

/// `body` plus a Mongo-style identifier: what a well-behaved service
/// echoes for a create.
pub fn echo_with_id(mut body: Value, id: &str) -> Value {
    body["_id"] = json!(id);
    body
}

/// A canonical create response for tests that never compare timestamps.
pub fn created_body(id: &str) -> Value {
    echo_with_id(fixtures::valid_body(), id)
}

/// The identifier conventions the extractor understands.
#[derive(Debug, Clone, Copy)]
pub enum Envelope {
    MongoId,
    JourneyId,
    PlainId,
    DataMongoId,
    DataPlainId,
}

impl Envelope {
    pub fn all() -> [Envelope; 5] {
        [
            Envelope::MongoId,
            Envelope::JourneyId,
            Envelope::PlainId,
            Envelope::DataMongoId,
            Envelope::DataPlainId,
        ]
    }
}

/// [`created_body`] with the envelope swapped, for the tolerant-extractor
/// scenarios.
pub fn created_body_with_envelope(id: &str, envelope: Envelope) -> Value {
    let mut body = fixtures::valid_body();
    match envelope {
        Envelope::MongoId => body["_id"] = json!(id),
        Envelope::JourneyId => body["journey_id"] = json!(id),
        Envelope::PlainId => body["id"] = json!(id),
        Envelope::DataMongoId => {
            let mut fields = body;
            fields["_id"] = json!(id);
            body = json!({ "data": fields });
        }
        Envelope::DataPlainId => {
            let mut fields = body;
            fields["id"] = json!(id);
            body = json!({ "data": fields });
        }
    }
    body
}

/// Mount a create endpoint answering 201 with `response`.
pub async fn mount_create(server: &MockServer, response: &Value) {
    Mock::given(method("POST"))
        .and(path(JOURNEYS))
        .respond_with(ResponseTemplate::new(201).set_body_json(response))
        .mount(server)
        .await;
}

/// Mount a read endpoint answering 200 with `response` for `id`.
pub async fn mount_read(server: &MockServer, id: &str, response: &Value) {
    Mock::given(method("GET"))
        .and(path(format!("{JOURNEYS}/{id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(server)
        .await;
}
