//! Scenario orchestration: create, read, update, verify.
//!
//! A [`Scenario`] borrows the shared [`ApiTransport`] and sequences the
//! operations of one independent end-to-end flow. Steps return typed
//! results, so a scenario cannot read or update a journey it has not
//! created; the `Start -> Created -> Updated -> Verified` order is enforced
//! by data dependency rather than by a runtime state flag.
//!
//! The partial-update step deserves a note: the exact body shape the
//! service accepts for `PATCH /api/journeys` is not fixed from the
//! harness's point of view, so [`update_candidates`] builds a fixed ordered
//! list of plausible shapes and [`Scenario::update`] stops at the first one
//! the service takes. This probes for the contract's shape; it is not a
//! transient-failure retry loop, and nothing in the harness retries on
//! transport errors.

use crate::config::HarnessConfig;
use crate::error::{HarnessError, Result};
use crate::fixtures;
use crate::identity::extract_journey_id;
use crate::journey::{same_departure_instant, JourneyRequest};
use crate::logging::{log_debug, log_info};
use crate::schema::Schema;
use crate::transport::{ApiReply, ApiTransport};
use serde_json::{Map, Value};

/// Fields a full journey document carries besides its identifier.
const JOURNEY_FIELDS: [&str; 4] = ["pickup", "dropoff", "passenger", "departure_date"];

/// One labeled update payload.
#[derive(Debug, Clone)]
pub struct UpdateCandidate {
    pub label: &'static str,
    pub body: Value,
}

/// Build the candidate payloads for one logical update, in probe order.
///
/// Order reflects decreasing specificity of the id key and decreasing
/// completeness of the document:
///
/// 1. full document keyed by `_id`
/// 2. full document keyed by `journey_id`
/// 3. partial document (changed fields only) keyed by `_id`
/// 4. partial document keyed by `journey_id`
/// 5. changed plus carried-forward fields under an `update` wrapper,
///    keyed by `_id`
/// 6. full document keyed by `id`
pub fn update_candidates(id: &str, changed: &Value, carry: &Value) -> Vec<UpdateCandidate> {
    vec![
        UpdateCandidate {
            label: "full document keyed by _id",
            body: keyed("_id", id, merge_objects(&[carry, changed])),
        },
        UpdateCandidate {
            label: "full document keyed by journey_id",
            body: keyed("journey_id", id, merge_objects(&[carry, changed])),
        },
        UpdateCandidate {
            label: "partial document keyed by _id",
            body: keyed("_id", id, merge_objects(&[changed])),
        },
        UpdateCandidate {
            label: "partial document keyed by journey_id",
            body: keyed("journey_id", id, merge_objects(&[changed])),
        },
        UpdateCandidate {
            label: "update wrapper keyed by _id",
            body: keyed("_id", id, {
                let mut wrapper = Map::new();
                wrapper.insert(
                    "update".to_string(),
                    Value::Object(merge_objects(&[changed, carry])),
                );
                wrapper
            }),
        },
        UpdateCandidate {
            label: "full document keyed by id",
            body: keyed("id", id, merge_objects(&[carry, changed])),
        },
    ]
}

/// Shallow-merge object `parts`, later parts winning on key collisions.
fn merge_objects(parts: &[&Value]) -> Map<String, Value> {
    let mut merged = Map::new();
    for part in parts {
        if let Some(object) = part.as_object() {
            for (key, value) in object {
                merged.insert(key.clone(), value.clone());
            }
        }
    }
    merged
}

fn keyed(key: &str, id: &str, mut fields: Map<String, Value>) -> Value {
    fields.insert(key.to_string(), Value::String(id.to_string()));
    Value::Object(fields)
}

/// Required fields carried forward alongside a partial change: whatever
/// the create response echoed, falling back to the canonical fixture for
/// anything the service did not echo.
pub(crate) fn carry_forward(created_body: &Value, changed: &Value) -> Value {
    let fallback = fixtures::valid_body();
    let mut carry = Map::new();
    for field in JOURNEY_FIELDS {
        if changed.get(field).is_some() {
            continue;
        }
        let value = match created_body.get(field) {
            Some(echoed) if !echoed.is_null() => echoed.clone(),
            _ => fallback[field].clone(),
        };
        carry.insert(field.to_string(), value);
    }
    Value::Object(carry)
}

/// Require every field of `expected` to appear in `actual` with a matching
/// value: objects recurse, numbers compare within `tolerance`, everything
/// else compares exactly.
pub(crate) fn assert_subset(
    expected: &Value,
    actual: &Value,
    tolerance: f64,
    path: &str,
) -> Result<()> {
    match expected {
        Value::Object(fields) => {
            for (key, expected_field) in fields {
                let child_path = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{path}.{key}")
                };
                let actual_field = actual.get(key).unwrap_or(&Value::Null);
                assert_subset(expected_field, actual_field, tolerance, &child_path)?;
            }
            Ok(())
        }
        Value::Number(number) => {
            let expected_number = number.as_f64().unwrap_or(f64::NAN);
            let close_enough = actual
                .as_f64()
                .map(|a| (a - expected_number).abs() <= tolerance)
                .unwrap_or(false);
            if close_enough {
                Ok(())
            } else {
                Err(HarnessError::field_mismatch(
                    path,
                    expected.to_string(),
                    actual.to_string(),
                ))
            }
        }
        other => {
            if actual == other {
                Ok(())
            } else {
                Err(HarnessError::field_mismatch(
                    path,
                    other.to_string(),
                    actual.to_string(),
                ))
            }
        }
    }
}

/// Successful outcome of the create step.
#[derive(Debug, Clone)]
pub struct CreatedJourney {
    pub id: String,
    /// The create response body, kept for carry-forward fields.
    pub body: Value,
}

/// Successful outcome of the read step.
#[derive(Debug, Clone)]
pub struct FetchedJourney {
    pub body: Value,
}

impl FetchedJourney {
    /// Identifier echoed in the fetched body, if any.
    pub fn id(&self) -> Option<&str> {
        extract_journey_id(&self.body)
    }
}

/// Which candidate shape the service accepted, and at what cost.
#[derive(Debug, Clone)]
pub struct UpdateOutcome {
    pub accepted: &'static str,
    /// 1-based count of shapes tried, the accepted one included.
    pub attempts: usize,
    pub status: u16,
}

/// One independent end-to-end flow against the journeys service.
pub struct Scenario<'a> {
    transport: &'a ApiTransport,
    config: &'a HarnessConfig,
}

impl<'a> Scenario<'a> {
    pub fn new(transport: &'a ApiTransport, config: &'a HarnessConfig) -> Self {
        Self { transport, config }
    }

    fn collection_path(&self) -> &str {
        &self.config.journeys_path
    }

    fn journey_path(&self, id: &str) -> String {
        format!("{}/{}", self.config.journeys_path, id)
    }

    /// POST `body` without asserting anything about the answer.
    ///
    /// For scenarios whose subject is the rejection itself.
    pub async fn create_raw(&self, body: &Value) -> Result<ApiReply> {
        self.transport.create(self.collection_path(), body).await
    }

    /// GET `id` without asserting anything about the answer.
    pub async fn read_raw(&self, id: &str) -> Result<ApiReply> {
        self.transport.read(&self.journey_path(id)).await
    }

    /// PATCH `body` without asserting anything about the answer.
    pub async fn update_raw(&self, body: &Value) -> Result<ApiReply> {
        self.transport.update(self.collection_path(), body).await
    }

    /// Create a journey and return its identifier.
    ///
    /// Requires a 2xx status and a schema-valid response carrying an
    /// extractable identifier.
    ///
    /// # Errors
    ///
    /// [`HarnessError::UnexpectedStatus`] on non-2xx,
    /// [`HarnessError::Schema`] when the response body is malformed, and
    /// [`HarnessError::IdentifierAbsent`] when no identifier can be found.
    pub async fn create(&self, body: &Value) -> Result<CreatedJourney> {
        let reply = self.create_raw(body).await?;
        if !reply.is_success() {
            return Err(HarnessError::unexpected_status(
                reply.status.as_u16(),
                reply.text,
            ));
        }

        let response = reply.json.unwrap_or(Value::Null);
        Schema::CreateResponse.validate(&response)?;
        let id = extract_journey_id(&response)
            .map(str::to_string)
            .ok_or_else(|| HarnessError::identifier_absent(response.to_string()))?;

        log_info!(journey_id = %id, "journey created");
        Ok(CreatedJourney { id, body: response })
    }

    /// Fetch a journey by id, requiring 200 and a schema-valid body.
    pub async fn read(&self, id: &str) -> Result<FetchedJourney> {
        let reply = self.read_raw(id).await?;
        if reply.status.as_u16() != 200 {
            return Err(HarnessError::unexpected_status(
                reply.status.as_u16(),
                reply.text,
            ));
        }

        let body = reply.json.unwrap_or(Value::Null);
        Schema::GetResponse.validate(&body)?;
        Ok(FetchedJourney { body })
    }

    /// Read `id` back and require it to match the submitted request:
    /// coordinates and passenger exactly, departure by parsed instant
    /// (the service may reformat the text).
    pub async fn verify_created(
        &self,
        id: &str,
        sent: &JourneyRequest,
    ) -> Result<FetchedJourney> {
        let fetched = self.read(id).await?;

        let mut expected = sent.to_value();
        let expected_departure = expected
            .as_object_mut()
            .and_then(|fields| fields.remove("departure_date"));
        assert_subset(&expected, &fetched.body, 0.0, "")?;

        if let Some(Value::String(sent_departure)) = expected_departure {
            let received = fetched
                .body
                .get("departure_date")
                .and_then(Value::as_str)
                .unwrap_or("");
            if !same_departure_instant(&sent_departure, received) {
                return Err(HarnessError::field_mismatch(
                    "departure_date",
                    sent_departure,
                    received.to_string(),
                ));
            }
        }

        Ok(fetched)
    }

    /// Partially update a created journey, probing the candidate shapes
    /// in order and stopping at the first 2xx.
    ///
    /// `changed` holds only the fields the scenario wants different;
    /// required fields it does not touch are carried forward from the
    /// create response.
    ///
    /// # Errors
    ///
    /// [`HarnessError::UpdateRejected`] with the last status and body when
    /// every shape is refused; transport failures propagate immediately.
    pub async fn update(&self, created: &CreatedJourney, changed: &Value) -> Result<UpdateOutcome> {
        let carry = carry_forward(&created.body, changed);
        self.update_with_carry(&created.id, changed, &carry).await
    }

    /// [`Scenario::update`] with an explicit carry-forward document.
    pub async fn update_with_carry(
        &self,
        id: &str,
        changed: &Value,
        carry: &Value,
    ) -> Result<UpdateOutcome> {
        let candidates = update_candidates(id, changed, carry);
        let total = candidates.len();
        let mut last: Option<ApiReply> = None;

        for (index, candidate) in candidates.into_iter().enumerate() {
            let reply = self.update_raw(&candidate.body).await?;
            log_debug!(
                journey_id = %id,
                candidate = candidate.label,
                attempt = index + 1,
                status = reply.status.as_u16(),
                "update candidate attempted"
            );

            if reply.is_success() {
                log_info!(
                    journey_id = %id,
                    candidate = candidate.label,
                    attempts = index + 1,
                    "update accepted"
                );
                return Ok(UpdateOutcome {
                    accepted: candidate.label,
                    attempts: index + 1,
                    status: reply.status.as_u16(),
                });
            }
            last = Some(reply);
        }

        let (last_status, last_body) = last
            .map(|reply| (reply.status.as_u16(), reply.text))
            .unwrap_or((0, String::new()));
        Err(HarnessError::update_rejected(total, last_status, last_body))
    }

    /// Re-read `id` and require every changed field to have persisted:
    /// text exactly, numbers within the configured tolerance.
    pub async fn verify_update(&self, id: &str, changed: &Value) -> Result<FetchedJourney> {
        let fetched = self.read(id).await?;
        assert_subset(changed, &fetched.body, self.config.coordinate_tolerance, "")?;
        log_info!(journey_id = %id, "update persisted");
        Ok(fetched)
    }
}
