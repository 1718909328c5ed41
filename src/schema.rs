//! Structural contracts for journeys payloads.
//!
//! Each [`Schema`] names the expected shape of one request or response
//! body. Validation is pure and field-by-field: every violation in the
//! value is collected and reported, not just the first. There are no
//! cross-field checks here (whether a departure is in the future is the
//! service's business, not a structural property).

use crate::identity::extract_journey_id;
use crate::journey::{LATITUDE_RANGE, LONGITUDE_RANGE, MIN_PHONE_LEN};
use crate::logging::log_warn;
use chrono::DateTime;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Named payload contracts understood by the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schema {
    /// Body of `POST /api/journeys`.
    CreateRequest,
    /// Body the service answers a successful create with.
    CreateResponse,
    /// Body of a successful `GET /api/journeys/{id}`.
    GetResponse,
}

impl Schema {
    pub fn name(&self) -> &'static str {
        match self {
            Schema::CreateRequest => "create request",
            Schema::CreateResponse => "create response",
            Schema::GetResponse => "get response",
        }
    }

    /// Validate `value` against this contract.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaViolations`] listing every violating field.
    pub fn validate(&self, value: &Value) -> Result<(), SchemaViolations> {
        let mut checker = Checker::default();
        match self {
            Schema::CreateRequest => {
                checker.coordinates("pickup", value.get("pickup"));
                checker.coordinates("dropoff", value.get("dropoff"));
                checker.passenger("passenger", value.get("passenger"));
                checker.datetime_text("departure_date", value.get("departure_date"));
            }
            Schema::CreateResponse => {
                checker.identifier(value);
            }
            Schema::GetResponse => {
                checker.identifier(value);
                checker.coordinates("pickup", value.get("pickup"));
                checker.coordinates("dropoff", value.get("dropoff"));
                checker.passenger("passenger", value.get("passenger"));
                // The service may normalize the departure format, so only
                // presence is required here, not ISO-8601 shape
                checker.nonempty_text("departure_date", value.get("departure_date"));
            }
        }
        checker.finish(*self)
    }
}

/// A single field-level constraint failure.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldViolation {
    /// Dotted path from the body root, e.g. `pickup.longitude`.
    pub path: String,
    pub kind: ViolationKind,
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.kind)
    }
}

/// What constraint a field violated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ViolationKind {
    #[error("missing required field")]
    Missing,
    #[error("expected {expected}")]
    WrongType { expected: &'static str },
    #[error("value {value} outside [{min}, {max}]")]
    OutOfRange { value: f64, min: f64, max: f64 },
    #[error("length {len} below minimum {min}")]
    TooShort { len: usize, min: usize },
    #[error("not an ISO-8601 date-time")]
    NotDateTime,
    #[error("must not be empty")]
    Empty,
}

/// Every violation found validating one value against one [`Schema`].
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaViolations {
    pub schema: Schema,
    pub violations: Vec<FieldViolation>,
}

impl fmt::Display for SchemaViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed validation: ", self.schema.name())?;
        for (index, violation) in self.violations.iter().enumerate() {
            if index > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

impl std::error::Error for SchemaViolations {}

impl SchemaViolations {
    /// Whether `path` is among the violating fields.
    pub fn mentions(&self, path: &str) -> bool {
        self.violations.iter().any(|v| v.path == path)
    }
}

/// Accumulates violations while walking one body.
#[derive(Debug, Default)]
struct Checker {
    violations: Vec<FieldViolation>,
}

impl Checker {
    fn push(&mut self, path: impl Into<String>, kind: ViolationKind) {
        self.violations.push(FieldViolation {
            path: path.into(),
            kind,
        });
    }

    fn number(&mut self, path: String, value: Option<&Value>, (min, max): (f64, f64)) {
        match value {
            None | Some(Value::Null) => self.push(path, ViolationKind::Missing),
            Some(Value::Number(n)) => {
                let value = n.as_f64().unwrap_or(f64::NAN);
                if !(min..=max).contains(&value) {
                    self.push(path, ViolationKind::OutOfRange { value, min, max });
                }
            }
            Some(_) => self.push(path, ViolationKind::WrongType { expected: "number" }),
        }
    }

    /// Requires a string and hands it back for further constraint checks.
    fn text<'a>(&mut self, path: &str, value: Option<&'a Value>) -> Option<&'a str> {
        match value {
            None | Some(Value::Null) => {
                self.push(path, ViolationKind::Missing);
                None
            }
            Some(Value::String(text)) => Some(text.as_str()),
            Some(_) => {
                self.push(path, ViolationKind::WrongType { expected: "string" });
                None
            }
        }
    }

    fn nonempty_text(&mut self, path: &str, value: Option<&Value>) {
        if let Some(text) = self.text(path, value) {
            if text.is_empty() {
                self.push(path, ViolationKind::Empty);
            }
        }
    }

    fn min_len_text(&mut self, path: &str, value: Option<&Value>, min: usize) {
        if let Some(text) = self.text(path, value) {
            if text.len() < min {
                self.push(
                    path,
                    ViolationKind::TooShort {
                        len: text.len(),
                        min,
                    },
                );
            }
        }
    }

    fn datetime_text(&mut self, path: &str, value: Option<&Value>) {
        if let Some(text) = self.text(path, value) {
            if DateTime::parse_from_rfc3339(text).is_err() {
                self.push(path, ViolationKind::NotDateTime);
            }
        }
    }

    fn object<'a>(&mut self, path: &str, value: Option<&'a Value>) -> Option<&'a Value> {
        match value {
            None | Some(Value::Null) => {
                self.push(path, ViolationKind::Missing);
                None
            }
            Some(object @ Value::Object(_)) => Some(object),
            Some(_) => {
                self.push(path, ViolationKind::WrongType { expected: "object" });
                None
            }
        }
    }

    fn coordinates(&mut self, path: &str, value: Option<&Value>) {
        let Some(coords) = self.object(path, value) else {
            return;
        };
        self.number(
            format!("{path}.latitude"),
            coords.get("latitude"),
            LATITUDE_RANGE,
        );
        self.number(
            format!("{path}.longitude"),
            coords.get("longitude"),
            LONGITUDE_RANGE,
        );
    }

    fn passenger(&mut self, path: &str, value: Option<&Value>) {
        let Some(passenger) = self.object(path, value) else {
            return;
        };
        self.nonempty_text(&format!("{path}.name"), passenger.get("name"));
        // surname is optional, but when present it must be text
        if let Some(surname) = passenger.get("surname") {
            if !surname.is_null() && !surname.is_string() {
                self.push(
                    format!("{path}.surname"),
                    ViolationKind::WrongType { expected: "string" },
                );
            }
        }
        self.min_len_text(
            &format!("{path}.phone_number"),
            passenger.get("phone_number"),
            MIN_PHONE_LEN,
        );
    }

    /// An identifier under any key of the priority table, non-empty.
    fn identifier(&mut self, value: &Value) {
        if extract_journey_id(value).is_none() {
            self.push("identifier", ViolationKind::Missing);
        }
    }

    fn finish(self, schema: Schema) -> Result<(), SchemaViolations> {
        if self.violations.is_empty() {
            return Ok(());
        }
        let failure = SchemaViolations {
            schema,
            violations: self.violations,
        };
        log_warn!(
            schema = schema.name(),
            detail = %failure,
            "payload failed schema validation"
        );
        Err(failure)
    }
}
