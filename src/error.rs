//! Error types for harness operations.
//!
//! One [`HarnessError`] covers the whole failure taxonomy: configuration
//! mistakes, transport-level failures, and contract surprises (unexpected
//! statuses, schema violations, missing identifiers, rejected updates,
//! fields that did not persist). Every failure is local to the scenario
//! that hit it; nothing here aborts sibling scenarios.
//!
//! Use the constructor methods, which log at the appropriate level as a
//! side effect, rather than building variants directly.

use crate::logging::{log_error, log_warn};
use crate::schema::SchemaViolations;
use thiserror::Error;

/// Convenient result type for harness operations.
pub type Result<T> = std::result::Result<T, HarnessError>;

/// High-level categorization of errors for routing decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The service answered, but outside the contract the scenario expects.
    ///
    /// Schema violations, unexpected statuses, missing identifiers and
    /// unpersisted fields all land here: the finding the harness exists
    /// to surface.
    Contract,

    /// The request never completed (connection refused, timeout, TLS).
    ///
    /// Says nothing about the service's contract; the scenario fails
    /// without a verdict.
    External,

    /// The harness itself is misconfigured. Fix the configuration.
    Client,
}

/// Errors that can occur while running a scenario.
#[derive(Error, Debug)]
pub enum HarnessError {
    /// Harness configuration is invalid or incomplete.
    #[error("harness configuration error: {message}")]
    Configuration {
        /// Description of the configuration problem.
        message: String,
    },

    /// The HTTP request never produced a response.
    ///
    /// Non-2xx statuses are NOT this error; they come back as normal
    /// replies for the scenario to inspect.
    #[error("request failed: {message}")]
    Transport {
        /// Description of the failure.
        message: String,
        /// The underlying error, if available.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Status code outside the scenario's accepted set.
    #[error("unexpected status {status}: {body}")]
    UnexpectedStatus {
        status: u16,
        /// Raw body text, kept verbatim for diagnostics.
        body: String,
    },

    /// A request or response body failed structural validation.
    #[error(transparent)]
    Schema(#[from] SchemaViolations),

    /// No identifier under any known key; the scenario cannot proceed to
    /// read, update or verify.
    #[error("no journey identifier in response body: {body}")]
    IdentifierAbsent { body: String },

    /// Every candidate update payload shape was rejected.
    #[error(
        "all {attempts} update payload shapes rejected, last status {last_status}: {last_body}"
    )]
    UpdateRejected {
        attempts: usize,
        last_status: u16,
        last_body: String,
    },

    /// A changed field did not survive the read-back.
    #[error("journey field {path} did not persist: expected {expected}, got {actual}")]
    FieldMismatch {
        path: String,
        expected: String,
        actual: String,
    },
}

impl HarnessError {
    /// Get the error category for routing decisions.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Configuration { .. } => ErrorCategory::Client,
            Self::Transport { .. } => ErrorCategory::External,
            Self::UnexpectedStatus { .. } => ErrorCategory::Contract,
            Self::Schema(_) => ErrorCategory::Contract,
            Self::IdentifierAbsent { .. } => ErrorCategory::Contract,
            Self::UpdateRejected { .. } => ErrorCategory::Contract,
            Self::FieldMismatch { .. } => ErrorCategory::Contract,
        }
    }

    // =========================================================================
    // Constructor methods with automatic logging
    // =========================================================================

    pub fn configuration(message: impl Into<String>) -> Self {
        let message = message.into();
        log_error!(
            error_type = "configuration",
            message = %message,
            "harness configuration invalid"
        );
        Self::Configuration { message }
    }

    pub fn transport(
        message: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        let message = message.into();
        log_error!(
            error_type = "transport",
            message = %message,
            has_source = source.is_some(),
            "request never completed"
        );
        Self::Transport { message, source }
    }

    pub fn unexpected_status(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        log_warn!(
            error_type = "unexpected_status",
            status = status,
            body = %body,
            "status outside the scenario's accepted set"
        );
        Self::UnexpectedStatus { status, body }
    }

    pub fn identifier_absent(body: impl Into<String>) -> Self {
        let body = body.into();
        log_error!(
            error_type = "identifier_absent",
            body = %body,
            "no journey identifier under any known key"
        );
        Self::IdentifierAbsent { body }
    }

    pub fn update_rejected(
        attempts: usize,
        last_status: u16,
        last_body: impl Into<String>,
    ) -> Self {
        let last_body = last_body.into();
        log_error!(
            error_type = "update_rejected",
            attempts = attempts,
            last_status = last_status,
            last_body = %last_body,
            "every candidate update payload shape rejected"
        );
        Self::UpdateRejected {
            attempts,
            last_status,
            last_body,
        }
    }

    pub fn field_mismatch(
        path: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        let path = path.into();
        let expected = expected.into();
        let actual = actual.into();
        log_error!(
            error_type = "field_mismatch",
            path = %path,
            expected = %expected,
            actual = %actual,
            "changed field did not survive read-back"
        );
        Self::FieldMismatch {
            path,
            expected,
            actual,
        }
    }
}
