//! # journeys-harness
//!
//! End-to-end validation harness for a remote "journeys" HTTP API
//! (create, fetch, partial update).
//!
//! ## Key Pieces
//!
//! - **Schema validation**: named structural contracts with field-level
//!   violation reporting
//! - **Identifier extraction**: prioritized lookup across the envelope
//!   conventions the service might use
//! - **Transport adapter**: one shared client, uniform (status, parsed
//!   body) replies, non-2xx as inspectable data
//! - **Fixtures**: canonical valid, boundary, and deliberately broken
//!   request bodies
//! - **Scenarios**: create -> read -> update -> verify orchestration, with
//!   candidate-shape probing for the ambiguous partial-update contract
//!
//! ## Example
//!
//! ```rust,no_run
//! use journeys_harness::{fixtures, ApiTransport, HarnessConfig, Scenario};
//!
//! # async fn example() -> journeys_harness::Result<()> {
//! let config = HarnessConfig::from_env();
//! let transport = ApiTransport::from_config(&config)?;
//! let scenario = Scenario::new(&transport, &config);
//!
//! let created = scenario.create(&fixtures::valid_body()).await?;
//! let fetched = scenario.read(&created.id).await?;
//! assert_eq!(fetched.id(), Some(created.id.as_str()));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod fixtures;
pub mod identity;
pub mod journey;

// Logging utilities (re-exports tracing with log_* naming) - internal only
pub(crate) mod logging;

pub mod scenario;
pub mod schema;
pub mod transport;

#[cfg(test)]
pub mod tests;

// Re-export main types
pub use config::HarnessConfig;
pub use error::{ErrorCategory, HarnessError, Result};
pub use identity::extract_journey_id;
pub use journey::{Coordinates, JourneyRequest, Passenger};
pub use scenario::{
    update_candidates, CreatedJourney, FetchedJourney, Scenario, UpdateCandidate, UpdateOutcome,
};
pub use schema::{FieldViolation, Schema, SchemaViolations, ViolationKind};
pub use transport::{ApiReply, ApiTransport};
