//! Harness configuration.
//!
//! One [`HarnessConfig`] value feeds the transport and every scenario in a
//! test file. The only externally-overridable knob is the base URL, via
//! [`BASE_URL_ENV`], matching how the suite is pointed at different
//! environments.

use crate::error::{HarnessError, Result};
use std::env;
use std::time::Duration;

/// Environment variable overriding the journeys service base URL.
pub const BASE_URL_ENV: &str = "JOURNEYS_BASE_URL";

/// Fixed QA environment endpoint used when no override is set.
pub const DEFAULT_BASE_URL: &str = "https://qa-interview-test.qa.splytech.dev";

/// Configuration for one harness run.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Scheme and host the journeys API is served from.
    pub base_url: String,

    /// Collection path for journeys. PATCH goes here too; the service
    /// takes the id in the body, not the path.
    pub journeys_path: String,

    /// Bound on every individual request. No request blocks past this.
    pub request_timeout: Duration,

    /// Minutes ahead of now for generated departure timestamps.
    pub departure_offset_minutes: i64,

    /// Tolerance for floating-point coordinate comparison during
    /// update verification.
    pub coordinate_tolerance: f64,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            journeys_path: "/api/journeys".to_string(),
            request_timeout: Duration::from_secs(30),
            departure_offset_minutes: 120,
            coordinate_tolerance: 0.001,
        }
    }
}

impl HarnessConfig {
    /// Default configuration with the base URL taken from [`BASE_URL_ENV`]
    /// when set and non-empty.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(base_url) = env::var(BASE_URL_ENV) {
            if !base_url.is_empty() {
                config.base_url = base_url;
            }
        }
        config
    }

    /// Validate the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Configuration`] if the base URL is not
    /// absolute, the journeys path is not rooted, or the tolerance is
    /// negative.
    pub fn validate(&self) -> Result<()> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(HarnessError::configuration(format!(
                "base URL must be absolute, got {:?}",
                self.base_url
            )));
        }
        if !self.journeys_path.starts_with('/') {
            return Err(HarnessError::configuration(format!(
                "journeys path must start with '/', got {:?}",
                self.journeys_path
            )));
        }
        if self.coordinate_tolerance < 0.0 {
            return Err(HarnessError::configuration(format!(
                "coordinate tolerance must be non-negative, got {}",
                self.coordinate_tolerance
            )));
        }
        Ok(())
    }
}
