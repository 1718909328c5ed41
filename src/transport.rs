//! HTTP transport adapter for the journeys service.
//!
//! One [`ApiTransport`] is constructed per test file and passed by
//! reference into every scenario, so all requests share a connection pool
//! and the harness-wide defaults (JSON content type, bounded timeout).
//!
//! Non-2xx statuses are normal, inspectable results here. Only
//! connection-level failures surface as errors; scenarios decide what
//! status codes mean. Bodies that are empty or not valid JSON parse to
//! `None` while the raw text is preserved for diagnostics.

use crate::config::HarnessConfig;
use crate::error::{HarnessError, Result};
use crate::logging::{log_debug, log_error};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde_json::Value;

/// Uniform result of one request: status plus tolerantly-parsed body.
#[derive(Debug, Clone)]
pub struct ApiReply {
    pub status: StatusCode,
    /// Parsed body, `None` when empty or not valid JSON.
    pub json: Option<Value>,
    /// Raw body text, kept verbatim for diagnostics.
    pub text: String,
}

impl ApiReply {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Shared HTTP handle for the journeys API.
#[derive(Debug)]
pub struct ApiTransport {
    client: reqwest::Client,
    base_url: String,
}

impl ApiTransport {
    /// Build the transport from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Configuration`] if the configuration fails
    /// validation or the HTTP client cannot be constructed.
    pub fn from_config(config: &HarnessConfig) -> Result<Self> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| {
                HarnessError::configuration(format!("failed to build HTTP client: {e}"))
            })?;

        log_debug!(
            base_url = %config.base_url,
            timeout_seconds = config.request_timeout.as_secs(),
            "journeys transport initialized"
        );

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// POST a journey creation body.
    pub async fn create(&self, path: &str, body: &Value) -> Result<ApiReply> {
        self.dispatch(Method::POST, path, Some(body)).await
    }

    /// PATCH an update body. The journeys service takes updates on the
    /// collection path, with the id inside the body.
    pub async fn update(&self, path: &str, body: &Value) -> Result<ApiReply> {
        self.dispatch(Method::PATCH, path, Some(body)).await
    }

    /// GET a journey.
    pub async fn read(&self, path: &str) -> Result<ApiReply> {
        self.dispatch(Method::GET, path, None).await
    }

    async fn dispatch(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<ApiReply> {
        let url = format!("{}{}", self.base_url, path);

        let mut request = self.client.request(method.clone(), &url);
        if let Some(body) = body {
            log_debug!(
                method = %method,
                url = %url,
                request_json = %body,
                "dispatching request"
            );
            request = request.json(body);
        } else {
            log_debug!(method = %method, url = %url, "dispatching request");
        }

        let response = request.send().await.map_err(|e| {
            log_error!(
                method = %method,
                url = %url,
                error = %e,
                "HTTP request failed"
            );
            HarnessError::transport(format!("{method} {url} failed: {e}"), Some(Box::new(e)))
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            log_error!(
                method = %method,
                url = %url,
                error = %e,
                "failed to read response body"
            );
            HarnessError::transport(
                format!("{method} {url}: reading body failed: {e}"),
                Some(Box::new(e)),
            )
        })?;

        // Tolerate empty and non-JSON bodies; scenarios decide what they need
        let json = serde_json::from_str::<Value>(&text).ok();

        log_debug!(
            method = %method,
            url = %url,
            status = status.as_u16(),
            parsed = json.is_some(),
            response_body = %text,
            "response received"
        );

        Ok(ApiReply { status, json, text })
    }
}
