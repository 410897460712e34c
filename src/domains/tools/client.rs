//! HTTP clients for the three upstream families.
//!
//! Each request builds its own `reqwest::Client` with the configured
//! timeout; the client is dropped when the call returns. Every failure is
//! reported as an [`UpstreamFailure`], never as a panic or a protocol error.

use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use tracing::{debug, instrument};

use super::descriptor::Upstream;
use crate::core::config::Config;

const CMC_API_KEY_HEADER: &str = "X-CMC_PRO_API_KEY";
const EXPAND_API_KEY_HEADER: &str = "X-API-Key";

/// Why an upstream call produced no data.
///
/// Callers only ever see the collapsed "no data" outcome; the reason is kept
/// for logging.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamFailure {
    #[error("Failed to create HTTP client: {0}")]
    Client(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Connection failed: {0}")]
    Network(String),

    #[error("Upstream returned status {0}")]
    Status(u16),

    #[error("Invalid response body: {0}")]
    Body(String),

    #[error("Upstream returned an empty payload")]
    Empty,
}

/// Client configuration for one upstream family.
#[derive(Clone)]
pub struct UpstreamClient {
    upstream: Upstream,
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl UpstreamClient {
    /// Build the client for `upstream` from the shared configuration.
    pub fn for_upstream(upstream: Upstream, config: &Config) -> Self {
        let (base_url, api_key) = match upstream {
            Upstream::MarketData => (
                &config.upstreams.market_data_url,
                config.credentials.cmc_api_key.clone(),
            ),
            Upstream::ProtocolAnalytics => (&config.upstreams.protocol_analytics_url, None),
            Upstream::StakingYield => (
                &config.upstreams.staking_yield_url,
                config.credentials.expand_api_key.clone(),
            ),
        };

        Self {
            upstream,
            base_url: base_url.clone(),
            api_key,
            timeout: config.upstreams.timeout(),
        }
    }

    pub fn upstream(&self) -> Upstream {
        self.upstream
    }

    /// Base URL requests are built against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Headers sent with every request to this upstream.
    fn headers(&self) -> Result<HeaderMap, UpstreamFailure> {
        let mut headers = HeaderMap::new();

        match self.upstream {
            Upstream::MarketData => {
                headers.insert(
                    HeaderName::from_static("accepts"),
                    HeaderValue::from_static("application/json"),
                );
                if let Some(key) = &self.api_key {
                    headers.insert(
                        HeaderName::from_static("x-cmc_pro_api_key"),
                        api_key_value(CMC_API_KEY_HEADER, key)?,
                    );
                }
            }
            Upstream::ProtocolAnalytics => {
                headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
            }
            Upstream::StakingYield => {
                headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
                if let Some(key) = &self.api_key {
                    headers.insert(
                        HeaderName::from_static("x-api-key"),
                        api_key_value(EXPAND_API_KEY_HEADER, key)?,
                    );
                }
            }
        }

        Ok(headers)
    }

    /// Issue a single GET and parse the body as JSON.
    ///
    /// Non-2xx statuses, transport errors, timeouts, unparsable bodies and
    /// empty payloads all come back as `Err`.
    #[instrument(skip(self), fields(upstream = %self.upstream))]
    pub async fn get(&self, url: &str) -> Result<Value, UpstreamFailure> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .default_headers(self.headers()?)
            .build()
            .map_err(|e| UpstreamFailure::Client(e.to_string()))?;

        let response = client.get(url).send().await.map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamFailure::Status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(classify)?;
        debug!("Upstream response received: {} bytes", body.len());

        let payload: Value =
            serde_json::from_slice(&body).map_err(|e| UpstreamFailure::Body(e.to_string()))?;

        if is_empty_payload(&payload) {
            return Err(UpstreamFailure::Empty);
        }

        Ok(payload)
    }
}

impl std::fmt::Debug for UpstreamClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamClient")
            .field("upstream", &self.upstream)
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn api_key_value(header: &str, key: &str) -> Result<HeaderValue, UpstreamFailure> {
    let mut value = HeaderValue::from_str(key).map_err(|_| {
        UpstreamFailure::InvalidRequest(format!("{header} contains invalid characters"))
    })?;
    value.set_sensitive(true);
    Ok(value)
}

fn classify(err: reqwest::Error) -> UpstreamFailure {
    if err.is_timeout() {
        UpstreamFailure::Timeout
    } else if err.is_decode() || err.is_body() {
        UpstreamFailure::Body(err.to_string())
    } else {
        UpstreamFailure::Network(err.to_string())
    }
}

/// Falsy payloads (`null`, `false`, zero, `""`, `[]`, `{}`) count as no data.
fn is_empty_payload(payload: &Value) -> bool {
    match payload {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}
