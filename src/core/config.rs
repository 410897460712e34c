//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables or defaults. The configuration is
//! built once at startup and shared read-only afterwards.

use super::error::{Error, Result};
use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};

/// Default CoinMarketCap Pro API base URL.
pub const DEFAULT_MARKET_DATA_URL: &str = "https://pro-api.coinmarketcap.com";

/// Default DefiLlama API base URL.
pub const DEFAULT_PROTOCOL_ANALYTICS_URL: &str = "https://api.llama.fi";

/// Default Expand Network API base URL.
pub const DEFAULT_STAKING_YIELD_URL: &str = "https://api.expand.network";

/// Default timeout applied to every upstream request.
pub const DEFAULT_UPSTREAM_TIMEOUT_MS: u64 = 10_000;

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// External API credentials configuration.
    pub credentials: CredentialsConfig,

    /// Upstream endpoints and request limits.
    pub upstreams: UpstreamsConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            with_timestamps: true,
        }
    }
}

impl LoggingConfig {
    /// Read `MCP_LOG_LEVEL` and `MCP_LOG_TIMESTAMPS`.
    ///
    /// Kept separate from [`Config::from_env`] so logging can start before
    /// the rest of the configuration is loaded.
    pub fn from_env() -> Self {
        let mut logging = Self::default();

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            logging.level = level;
        }

        if let Ok(flag) = std::env::var("MCP_LOG_TIMESTAMPS") {
            logging.with_timestamps = !matches!(flag.to_lowercase().as_str(), "false" | "0");
        }

        logging
    }
}

/// Configuration for external API credentials.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct CredentialsConfig {
    /// CoinMarketCap Pro API key, sent as `X-CMC_PRO_API_KEY`.
    /// Get a key at: https://pro.coinmarketcap.com/signup
    pub cmc_api_key: Option<String>,

    /// Expand Network API key, sent as `X-API-Key`.
    pub expand_api_key: Option<String>,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field("cmc_api_key", &self.cmc_api_key.as_ref().map(|_| "[REDACTED]"))
            .field(
                "expand_api_key",
                &self.expand_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

/// Base URLs of the three upstream services and the shared request timeout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamsConfig {
    /// CoinMarketCap base URL (no trailing slash).
    pub market_data_url: String,

    /// DefiLlama base URL (no trailing slash).
    pub protocol_analytics_url: String,

    /// Expand Network base URL (no trailing slash).
    pub staking_yield_url: String,

    /// Timeout for a single upstream request, in milliseconds.
    pub timeout_ms: u64,
}

impl UpstreamsConfig {
    /// Request timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for UpstreamsConfig {
    fn default() -> Self {
        Self {
            market_data_url: DEFAULT_MARKET_DATA_URL.to_string(),
            protocol_analytics_url: DEFAULT_PROTOCOL_ANALYTICS_URL.to_string(),
            staking_yield_url: DEFAULT_STAKING_YIELD_URL.to_string(),
            timeout_ms: DEFAULT_UPSTREAM_TIMEOUT_MS,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "coin-api".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig::default(),
            transport: TransportConfig::default(),
            credentials: CredentialsConfig::default(),
            upstreams: UpstreamsConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// For example: `MCP_SERVER_NAME`, `MCP_CMC_API_KEY`. A `.env` file is
    /// not read here; the binary loads it once before anything else.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        config.logging = LoggingConfig::from_env();

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        config.credentials.cmc_api_key = non_empty_var("MCP_CMC_API_KEY");
        if config.credentials.cmc_api_key.is_some() {
            info!("CoinMarketCap API key loaded from environment");
        } else {
            warn!("MCP_CMC_API_KEY not set - CoinMarketCap tools will fail upstream");
        }

        config.credentials.expand_api_key = non_empty_var("MCP_EXPAND_API_KEY");
        if config.credentials.expand_api_key.is_some() {
            info!("Expand Network API key loaded from environment");
        } else {
            warn!("MCP_EXPAND_API_KEY not set - get-apr will fail upstream");
        }

        if let Ok(url) = std::env::var("MCP_CMC_BASE_URL") {
            config.upstreams.market_data_url = trim_base_url(&url);
        }

        if let Ok(url) = std::env::var("MCP_LLAMA_BASE_URL") {
            config.upstreams.protocol_analytics_url = trim_base_url(&url);
        }

        if let Ok(url) = std::env::var("MCP_EXPAND_BASE_URL") {
            config.upstreams.staking_yield_url = trim_base_url(&url);
        }

        if let Ok(timeout) = std::env::var("MCP_UPSTREAM_TIMEOUT_MS") {
            match timeout.parse() {
                Ok(ms) => config.upstreams.timeout_ms = ms,
                Err(_) => warn!(
                    "Ignoring invalid MCP_UPSTREAM_TIMEOUT_MS={:?}, using {}ms",
                    timeout, DEFAULT_UPSTREAM_TIMEOUT_MS
                ),
            }
        }

        config
    }

    /// Check the configuration for values the server cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.upstreams.timeout_ms == 0 {
            return Err(Error::config("upstream timeout must be greater than zero"));
        }

        for (name, url) in [
            ("market data", &self.upstreams.market_data_url),
            ("protocol analytics", &self.upstreams.protocol_analytics_url),
            ("staking yield", &self.upstreams.staking_yield_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(Error::config(format!(
                    "{} base URL must start with http:// or https://, got {:?}",
                    name, url
                )));
            }
        }

        Ok(())
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn trim_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_credentials_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_CMC_API_KEY", "cmc_key_12345");
            std::env::set_var("MCP_EXPAND_API_KEY", "expand_key_67890");
        }
        let config = Config::from_env();
        assert_eq!(
            config.credentials.cmc_api_key.as_deref(),
            Some("cmc_key_12345")
        );
        assert_eq!(
            config.credentials.expand_api_key.as_deref(),
            Some("expand_key_67890")
        );
        unsafe {
            std::env::remove_var("MCP_CMC_API_KEY");
            std::env::remove_var("MCP_EXPAND_API_KEY");
        }
    }

    #[test]
    fn test_logging_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_LOG_LEVEL", "debug");
            std::env::set_var("MCP_LOG_TIMESTAMPS", "false");
        }
        let config = Config::from_env();
        assert_eq!(config.logging.level, "debug");
        assert!(!config.logging.with_timestamps);

        unsafe {
            std::env::remove_var("MCP_LOG_LEVEL");
            std::env::remove_var("MCP_LOG_TIMESTAMPS");
        }
        let logging = LoggingConfig::from_env();
        assert_eq!(logging.level, "info");
        assert!(logging.with_timestamps);
    }

    #[test]
    fn test_blank_credentials_are_ignored() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_CMC_API_KEY", "   ");
            std::env::remove_var("MCP_EXPAND_API_KEY");
        }
        let config = Config::from_env();
        assert!(config.credentials.cmc_api_key.is_none());
        assert!(config.credentials.expand_api_key.is_none());
        unsafe {
            std::env::remove_var("MCP_CMC_API_KEY");
        }
    }

    #[test]
    fn test_upstream_overrides_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_LLAMA_BASE_URL", "http://localhost:9000/");
            std::env::set_var("MCP_UPSTREAM_TIMEOUT_MS", "2500");
        }
        let config = Config::from_env();
        assert_eq!(
            config.upstreams.protocol_analytics_url,
            "http://localhost:9000"
        );
        assert_eq!(config.upstreams.timeout(), Duration::from_millis(2500));
        assert_eq!(config.upstreams.market_data_url, DEFAULT_MARKET_DATA_URL);
        unsafe {
            std::env::remove_var("MCP_LLAMA_BASE_URL");
            std::env::remove_var("MCP_UPSTREAM_TIMEOUT_MS");
        }
    }

    #[test]
    fn test_invalid_timeout_keeps_default() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_UPSTREAM_TIMEOUT_MS", "soon");
        }
        let config = Config::from_env();
        assert_eq!(config.upstreams.timeout_ms, DEFAULT_UPSTREAM_TIMEOUT_MS);
        unsafe {
            std::env::remove_var("MCP_UPSTREAM_TIMEOUT_MS");
        }
    }

    #[test]
    fn test_credentials_redacted_in_debug() {
        let creds = CredentialsConfig {
            cmc_api_key: Some("super_secret_key".to_string()),
            expand_api_key: Some("another_secret".to_string()),
        };
        let debug_str = format!("{:?}", creds);
        assert!(debug_str.contains("REDACTED"));
        assert!(!debug_str.contains("super_secret_key"));
        assert!(!debug_str.contains("another_secret"));
    }

    #[test]
    fn test_default_timeout_is_ten_seconds() {
        let config = Config::default();
        assert_eq!(config.upstreams.timeout(), Duration::from_secs(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.upstreams.timeout_ms = 0;
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        let mut config = Config::default();
        config.upstreams.staking_yield_url = "api.expand.network".to_string();
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }
}
