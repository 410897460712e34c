//! Tool descriptors: the static description of every tool in the catalogue.
//!
//! A descriptor says which argument keys a tool forwards, which upstream
//! family it talks to and how its URL is shaped. Descriptors are plain
//! `const` data; all behaviour lives in the dispatcher, request builder and
//! upstream client.

use std::fmt;
use std::sync::Arc;

use rmcp::model::{JsonObject, Tool};

/// The upstream service family a tool is backed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Upstream {
    /// CoinMarketCap Pro API.
    MarketData,
    /// DefiLlama API.
    ProtocolAnalytics,
    /// Expand Network API.
    StakingYield,
}

impl Upstream {
    /// Short name used in logs.
    pub fn label(self) -> &'static str {
        match self {
            Self::MarketData => "coinmarketcap",
            Self::ProtocolAnalytics => "defillama",
            Self::StakingYield => "expand",
        }
    }
}

impl fmt::Display for Upstream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How a tool's URL is built from its filtered arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlStrategy {
    /// Constant path, arguments are ignored.
    Fixed { path: &'static str },

    /// Fixed path followed by every filtered argument as a query pair.
    Query { path: &'static str },

    /// The value of `key` becomes the last path segment after `prefix`.
    PathSegment {
        prefix: &'static str,
        key: &'static str,
    },

    /// Fixed path with a single `key=<value>` query pair.
    SingleQuery {
        path: &'static str,
        key: &'static str,
    },
}

/// Immutable description of one tool.
#[derive(Clone, Copy)]
pub struct ToolDescriptor {
    /// Unique tool name exposed to clients.
    pub name: &'static str,

    /// Human readable description shown during discovery.
    pub description: &'static str,

    /// Argument keys forwarded to the upstream; everything else is dropped.
    pub whitelist: &'static [&'static str],

    /// Upstream family the tool calls.
    pub upstream: Upstream,

    /// URL shape for the upstream request.
    pub url: UrlStrategy,

    /// Label used in the failure message, e.g. "coin quotes".
    pub subject: &'static str,

    /// Declarative input schema (published, never enforced).
    pub input_schema: fn() -> Arc<JsonObject>,
}

impl ToolDescriptor {
    /// Whether `key` is forwarded by this tool.
    pub fn accepts(&self, key: &str) -> bool {
        self.whitelist.contains(&key)
    }

    /// Message returned when the upstream yields no data.
    pub fn failure_message(&self) -> String {
        format!("Failed to retrieve {} data", self.subject)
    }

    /// Create a Tool model for this descriptor (metadata).
    pub fn to_tool(&self) -> Tool {
        Tool {
            name: self.name.into(),
            description: Some(self.description.into()),
            input_schema: (self.input_schema)(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }
}

impl fmt::Debug for ToolDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolDescriptor")
            .field("name", &self.name)
            .field("whitelist", &self.whitelist)
            .field("upstream", &self.upstream)
            .field("url", &self.url)
            .field("subject", &self.subject)
            .finish()
    }
}
