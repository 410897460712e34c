//! DefiLlama protocol listing tool.

use std::collections::HashMap;
use std::sync::Arc;

use rmcp::{handler::server::tool::schema_for_type, model::JsonObject};
use schemars::JsonSchema;
use serde::Deserialize;

use crate::domains::tools::descriptor::{ToolDescriptor, Upstream, UrlStrategy};

/// Shape of a protocol entry as returned by DefiLlama.
///
/// Published as the tool's input schema for discovery. None of these fields
/// are forwarded: the listing endpoint takes no parameters.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ProtocolEntry {
    /// The unique identifier of the protocol
    pub id: Option<String>,

    /// The name of the protocol
    pub name: Option<String>,

    /// The symbol associated with the protocol
    pub symbol: Option<String>,

    /// The official website URL of the protocol
    pub url: Option<String>,

    /// A detailed description of the protocol
    pub description: Option<String>,

    /// The primary chain the protocol operates on
    pub chain: Option<String>,

    /// URL to the protocol's logo image
    pub logo: Option<String>,

    /// Number of security audits performed
    pub audits: Option<String>,

    /// Additional notes about protocol audits
    pub audit_note: Option<String>,

    /// The category of the protocol (e.g., CEX, DEX, Lending)
    pub category: Option<String>,

    /// List of blockchain networks supported by the protocol
    pub chains: Option<Vec<String>>,

    /// Twitter handle of the protocol
    pub twitter: Option<String>,

    /// List of protocols this one was forked from
    #[serde(rename = "forkedFrom")]
    pub forked_from: Option<Vec<String>>,

    /// List of oracle services used by the protocol
    pub oracles: Option<Vec<String>>,

    /// Unix timestamp when the protocol was first listed
    #[serde(rename = "listedAt")]
    pub listed_at: Option<i64>,

    /// Description of how protocol data is collected and calculated
    pub methodology: Option<String>,

    /// URL-friendly identifier for the protocol
    pub slug: Option<String>,

    /// Total Value Locked in the protocol across all chains
    pub tvl: Option<f64>,

    /// Breakdown of TVL by individual chains
    #[serde(rename = "chainTvls")]
    pub chain_tvls: Option<HashMap<String, f64>>,

    /// Percentage change in TVL over the last hour
    pub change_1h: Option<f64>,

    /// Percentage change in TVL over the last 24 hours
    pub change_1d: Option<f64>,

    /// Percentage change in TVL over the last 7 days
    pub change_7d: Option<f64>,

    /// Breakdown of protocol's token distributions
    #[serde(rename = "tokenBreakdowns")]
    pub token_breakdowns: Option<HashMap<String, JsonObject>>,

    /// Market capitalization of the protocol's token
    pub mcap: Option<f64>,
}

/// DefiLlama "/protocols" tool.
#[derive(Debug, Clone)]
pub struct ListingProtocolsTool;

impl ListingProtocolsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "listing-protocols";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "List all protocols along with their TVL (total value locked), supported chains, and other metadata";

    pub const DESCRIPTOR: ToolDescriptor = ToolDescriptor {
        name: Self::NAME,
        description: Self::DESCRIPTION,
        whitelist: &[],
        upstream: Upstream::ProtocolAnalytics,
        url: UrlStrategy::Fixed { path: "/protocols" },
        subject: "protocols",
        input_schema: Self::input_schema,
    };

    fn input_schema() -> Arc<JsonObject> {
        schema_for_type::<ProtocolEntry>().into()
    }
}
