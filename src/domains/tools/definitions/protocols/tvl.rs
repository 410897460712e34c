//! DefiLlama single-protocol TVL tool.

use std::sync::Arc;

use rmcp::{handler::server::tool::schema_for_type, model::JsonObject};
use schemars::JsonSchema;
use serde::Deserialize;

use crate::domains::tools::descriptor::{ToolDescriptor, Upstream, UrlStrategy};

/// Parameters for the protocol TVL tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ProtocolTvlParams {
    /// The URL-friendly identifier for the protocol.
    pub protocol: String,
}

/// DefiLlama "/tvl/{protocol}" tool.
#[derive(Debug, Clone)]
pub struct ProtocolTvlTool;

impl ProtocolTvlTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get-protocol-tvl";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Fetches the Total Value Locked (TVL) for a specific protocol.";

    pub const DESCRIPTOR: ToolDescriptor = ToolDescriptor {
        name: Self::NAME,
        description: Self::DESCRIPTION,
        whitelist: &["protocol"],
        upstream: Upstream::ProtocolAnalytics,
        url: UrlStrategy::PathSegment {
            prefix: "/tvl/",
            key: "protocol",
        },
        subject: "protocols tvl",
        input_schema: Self::input_schema,
    };

    fn input_schema() -> Arc<JsonObject> {
        schema_for_type::<ProtocolTvlParams>().into()
    }
}
