//! Expand Network liquid staking APR tool.

use std::sync::Arc;

use rmcp::{handler::server::tool::schema_for_type, model::JsonObject};
use schemars::JsonSchema;
use serde::Deserialize;

use crate::domains::tools::descriptor::{ToolDescriptor, Upstream, UrlStrategy};

/// Parameters for the APR tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AprParams {
    /// ID for liquid staking. This ID is required to get the APR for the protocol
    #[serde(rename = "liquidStakingId")]
    pub liquid_staking_id: String,
}

/// Expand Network "/liquidstaking/getapr" tool.
#[derive(Debug, Clone)]
pub struct AprTool;

impl AprTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get-apr";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Fetches the Annual Percentage Rate for a specific protocol.";

    pub const DESCRIPTOR: ToolDescriptor = ToolDescriptor {
        name: Self::NAME,
        description: Self::DESCRIPTION,
        whitelist: &["liquidStakingId"],
        upstream: Upstream::StakingYield,
        url: UrlStrategy::SingleQuery {
            path: "/liquidstaking/getapr",
            key: "liquidStakingId",
        },
        subject: "protocols APR",
        input_schema: Self::input_schema,
    };

    fn input_schema() -> Arc<JsonObject> {
        schema_for_type::<AprParams>().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_schema_uses_wire_name() {
        let schema = (AprTool::DESCRIPTOR.input_schema)();
        assert_eq!(schema.get("required"), Some(&json!(["liquidStakingId"])));
        assert!(schema["properties"].get("liquidStakingId").is_some());
    }
}
