//! CoinMarketCap coin metadata tool.

use std::sync::Arc;

use rmcp::{handler::server::tool::schema_for_type, model::JsonObject};
use schemars::JsonSchema;
use serde::Deserialize;

use crate::domains::tools::descriptor::{ToolDescriptor, Upstream, UrlStrategy};

/// Parameters for the coin info tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CoinInfoParams {
    #[schemars(description = "One or more comma-separated CoinMarketCap cryptocurrency IDs. Example: \"1,2\"")]
    pub id: Option<String>,

    #[schemars(description = "Alternatively pass a comma-separated list of cryptocurrency slugs. Example: \"bitcoin,ethereum\"")]
    pub slug: Option<String>,

    #[schemars(description = "Alternatively pass one or more comma-separated cryptocurrency symbols. Example: \"BTC,ETH\"")]
    pub symbol: Option<String>,

    #[schemars(description = "Alternatively pass in a contract address. Example: \"0xc40af1e4fecfa05ce6bab79dcd8b373d2e436c4e\"")]
    pub address: Option<String>,

    #[schemars(description = "Pass true to relax request validation rules. When requesting records on multiple cryptocurrencies an error is returned if any invalid cryptocurrencies are requested. If set to true, invalid lookups will be skipped allowing valid cryptocurrencies to still be returned.")]
    pub skip_invalid: Option<bool>,

    #[schemars(description = "Optionally specify a comma-separated list of supplemental data fields to return. Pass urls,logo,description,tags,platform,date_added,notice,status to include all auxiliary fields.")]
    pub aux: Option<String>,
}

/// CoinMarketCap "cryptocurrency/info" tool.
#[derive(Debug, Clone)]
pub struct CoinInfoTool;

impl CoinInfoTool {
    pub const NAME: &'static str = "get-coin-info";

    pub const DESCRIPTION: &'static str = "Get coins' information includes details like logo, description, official website URL, social links, and links to a cryptocurrency's technical documentation.";

    pub const KEYS: &'static [&'static str] =
        &["id", "slug", "symbol", "address", "skip_invalid", "aux"];

    pub const DESCRIPTOR: ToolDescriptor = ToolDescriptor {
        name: Self::NAME,
        description: Self::DESCRIPTION,
        whitelist: Self::KEYS,
        upstream: Upstream::MarketData,
        url: UrlStrategy::Query {
            path: "/v2/cryptocurrency/info",
        },
        subject: "coin info",
        input_schema: Self::input_schema,
    };

    fn input_schema() -> Arc<JsonObject> {
        schema_for_type::<CoinInfoParams>().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::schema_properties;

    #[test]
    fn test_schema_matches_whitelist() {
        let mut properties = schema_properties(&CoinInfoTool::DESCRIPTOR);
        let mut keys: Vec<String> = CoinInfoTool::KEYS.iter().map(|k| k.to_string()).collect();
        properties.sort();
        keys.sort();
        assert_eq!(properties, keys);
    }
}
