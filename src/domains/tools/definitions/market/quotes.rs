//! CoinMarketCap latest quotes tool.

use std::sync::Arc;

use rmcp::{handler::server::tool::schema_for_type, model::JsonObject};
use schemars::JsonSchema;
use serde::Deserialize;

use crate::domains::tools::descriptor::{ToolDescriptor, Upstream, UrlStrategy};

/// Parameters for the coin quotes tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CoinQuotesParams {
    /// One or more comma-separated cryptocurrency CoinMarketCap IDs. Example: 1,2
    pub id: Option<String>,

    /// Alternatively pass a comma-separated list of cryptocurrency slugs. Example: "bitcoin,ethereum"
    pub slug: Option<String>,

    /// Alternatively pass one or more comma-separated cryptocurrency symbols. Example: "BTC,ETH"
    pub symbol: Option<String>,

    /// Optionally calculate market quotes in up to 120 currencies at once by passing a
    /// comma-separated list of cryptocurrency or fiat currency symbols.
    pub convert: Option<String>,

    /// Optionally calculate market quotes by CoinMarketCap ID instead of symbol.
    /// This option is identical to convert outside of ID format.
    pub convert_id: Option<String>,

    /// Optionally specify a comma-separated list of supplemental data fields to return:
    /// num_market_pairs,cmc_rank,date_added,tags,platform,max_supply,circulating_supply,
    /// total_supply,is_active,is_fiat
    pub aux: Option<String>,

    /// Pass true to relax request validation rules.
    pub skip_invalid: Option<bool>,
}

/// CoinMarketCap "quotes/latest" tool.
#[derive(Debug, Clone)]
pub struct CoinQuotesTool;

impl CoinQuotesTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get-coin-quotes";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "the latest market quote for 1 or more cryptocurrencies. Use the \"convert\" option to return market values in multiple fiat and cryptocurrency conversions in the same call.";

    /// Argument keys forwarded to CoinMarketCap.
    pub const KEYS: &'static [&'static str] = &[
        "id",
        "slug",
        "symbol",
        "convert",
        "convert_id",
        "aux",
        "skip_invalid",
    ];

    pub const DESCRIPTOR: ToolDescriptor = ToolDescriptor {
        name: Self::NAME,
        description: Self::DESCRIPTION,
        whitelist: Self::KEYS,
        upstream: Upstream::MarketData,
        url: UrlStrategy::Query {
            path: "/v2/cryptocurrency/quotes/latest",
        },
        subject: "coin quotes",
        input_schema: Self::input_schema,
    };

    fn input_schema() -> Arc<JsonObject> {
        schema_for_type::<CoinQuotesParams>().into()
    }
}
