//! CoinMarketCap latest listings tool.

use std::sync::Arc;

use rmcp::{handler::server::tool::schema_for_type, model::JsonObject};
use schemars::JsonSchema;
use serde::Deserialize;

use crate::domains::tools::descriptor::{ToolDescriptor, Upstream, UrlStrategy};

/// Field the listing is sorted by.
#[derive(Debug, Clone, Copy, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    MarketCap,
    Name,
    Symbol,
    DateAdded,
    MarketCapStrict,
    Price,
    CirculatingSupply,
    TotalSupply,
    MaxSupply,
    NumMarketPairs,
    #[serde(rename = "volume_24h")]
    Volume24h,
    #[serde(rename = "percent_change_1h")]
    PercentChange1h,
    #[serde(rename = "percent_change_24h")]
    PercentChange24h,
    #[serde(rename = "percent_change_7d")]
    PercentChange7d,
    MarketCapByTotalSupplyStrict,
    #[serde(rename = "volume_7d")]
    Volume7d,
    #[serde(rename = "volume_30d")]
    Volume30d,
}

#[derive(Debug, Clone, Copy, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum CryptocurrencyType {
    All,
    Coins,
    Tokens,
}

#[derive(Debug, Clone, Copy, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ListingTag {
    All,
    Defi,
    Filesharing,
}

/// Parameters for the listing tool.
///
/// Only used to publish the input schema; arguments are forwarded as sent.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListingCoinsParams {
    /// Optionally offset the start (1-based index) of the paginated list of items to return.
    #[schemars(range(min = 1))]
    pub start: Option<u64>,

    /// Optionally specify the number of results to return.
    #[schemars(range(min = 1, max = 5000))]
    pub limit: Option<u64>,

    /// Optionally specify a threshold of minimum USD price to filter results by.
    #[schemars(range(min = 0))]
    pub price_min: Option<f64>,

    /// Optionally specify a threshold of maximum USD price to filter results by.
    #[schemars(range(min = 0))]
    pub price_max: Option<f64>,

    /// Optionally specify a threshold of minimum market cap to filter results by.
    #[schemars(range(min = 0))]
    pub market_cap_min: Option<f64>,

    /// Optionally specify a threshold of maximum market cap to filter results by.
    #[schemars(range(min = 0))]
    pub market_cap_max: Option<f64>,

    /// Optionally specify a threshold of minimum 24 hour USD volume to filter results by.
    #[schemars(range(min = 0))]
    pub volume_24h_min: Option<f64>,

    /// Optionally specify a threshold of maximum 24 hour USD volume to filter results by.
    #[schemars(range(min = 0))]
    pub volume_24h_max: Option<f64>,

    /// Optionally specify a threshold of minimum circulating supply to filter results by.
    #[schemars(range(min = 0))]
    pub circulating_supply_min: Option<f64>,

    /// Optionally specify a threshold of maximum circulating supply to filter results by.
    #[schemars(range(min = 0))]
    pub circulating_supply_max: Option<f64>,

    /// Optionally specify a threshold of minimum 24 hour percent change to filter results by.
    #[schemars(range(min = -100))]
    pub percent_change_24h_min: Option<f64>,

    /// Optionally specify a threshold of maximum 24 hour percent change to filter results by.
    #[schemars(range(min = -100))]
    pub percent_change_24h_max: Option<f64>,

    /// Optionally calculate market quotes in up to 120 currencies at once by passing a
    /// comma-separated list of cryptocurrency or fiat currency symbols.
    pub convert: Option<String>,

    /// Optionally calculate market quotes by CoinMarketCap ID instead of symbol.
    pub convert_id: Option<String>,

    /// What field to sort the list of cryptocurrencies by.
    pub sort: Option<SortField>,

    /// The direction in which to order cryptocurrencies against the specified sort.
    pub sort_dir: Option<SortDirection>,

    /// The type of cryptocurrency to include.
    pub cryptocurrency_type: Option<CryptocurrencyType>,

    /// The tag of cryptocurrency to include.
    pub tag: Option<ListingTag>,

    /// Optionally specify a comma-separated list of supplemental data fields to return.
    pub aux: Option<String>,
}

/// CoinMarketCap "listings/latest" tool.
#[derive(Debug, Clone)]
pub struct ListingCoinsTool;

impl ListingCoinsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "listing-coins";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Returns a paginated list of all active cryptocurrencies with latest market data";

    /// Argument keys forwarded to CoinMarketCap.
    pub const KEYS: &'static [&'static str] = &[
        "start",
        "limit",
        "price_min",
        "price_max",
        "market_cap_min",
        "market_cap_max",
        "volume_24h_min",
        "volume_24h_max",
        "circulating_supply_min",
        "circulating_supply_max",
        "percent_change_24h_min",
        "percent_change_24h_max",
        "convert",
        "convert_id",
        "sort",
        "sort_dir",
        "cryptocurrency_type",
        "tag",
        "aux",
    ];

    pub const DESCRIPTOR: ToolDescriptor = ToolDescriptor {
        name: Self::NAME,
        description: Self::DESCRIPTION,
        whitelist: Self::KEYS,
        upstream: Upstream::MarketData,
        url: UrlStrategy::Query {
            path: "/v1/cryptocurrency/listings/latest",
        },
        subject: "listing",
        input_schema: Self::input_schema,
    };

    fn input_schema() -> Arc<JsonObject> {
        schema_for_type::<ListingCoinsParams>().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::schema_properties;

    #[test]
    fn test_schema_matches_whitelist() {
        let properties = schema_properties(&ListingCoinsTool::DESCRIPTOR);
        assert_eq!(properties.len(), ListingCoinsTool::KEYS.len());
        for key in ListingCoinsTool::KEYS {
            assert!(properties.contains(&key.to_string()), "missing {key}");
        }
    }

    #[test]
    fn test_percent_change_bounded_below() {
        let schema = (ListingCoinsTool::DESCRIPTOR.input_schema)();
        let properties = &schema["properties"];
        for key in ["percent_change_24h_min", "percent_change_24h_max"] {
            assert_eq!(properties[key]["minimum"].as_f64(), Some(-100.0), "{key}");
        }
        assert_eq!(properties["limit"]["maximum"].as_f64(), Some(5000.0));
    }

    #[test]
    fn test_sort_field_names() {
        let sort: SortField = serde_json::from_str(r#""percent_change_24h""#).unwrap();
        assert!(matches!(sort, SortField::PercentChange24h));
        let sort: SortField = serde_json::from_str(r#""market_cap_by_total_supply_strict""#).unwrap();
        assert!(matches!(sort, SortField::MarketCapByTotalSupplyStrict));
    }

    #[test]
    fn test_nothing_is_required() {
        let params: ListingCoinsParams = serde_json::from_str("{}").unwrap();
        assert!(params.limit.is_none());
    }
}
