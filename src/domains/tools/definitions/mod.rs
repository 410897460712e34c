//! Tool definitions module.
//!
//! Each tool lives in its own file, grouped by upstream family, and exposes a
//! `DESCRIPTOR` constant plus the parameter struct its input schema is
//! derived from.

pub mod market;
pub mod protocols;
pub mod staking;

pub use market::{
    CoinInfoParams, CoinInfoTool, CoinQuotesParams, CoinQuotesTool, ListingCoinsParams,
    ListingCoinsTool,
};
pub use protocols::{ListingProtocolsTool, ProtocolEntry, ProtocolTvlParams, ProtocolTvlTool};
pub use staking::{AprParams, AprTool};

/// Property names of a descriptor's published input schema.
#[cfg(test)]
pub(crate) fn schema_properties(
    descriptor: &crate::domains::tools::descriptor::ToolDescriptor,
) -> Vec<String> {
    (descriptor.input_schema)()
        .get("properties")
        .and_then(|p| p.as_object())
        .map(|p| p.keys().cloned().collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use crate::domains::tools::registry::ToolRegistry;

    #[test]
    fn test_every_schema_is_an_object_schema() {
        for descriptor in ToolRegistry::list_tools() {
            let schema = (descriptor.input_schema)();
            assert_eq!(schema["type"], "object", "{}", descriptor.name);
        }
    }
}
