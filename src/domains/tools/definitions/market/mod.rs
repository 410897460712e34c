//! CoinMarketCap tools.
//!
//! All three tools forward their whitelisted arguments as a query string and
//! authenticate with the `X-CMC_PRO_API_KEY` header:
//! - `listing`: latest listings with market data
//! - `info`: static coin metadata
//! - `quotes`: latest market quotes

pub mod info;
pub mod listing;
pub mod quotes;

pub use info::{CoinInfoParams, CoinInfoTool};
pub use listing::{ListingCoinsParams, ListingCoinsTool};
pub use quotes::{CoinQuotesParams, CoinQuotesTool};
