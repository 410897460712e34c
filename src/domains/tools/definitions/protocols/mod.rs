//! DefiLlama tools.
//!
//! No credentials are needed; requests only send `accept: */*`.

pub mod listing;
pub mod tvl;

pub use listing::{ListingProtocolsTool, ProtocolEntry};
pub use tvl::{ProtocolTvlParams, ProtocolTvlTool};
