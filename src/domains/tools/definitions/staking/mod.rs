//! Expand Network tools, authenticated with the `X-API-Key` header.

pub mod apr;

pub use apr::{AprParams, AprTool};
