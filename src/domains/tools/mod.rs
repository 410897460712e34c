//! Tools domain module.
//!
//! This module handles all tool-related functionality for the MCP server.
//! Every tool proxies a single GET request to one of three upstream APIs.
//!
//! ## Architecture
//!
//! - `definitions/` - Per-tool descriptors and schema structs (one file per tool)
//! - `registry.rs` - The static, ordered tool catalogue
//! - `arguments.rs` - Whitelist projection of call arguments
//! - `request.rs` - Upstream URL construction
//! - `client.rs` - Per-upstream HTTP client
//! - `response.rs` - Conversion of upstream outcomes into content
//! - `dispatcher.rs` - Glues the above together for one call
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` with a params struct and a `DESCRIPTOR`
//! 2. Export it in the family's `mod.rs`
//! 3. Add the descriptor to the catalogue in `registry.rs`
//!
//! Neither the dispatcher nor the server need to change.

pub mod arguments;
pub mod client;
pub mod definitions;
pub mod descriptor;
pub mod dispatcher;
mod error;
pub mod registry;
pub mod request;
pub mod response;

pub use arguments::FilteredArguments;
pub use client::{UpstreamClient, UpstreamFailure};
pub use descriptor::{ToolDescriptor, Upstream, UrlStrategy};
pub use dispatcher::Dispatcher;
pub use error::ToolError;
pub use registry::ToolRegistry;
pub use request::RequestBuilder;
pub use response::ResponseWrapper;
