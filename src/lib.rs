//! Coin API MCP Server Library
//!
//! This crate exposes CoinMarketCap, DefiLlama and Expand Network endpoints as
//! Model Context Protocol (MCP) tools. Every tool call becomes exactly one
//! upstream GET request whose JSON body is returned to the client as text.
//!
//! # Architecture
//!
//! - **core**: Configuration, error handling, the MCP server handler and transports
//! - **domains**: Business logic organized by bounded contexts
//!   - **tools**: Tool catalogue, argument filtering, request building and upstream calls
//!
//! # Example
//!
//! ```rust,no_run
//! use coin_api_mcp::{core::McpServer, core::Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     config.validate()?;
//!     let server = McpServer::new(config);
//!     // Start the server...
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
