//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating tool calls to the [`Dispatcher`].
//!
//! ## Tool Architecture
//!
//! Tools are described in `domains/tools/definitions/`, one file per tool,
//! and collected in a fixed order by the `ToolRegistry`. The handler below
//! never inspects tool names itself: listing reads the registry and calls go
//! through `Dispatcher::call`, which is shared by every transport.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    model::*,
    service::RequestContext,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, instrument};

use super::config::Config;
use super::error::Result;
use crate::domains::tools::{Dispatcher, ResponseWrapper, ToolError, ToolRegistry};

/// Instructions reported to clients during initialization.
pub const SERVER_INSTRUCTIONS: &str = "Cryptocurrency market data server. Use listing-coins, \
     get-coin-info and get-coin-quotes for CoinMarketCap data, listing-protocols and \
     get-protocol-tvl for DefiLlama protocol data, and get-apr for liquid staking APR \
     from Expand Network.";

/// The main MCP server handler.
///
/// Cloning is cheap; clones share the configuration and dispatcher.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Routes tool calls to their upstream.
    dispatcher: Arc<Dispatcher>,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    pub fn new(config: Config) -> Self {
        let dispatcher = Arc::new(Dispatcher::new(&config));

        Self {
            config: Arc::new(config),
            dispatcher,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Get the tool dispatcher.
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools in registry order (for HTTP transport).
    pub fn list_tools(&self) -> Vec<Value> {
        ToolRegistry::get_all_tools()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Call a tool by name (for HTTP transport).
    ///
    /// `arguments` may be `null` or an object. The result is the serialized
    /// MCP tool result, upstream failures included.
    pub async fn call_tool(&self, name: &str, arguments: Value) -> Result<Value> {
        let arguments = match arguments {
            Value::Object(map) => Some(map),
            Value::Null => None,
            _ => {
                return Err(
                    ToolError::InvalidRequest("arguments must be a JSON object".to_string()).into(),
                );
            }
        };

        let content = self.dispatcher.call(name, arguments.as_ref()).await?;
        let result = ResponseWrapper::into_result(content);

        Ok(serde_json::to_value(result)?)
    }
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: self.config.server.name.clone(),
                version: self.config.server.version.clone(),
                ..Implementation::from_build_env()
            },
            instructions: Some(SERVER_INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        info!("Listing tools");
        Ok(ListToolsResult {
            tools: ToolRegistry::get_all_tools(),
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, request, _context), fields(tool = %request.name))]
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        info!("Calling tool: {}", request.name);
        let content = self
            .dispatcher
            .call(&request.name, request.arguments.as_ref())
            .await?;
        Ok(ResponseWrapper::into_result(content))
    }
}
