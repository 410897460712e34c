//! Tool Registry - the static catalogue of every tool.
//!
//! This module provides:
//! - The ordered list of tool descriptors
//! - Name lookup used by the dispatcher
//! - Tool metadata for discovery

use rmcp::model::Tool;

use super::definitions::{
    AprTool, CoinInfoTool, CoinQuotesTool, ListingCoinsTool, ListingProtocolsTool,
    ProtocolTvlTool,
};
use super::descriptor::ToolDescriptor;

/// Every tool, in discovery order.
static CATALOGUE: [ToolDescriptor; 6] = [
    ListingCoinsTool::DESCRIPTOR,
    CoinInfoTool::DESCRIPTOR,
    CoinQuotesTool::DESCRIPTOR,
    ListingProtocolsTool::DESCRIPTOR,
    ProtocolTvlTool::DESCRIPTOR,
    AprTool::DESCRIPTOR,
];

/// Tool registry - read-only access to the catalogue.
pub struct ToolRegistry;

impl ToolRegistry {
    /// All descriptors in a stable order.
    pub fn list_tools() -> &'static [ToolDescriptor] {
        &CATALOGUE
    }

    /// Find a descriptor by tool name.
    pub fn lookup(name: &str) -> Option<&'static ToolDescriptor> {
        CATALOGUE.iter().find(|descriptor| descriptor.name == name)
    }

    /// Get all tool names.
    pub fn tool_names() -> Vec<&'static str> {
        CATALOGUE.iter().map(|descriptor| descriptor.name).collect()
    }

    /// Get all tools as Tool models (metadata).
    ///
    /// This is the single source of truth for all available tools.
    /// Both HTTP and STDIO/TCP transports use this to get tool metadata.
    pub fn get_all_tools() -> Vec<Tool> {
        CATALOGUE.iter().map(ToolDescriptor::to_tool).collect()
    }
}
