//! Tool-specific error types.

use rmcp::ErrorData as McpError;
use thiserror::Error;

/// Errors that can occur during tool operations.
///
/// Upstream failures are not represented here: they are reported to the
/// caller as text content, never as protocol errors.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool is not part of the catalogue.
    #[error("Unknown tool: {0}")]
    UnsupportedOperation(String),

    /// The upstream request could not be constructed.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ToolError {
    /// Create a new "unsupported operation" error.
    pub fn unsupported(name: impl Into<String>) -> Self {
        Self::UnsupportedOperation(name.into())
    }
}

impl From<ToolError> for McpError {
    fn from(err: ToolError) -> Self {
        McpError::invalid_params(err.to_string(), None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_maps_to_invalid_params() {
        let err: McpError = ToolError::unsupported("foo").into();
        assert_eq!(err.code, rmcp::model::ErrorCode::INVALID_PARAMS);
        assert_eq!(err.message, "Unknown tool: foo");
    }
}
