//! Conversion of upstream outcomes into MCP content.

use rmcp::model::{CallToolResult, Content};
use serde_json::Value;
use tracing::warn;

use super::client::UpstreamFailure;
use super::descriptor::ToolDescriptor;

/// Wraps upstream outcomes into the single text item returned per call.
pub struct ResponseWrapper;

impl ResponseWrapper {
    /// Serialize the full upstream payload, untouched.
    ///
    /// Falls back to the failure message if the payload cannot be
    /// serialized, so a call still yields exactly one item.
    pub fn success(descriptor: &ToolDescriptor, payload: &Value) -> Vec<Content> {
        match serde_json::to_string(payload) {
            Ok(text) => vec![Content::text(text)],
            Err(e) => {
                warn!("Failed to serialize {} payload: {}", descriptor.name, e);
                Self::no_data(descriptor)
            }
        }
    }

    /// The fixed "no data" message for a tool.
    pub fn no_data(descriptor: &ToolDescriptor) -> Vec<Content> {
        vec![Content::text(descriptor.failure_message())]
    }

    /// Collapse an upstream outcome into content.
    ///
    /// The failure reason is logged and then discarded.
    pub fn wrap(
        descriptor: &ToolDescriptor,
        outcome: Result<Value, UpstreamFailure>,
    ) -> Vec<Content> {
        match outcome {
            Ok(payload) => Self::success(descriptor, &payload),
            Err(failure) => {
                warn!(
                    tool = descriptor.name,
                    upstream = %descriptor.upstream,
                    "Upstream call failed: {}",
                    failure
                );
                Self::no_data(descriptor)
            }
        }
    }

    /// Build a tool result from wrapped content.
    ///
    /// Upstream failures are ordinary content, so the result is never
    /// flagged as an error.
    pub fn into_result(content: Vec<Content>) -> CallToolResult {
        CallToolResult::success(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::registry::ToolRegistry;
    use rmcp::model::RawContent;
    use serde_json::json;

    fn text_of(content: &[Content]) -> &str {
        assert_eq!(content.len(), 1);
        match &content[0].raw {
            RawContent::Text(text) => &text.text,
            other => panic!("expected text content, got {other:?}"),
        }
    }

    #[test]
    fn test_success_keeps_full_payload() {
        let descriptor = ToolRegistry::lookup("get-coin-info").unwrap();
        let payload = json!({ "status": { "error_code": 0 }, "data": { "1": { "slug": "bitcoin" } } });

        let content = ResponseWrapper::wrap(descriptor, Ok(payload.clone()));
        let round_trip: Value = serde_json::from_str(text_of(&content)).unwrap();

        assert_eq!(round_trip, payload);
    }

    #[test]
    fn test_every_failure_reason_gives_same_message() {
        let descriptor = ToolRegistry::lookup("get-coin-quotes").unwrap();
        let failures = vec![
            UpstreamFailure::Status(500),
            UpstreamFailure::Timeout,
            UpstreamFailure::Network("refused".to_string()),
            UpstreamFailure::Body("eof".to_string()),
            UpstreamFailure::Empty,
        ];

        for failure in failures {
            let content = ResponseWrapper::wrap(descriptor, Err(failure));
            assert_eq!(text_of(&content), "Failed to retrieve coin quotes data");
        }
    }

    #[test]
    fn test_failure_messages_per_tool() {
        let expected = [
            ("listing-coins", "Failed to retrieve listing data"),
            ("get-coin-info", "Failed to retrieve coin info data"),
            ("get-coin-quotes", "Failed to retrieve coin quotes data"),
            ("listing-protocols", "Failed to retrieve protocols data"),
            ("get-protocol-tvl", "Failed to retrieve protocols tvl data"),
            ("get-apr", "Failed to retrieve protocols APR data"),
        ];

        for (tool, message) in expected {
            let descriptor = ToolRegistry::lookup(tool).unwrap();
            assert_eq!(text_of(&ResponseWrapper::no_data(descriptor)), message);
        }
    }

    #[test]
    fn test_result_is_not_flagged_as_error() {
        let descriptor = ToolRegistry::lookup("get-apr").unwrap();
        let result = ResponseWrapper::into_result(ResponseWrapper::no_data(descriptor));
        assert_eq!(result.is_error, Some(false));
    }
}
