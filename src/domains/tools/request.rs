//! Upstream URL construction.

use serde_json::Value;

use super::arguments::FilteredArguments;
use super::descriptor::UrlStrategy;

/// Error raised when query pairs cannot be form-encoded.
#[derive(Debug, thiserror::Error)]
#[error("Failed to encode query string: {0}")]
pub struct RequestError(#[from] serde_urlencoded::ser::Error);

/// Builds upstream URLs from a descriptor's strategy and filtered arguments.
///
/// The output depends only on its inputs; the same base, strategy and
/// arguments always produce the same string.
pub struct RequestBuilder;

impl RequestBuilder {
    /// Build the full URL for a request against `base_url`.
    pub fn build(
        base_url: &str,
        strategy: &UrlStrategy,
        arguments: &FilteredArguments,
    ) -> Result<String, RequestError> {
        let base = base_url.trim_end_matches('/');

        let url = match *strategy {
            UrlStrategy::Fixed { path } => format!("{base}{path}"),
            UrlStrategy::Query { path } => {
                let pairs: Vec<(&str, String)> = arguments
                    .iter()
                    .map(|(key, value)| (key, render_value(value)))
                    .collect();
                let query = serde_urlencoded::to_string(&pairs)?;
                if query.is_empty() {
                    format!("{base}{path}")
                } else {
                    format!("{base}{path}?{query}")
                }
            }
            UrlStrategy::PathSegment { prefix, key } => {
                let segment = arguments.get(key).map(render_value).unwrap_or_default();
                format!("{base}{prefix}{}", urlencoding::encode(&segment))
            }
            UrlStrategy::SingleQuery { path, key } => {
                let value = arguments.get(key).map(render_value).unwrap_or_default();
                let query = serde_urlencoded::to_string([(key, value)])?;
                format!("{base}{path}?{query}")
            }
        };

        Ok(url)
    }
}

/// Render a JSON value the way it is sent upstream.
///
/// Strings go out without quotes; composite values go out as compact JSON.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
