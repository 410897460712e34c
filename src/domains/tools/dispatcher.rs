//! Tool call dispatch.
//!
//! The dispatcher is the only entry point transports use to run a tool:
//! registry lookup, argument projection, URL construction, upstream call and
//! response wrapping all happen in [`Dispatcher::call`].

use rmcp::model::{Content, JsonObject};
use tracing::{debug, info, instrument, warn};

use super::arguments::FilteredArguments;
use super::client::{UpstreamClient, UpstreamFailure};
use super::descriptor::{ToolDescriptor, Upstream};
use super::error::ToolError;
use super::registry::ToolRegistry;
use super::request::RequestBuilder;
use super::response::ResponseWrapper;
use crate::core::config::Config;

/// Routes tool calls to their upstream.
///
/// Holds only immutable client settings, so a single instance can serve any
/// number of concurrent calls.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    market_data: UpstreamClient,
    protocol_analytics: UpstreamClient,
    staking_yield: UpstreamClient,
}

impl Dispatcher {
    /// Create a dispatcher with one client per upstream family.
    pub fn new(config: &Config) -> Self {
        Self {
            market_data: UpstreamClient::for_upstream(Upstream::MarketData, config),
            protocol_analytics: UpstreamClient::for_upstream(Upstream::ProtocolAnalytics, config),
            staking_yield: UpstreamClient::for_upstream(Upstream::StakingYield, config),
        }
    }

    /// Client for an upstream family.
    pub fn client(&self, upstream: Upstream) -> &UpstreamClient {
        match upstream {
            Upstream::MarketData => &self.market_data,
            Upstream::ProtocolAnalytics => &self.protocol_analytics,
            Upstream::StakingYield => &self.staking_yield,
        }
    }

    /// Build the upstream URL a call would hit, without sending anything.
    pub fn url_for(
        &self,
        name: &str,
        arguments: Option<&JsonObject>,
    ) -> Result<String, ToolError> {
        let descriptor = ToolRegistry::lookup(name).ok_or_else(|| ToolError::unsupported(name))?;
        self.build_url(descriptor, arguments)
            .map_err(|e| ToolError::InvalidRequest(e.to_string()))
    }

    /// Run a tool.
    ///
    /// Unknown names fail with [`ToolError::UnsupportedOperation`] before any
    /// network activity. Every other call yields exactly one text item: the
    /// upstream payload, or the tool's fixed failure message.
    #[instrument(skip(self, arguments), fields(upstream))]
    pub async fn call(
        &self,
        name: &str,
        arguments: Option<&JsonObject>,
    ) -> Result<Vec<Content>, ToolError> {
        let descriptor = match ToolRegistry::lookup(name) {
            Some(descriptor) => descriptor,
            None => {
                warn!("Unknown tool requested: {}", name);
                return Err(ToolError::unsupported(name));
            }
        };
        tracing::Span::current().record("upstream", descriptor.upstream.label());

        let outcome = match self.build_url(descriptor, arguments) {
            Ok(url) => {
                debug!("Calling upstream: {}", url);
                self.client(descriptor.upstream).get(&url).await
            }
            Err(failure) => Err(failure),
        };

        info!("Tool {} completed (data: {})", name, outcome.is_ok());
        Ok(ResponseWrapper::wrap(descriptor, outcome))
    }

    fn build_url(
        &self,
        descriptor: &ToolDescriptor,
        arguments: Option<&JsonObject>,
    ) -> Result<String, UpstreamFailure> {
        let filtered = FilteredArguments::project(descriptor, arguments);
        let base_url = self.client(descriptor.upstream).base_url();

        RequestBuilder::build(base_url, &descriptor.url, &filtered)
            .map_err(|e| UpstreamFailure::InvalidRequest(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::Method::GET;
    use httpmock::MockServer;
    use rmcp::model::RawContent;
    use serde_json::{Value, json};
    use std::time::Duration;

    fn config_for(server: &MockServer) -> Config {
        let mut config = Config::default();
        config.upstreams.market_data_url = server.base_url();
        config.upstreams.protocol_analytics_url = server.base_url();
        config.upstreams.staking_yield_url = server.base_url();
        config.upstreams.timeout_ms = 500;
        config.credentials.cmc_api_key = Some("cmc-test-key".to_string());
        config.credentials.expand_api_key = Some("expand-test-key".to_string());
        config
    }

    fn args(value: Value) -> JsonObject {
        serde_json::from_value(value).unwrap()
    }

    fn single_text(content: Vec<Content>) -> String {
        assert_eq!(content.len(), 1, "expected exactly one content item");
        match &content[0].raw {
            RawContent::Text(text) => text.text.clone(),
            other => panic!("expected text content, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn listing_coins_returns_serialized_payload() {
        let server = MockServer::start();
        let body = json!({ "data": [{ "id": 1, "symbol": "BTC" }], "status": { "error_code": 0 } });
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/v1/cryptocurrency/listings/latest")
                .query_param("limit", "5");
            then.status(200).json_body(body.clone());
        });

        let dispatcher = Dispatcher::new(&config_for(&server));
        let content = dispatcher
            .call("listing-coins", Some(&args(json!({ "limit": 5 }))))
            .await
            .expect("listing-coins is registered");

        mock.assert();
        let text = single_text(content);
        assert_eq!(serde_json::from_str::<Value>(&text).unwrap(), body);
    }

    #[tokio::test]
    async fn protocol_tvl_hits_path_segment() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/tvl/aave").header("accept", "*/*");
            then.status(200).body("12345678.9");
        });

        let dispatcher = Dispatcher::new(&config_for(&server));
        let content = dispatcher
            .call("get-protocol-tvl", Some(&args(json!({ "protocol": "aave" }))))
            .await
            .unwrap();

        mock.assert();
        assert_eq!(single_text(content), "12345678.9");
    }

    #[tokio::test]
    async fn apr_hits_fixed_query() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/liquidstaking/getapr")
                .query_param("liquidStakingId", "123");
            then.status(200).json_body(json!({ "status": 200, "data": { "apr": "3.52" } }));
        });

        let dispatcher = Dispatcher::new(&config_for(&server));
        let content = dispatcher
            .call("get-apr", Some(&args(json!({ "liquidStakingId": "123" }))))
            .await
            .unwrap();

        mock.assert();
        assert!(single_text(content).contains("3.52"));
    }

    #[tokio::test]
    async fn unknown_tool_is_unsupported_and_makes_no_request() {
        let server = MockServer::start();
        let catch_all = server.mock(|when, then| {
            when.method(GET);
            then.status(200).json_body(json!({ "unexpected": true }));
        });

        let dispatcher = Dispatcher::new(&config_for(&server));
        let result = dispatcher.call("foo", Some(&args(json!({ "limit": 1 })))).await;

        assert!(matches!(result, Err(ToolError::UnsupportedOperation(ref name)) if name == "foo"));
        catch_all.assert_hits(0);
    }

    #[tokio::test]
    async fn failed_quotes_call_yields_fixed_message() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/v2/cryptocurrency/quotes/latest")
                .query_param("symbol", "BTC");
            then.status(500);
        });

        let dispatcher = Dispatcher::new(&config_for(&server));
        let arguments = args(json!({ "symbol": "BTC", "bogus": "x" }));

        let url = dispatcher
            .url_for("get-coin-quotes", Some(&arguments))
            .unwrap();
        assert!(!url.contains("bogus"));

        let content = dispatcher
            .call("get-coin-quotes", Some(&arguments))
            .await
            .unwrap();

        mock.assert();
        assert_eq!(single_text(content), "Failed to retrieve coin quotes data");
    }

    #[tokio::test]
    async fn server_error_timeout_and_network_failure_look_identical() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/tvl/broken");
            then.status(502);
        });
        server.mock(|when, then| {
            when.method(GET).path("/tvl/slow");
            then.status(200)
                .delay(Duration::from_secs(3))
                .json_body(json!(1));
        });

        let dispatcher = Dispatcher::new(&config_for(&server));
        let mut offline = config_for(&server);
        offline.upstreams.protocol_analytics_url = "http://127.0.0.1:1".to_string();
        let offline = Dispatcher::new(&offline);

        let broken = dispatcher
            .call("get-protocol-tvl", Some(&args(json!({ "protocol": "broken" }))))
            .await
            .unwrap();
        let slow = dispatcher
            .call("get-protocol-tvl", Some(&args(json!({ "protocol": "slow" }))))
            .await
            .unwrap();
        let unreachable = offline
            .call("get-protocol-tvl", Some(&args(json!({ "protocol": "aave" }))))
            .await
            .unwrap();

        let expected = "Failed to retrieve protocols tvl data";
        assert_eq!(single_text(broken), expected);
        assert_eq!(single_text(slow), expected);
        assert_eq!(single_text(unreachable), expected);
    }

    #[tokio::test]
    async fn listing_protocols_ignores_arguments() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/protocols");
            then.status(200)
                .json_body(json!([{ "name": "Aave", "slug": "aave", "tvl": 1.0 }]));
        });

        let dispatcher = Dispatcher::new(&config_for(&server));
        let arguments = args(json!({ "id": "7", "chain": "Ethereum", "chains": ["a"] }));

        let url = dispatcher
            .url_for("listing-protocols", Some(&arguments))
            .unwrap();
        assert_eq!(url, format!("{}/protocols", server.base_url()));

        let content = dispatcher
            .call("listing-protocols", Some(&arguments))
            .await
            .unwrap();

        mock.assert();
        assert!(single_text(content).contains("\"slug\":\"aave\""));
    }

    #[tokio::test]
    async fn missing_required_field_is_still_forwarded() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/liquidstaking/getapr");
            then.status(400).json_body(json!({ "error": "liquidStakingId required" }));
        });

        let dispatcher = Dispatcher::new(&config_for(&server));
        let content = dispatcher.call("get-apr", None).await.unwrap();

        mock.assert();
        assert_eq!(single_text(content), "Failed to retrieve protocols APR data");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_calls_do_not_share_arguments() {
        let server = MockServer::start();
        let mocks: Vec<_> = (1..=8)
            .map(|limit| {
                server.mock(|when, then| {
                    when.method(GET)
                        .path("/v1/cryptocurrency/listings/latest")
                        .query_param("limit", limit.to_string().as_str());
                    then.status(200).json_body(json!({ "limit": limit }));
                })
            })
            .collect();

        let dispatcher = Dispatcher::new(&config_for(&server));
        let calls = (1..=8).map(|limit| {
            let dispatcher = dispatcher.clone();
            tokio::spawn(async move {
                let arguments = args(json!({ "limit": limit }));
                let content = dispatcher.call("listing-coins", Some(&arguments)).await;
                (limit, content)
            })
        });

        for handle in futures::future::join_all(calls).await {
            let (limit, content) = handle.expect("task should not panic");
            let payload: Value = serde_json::from_str(&single_text(content.unwrap())).unwrap();
            assert_eq!(payload, json!({ "limit": limit }));
        }

        for mock in mocks {
            mock.assert_hits(1);
        }
    }

    #[test]
    fn test_url_for_unknown_tool() {
        let dispatcher = Dispatcher::new(&Config::default());
        assert!(matches!(
            dispatcher.url_for("get-protocols", None),
            Err(ToolError::UnsupportedOperation(_))
        ));
    }

    #[test]
    fn test_url_for_uses_configured_base() {
        let dispatcher = Dispatcher::new(&Config::default());
        let url = dispatcher
            .url_for("get-apr", Some(&args(json!({ "liquidStakingId": "123" }))))
            .unwrap();
        assert_eq!(
            url,
            "https://api.expand.network/liquidstaking/getapr?liquidStakingId=123"
        );
    }
}
