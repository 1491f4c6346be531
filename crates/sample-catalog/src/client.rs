//! Clients for the Slack Web API.

use std::fmt::Debug;
use std::str::FromStr;
use std::time::Duration;

use enum_dispatch::enum_dispatch;
use reqwest::header::{self, HeaderMap};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

use crate::config::SampleCatalogConfig;
use crate::error::CatalogClientError;
use crate::mock::MockClient;
use crate::types::ApiEnvelope;

// ---------------------------------------------------------------------------
// Client trait
// ---------------------------------------------------------------------------

/// The Web API interface used by the app.
///
/// This trait enables alternate implementations:
/// - **HTTP**: calls to the Web API via [`SlackClient`]
/// - **Mock**: canned responses without HTTP via [`MockClient`]
#[enum_dispatch]
#[allow(async_fn_in_trait)]
pub trait ClientTrait {
    /// Call a Web API method with JSON parameters and return the raw response
    /// envelope.
    ///
    /// Responses with `ok: false` are returned as-is; interpreting them is up
    /// to the caller.
    async fn api_call(&self, method: &str, params: Value) -> Result<Value, CatalogClientError>;
}

/// Either a client for the actual Web API,
/// or a mock client for testing.
#[derive(Debug)]
#[enum_dispatch(ClientTrait)]
pub enum Client {
    Slack(SlackClient),
    Mock(MockClient),
}

/// Initialize a Web API client
///
/// - Initialize a mock client if `mock_data` points to a file of responses
/// - Initialize a real client otherwise
pub fn init_client(config: &SampleCatalogConfig) -> Result<Client, CatalogClientError> {
    if let Some(path) = &config.mock_data {
        debug!(mock_data_path = %path.display(), "using mock client");
        return Ok(MockClient::from_file(path)?.into());
    }

    debug!(api_url = %config.api_url, "using Slack API client");
    Ok(SlackClient::new(config.clone())?.into())
}

/// Call a Web API method and fail unless the response envelope is `ok`.
#[instrument(skip(client, params))]
pub async fn call_method(
    client: &impl ClientTrait,
    method: &str,
    params: &impl Serialize,
) -> Result<Value, CatalogClientError> {
    let params = serde_json::to_value(params).map_err(CatalogClientError::Serialize)?;
    let response = client.api_call(method, params).await?;
    let envelope =
        ApiEnvelope::deserialize(&response).map_err(CatalogClientError::Deserialize)?;

    if !envelope.ok {
        return Err(CatalogClientError::MethodFailed {
            method: method.to_string(),
            code: envelope.error,
        });
    }
    Ok(response)
}

// ---------------------------------------------------------------------------
// HTTP client
// ---------------------------------------------------------------------------

/// A client for the Web API.
pub struct SlackClient {
    client: reqwest::Client,
    config: SampleCatalogConfig,
}

impl Debug for SlackClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlackClient")
            .field("api_url", &self.config.api_url.as_str())
            .finish_non_exhaustive()
    }
}

impl SlackClient {
    /// Create a new client from configuration.
    pub fn new(config: SampleCatalogConfig) -> Result<Self, CatalogClientError> {
        let client = build_http_client(&config)?;
        Ok(Self { client, config })
    }

    /// Get the configured API URL.
    pub fn api_url(&self) -> &Url {
        &self.config.api_url
    }
}

impl ClientTrait for SlackClient {
    #[instrument(skip(self, params))]
    async fn api_call(&self, method: &str, params: Value) -> Result<Value, CatalogClientError> {
        let url = self
            .config
            .api_url
            .join(method)
            .map_err(|source| CatalogClientError::InvalidMethod {
                method: method.to_string(),
                source,
            })?;

        debug!(%url, "sending API request");
        let response = self
            .client
            .post(url)
            .json(&params)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(CatalogClientError::Transport)?;

        let body = response
            .bytes()
            .await
            .map_err(CatalogClientError::Transport)?;
        serde_json::from_slice(&body).map_err(CatalogClientError::Deserialize)
    }
}

/// Build HTTP client with bearer token auth for the Web API.
fn build_http_client(config: &SampleCatalogConfig) -> Result<reqwest::Client, CatalogClientError> {
    let mut headers = HeaderMap::new();

    if let Some(token) = &config.bot_token {
        let mut value = header::HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|e| CatalogClientError::Other(e.to_string()))?;
        value.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, value);
    }

    for (key, value) in &config.extra_headers {
        headers.insert(
            header::HeaderName::from_str(key).map_err(
                |e: reqwest::header::InvalidHeaderName| CatalogClientError::Other(e.to_string()),
            )?,
            header::HeaderValue::from_str(value).map_err(
                |e: reqwest::header::InvalidHeaderValue| CatalogClientError::Other(e.to_string()),
            )?,
        );
    }

    debug!(
        api_url = %config.api_url,
        has_token = config.bot_token.is_some(),
        extra_headers = config.extra_headers.len(),
        "building Slack API HTTP client"
    );

    let client_builder = reqwest::Client::builder()
        .default_headers(headers)
        .connect_timeout(Duration::from_secs(15))
        .timeout(Duration::from_secs(60));

    let client_builder = if let Some(ref user_agent) = config.user_agent {
        client_builder.user_agent(user_agent)
    } else {
        client_builder
    };

    client_builder
        .build()
        .map_err(|e| CatalogClientError::Other(e.to_string()))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;

    fn client_config(url: &str) -> SampleCatalogConfig {
        SampleCatalogConfig::new(Url::parse(&format!("{url}/api/")).unwrap())
    }

    #[tokio::test]
    async fn posts_json_params_to_method_url() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/api/developer.sampleData.get")
                .json_body(json!({ "query": "bolt" }));
            then.status(200).json_body(json!({ "ok": true, "samples": [] }));
        });

        let client = SlackClient::new(client_config(&server.base_url())).unwrap();
        let response = client
            .api_call("developer.sampleData.get", json!({ "query": "bolt" }))
            .await
            .unwrap();

        assert_eq!(response, json!({ "ok": true, "samples": [] }));
        mock.assert();
    }

    #[tokio::test]
    async fn bearer_token_set_on_all_requests() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.header("authorization", "Bearer xoxb-test");
            then.status(200).json_body(json!({ "ok": true }));
        });

        let config = SampleCatalogConfig {
            bot_token: Some("xoxb-test".to_string()),
            ..client_config(&server.base_url())
        };

        let client = SlackClient::new(config).unwrap();
        let _ = client.api_call("auth.test", json!({})).await;
        mock.assert();
    }

    #[tokio::test]
    async fn extra_headers_set_on_all_requests() {
        let mut extra_headers: BTreeMap<String, String> = BTreeMap::new();
        extra_headers.insert("x-sample-test".to_string(), "test-value".to_string());
        extra_headers.insert("x-sample-test2".to_string(), "test-value2".to_string());

        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.header("x-sample-test", "test-value")
                .header("x-sample-test2", "test-value2");
            then.status(200).json_body(json!({ "ok": true }));
        });

        let config = SampleCatalogConfig {
            extra_headers,
            ..client_config(&server.base_url())
        };

        let client = SlackClient::new(config).unwrap();
        let _ = client.api_call("auth.test", json!({})).await;
        mock.assert();
    }

    #[tokio::test]
    async fn user_agent_set_on_all_requests() {
        let expected_agent = "my-custom-user-agent";

        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.header("user-agent", expected_agent);
            then.status(200).json_body(json!({ "ok": true }));
        });

        let config = SampleCatalogConfig {
            user_agent: Some(expected_agent.to_owned()),
            ..client_config(&server.base_url())
        };

        let client = SlackClient::new(config).unwrap();
        let _ = client.api_call("auth.test", json!({})).await;
        mock.assert();
    }

    /// `ok: false` is a successful HTTP exchange; the envelope is returned.
    #[tokio::test]
    async fn error_envelope_is_returned() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|_when, then| {
            then.status(200)
                .json_body(json!({ "ok": false, "error": "invalid_auth" }));
        });

        let client = SlackClient::new(client_config(&server.base_url())).unwrap();
        let response = client.api_call("auth.test", json!({})).await.unwrap();
        assert_eq!(response, json!({ "ok": false, "error": "invalid_auth" }));
        mock.assert();
    }

    #[tokio::test]
    async fn http_error_status_is_transport_error() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|_when, then| {
            then.status(429).body("rate limited");
        });

        let client = SlackClient::new(client_config(&server.base_url())).unwrap();
        let result = client.api_call("auth.test", json!({})).await;
        assert!(
            matches!(result, Err(CatalogClientError::Transport(_))),
            "expected transport error, found: {result:?}"
        );
        mock.assert();
    }

    #[tokio::test]
    async fn non_json_body_is_deserialize_error() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|_when, then| {
            then.status(200).body("<html>oops</html>");
        });

        let client = SlackClient::new(client_config(&server.base_url())).unwrap();
        let result = client.api_call("auth.test", json!({})).await;
        assert!(
            matches!(result, Err(CatalogClientError::Deserialize(_))),
            "expected deserialize error, found: {result:?}"
        );
        mock.assert();
    }

    #[tokio::test]
    async fn call_method_rejects_error_envelope() {
        let client = MockClient::new();
        client.push_response(json!({ "ok": false, "error": "invalid_trigger" }));

        let result = call_method(&client, "entity.presentDetails", &json!({})).await;
        assert!(
            matches!(
                &result,
                Err(CatalogClientError::MethodFailed { method, code })
                    if method == "entity.presentDetails" && code.as_deref() == Some("invalid_trigger")
            ),
            "expected MethodFailed, found: {result:?}"
        );
    }

    #[tokio::test]
    async fn call_method_returns_ok_envelope() {
        let client = MockClient::new();
        client.push_response(json!({ "ok": true, "warning": "superfluous_charset" }));

        let response = call_method(&client, "entity.presentDetails", &json!({}))
            .await
            .unwrap();
        assert_eq!(response["warning"], "superfluous_charset");
    }

    #[test]
    fn init_client_uses_mock_data_when_configured() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"[]").unwrap();

        let config = SampleCatalogConfig {
            mock_data: Some(file.path().to_path_buf()),
            ..SampleCatalogConfig::new(Url::parse(crate::DEFAULT_API_URL).unwrap())
        };
        assert!(matches!(init_client(&config), Ok(Client::Mock(_))));
    }

    #[test]
    fn init_client_fails_for_missing_mock_data() {
        let dir = tempfile::tempdir().unwrap();
        let config = SampleCatalogConfig {
            mock_data: Some(dir.path().join("missing.json")),
            ..SampleCatalogConfig::new(Url::parse(crate::DEFAULT_API_URL).unwrap())
        };
        assert!(matches!(
            init_client(&config),
            Err(CatalogClientError::MockData(_))
        ));
    }

    #[test]
    fn init_client_defaults_to_slack() {
        let config = SampleCatalogConfig::new(Url::parse(crate::DEFAULT_API_URL).unwrap());
        assert!(matches!(init_client(&config), Ok(Client::Slack(_))));
    }
}
