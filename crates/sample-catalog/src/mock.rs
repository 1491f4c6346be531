//! A client that serves canned responses instead of calling the Web API.

use std::collections::VecDeque;
use std::fmt::Debug;
use std::path::Path;
use std::sync::{Arc, Mutex};

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::client::ClientTrait;
use crate::error::CatalogClientError;

// Arc allows pushing responses and inspecting calls from outside the client
// Mutex allows sharing across threads (necessary because of tokio)
type MockField<T> = Arc<Mutex<T>>;

#[derive(Debug, Error)]
pub enum MockDataError {
    /// Failed to read the file pointed at by the `mock_data` setting
    #[error("failed to read mock response file")]
    ReadMockFile(#[source] std::io::Error),
    /// Failed to parse the contents of the mock data file as JSON
    #[error("failed to parse mock data as JSON")]
    ParseJson(#[source] serde_json::Error),
    #[error("no mock response left for '{0}'")]
    Exhausted(String),
}

#[derive(Debug, Clone)]
enum MockResponse {
    Response(Value),
    Error(String),
}

/// A Web API method invocation seen by a [MockClient].
#[derive(Debug, Clone, PartialEq)]
pub struct ApiCall {
    pub method: String,
    pub params: Value,
}

/// A client that can be seeded with mock responses.
///
/// Responses are handed out in the order they were pushed, regardless of the
/// method being called. Clones share responses and recorded calls.
#[derive(Debug, Clone, Default)]
pub struct MockClient {
    responses: MockField<VecDeque<MockResponse>>,
    calls: MockField<Vec<ApiCall>>,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock client serving the responses listed in a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, MockDataError> {
        let contents = std::fs::read_to_string(path).map_err(MockDataError::ReadMockFile)?;
        let responses: Vec<Value> =
            serde_json::from_str(&contents).map_err(MockDataError::ParseJson)?;

        let client = Self::new();
        for response in responses {
            client.push_response(response);
        }
        Ok(client)
    }

    /// Push a response into the list of mock responses
    pub fn push_response(&self, response: Value) {
        self.responses
            .lock()
            .expect("couldn't acquire mock lock")
            .push_back(MockResponse::Response(response));
    }

    /// Push a failure to reach the API into the list of mock responses
    pub fn push_error(&self, message: impl Into<String>) {
        self.responses
            .lock()
            .expect("couldn't acquire mock lock")
            .push_back(MockResponse::Error(message.into()));
    }

    /// All calls made so far, oldest first.
    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().expect("couldn't acquire mock lock").clone()
    }

    /// Calls made so far to a single method, oldest first.
    pub fn calls_to(&self, method: &str) -> Vec<ApiCall> {
        self.calls()
            .into_iter()
            .filter(|call| call.method == method)
            .collect()
    }
}

impl ClientTrait for MockClient {
    async fn api_call(&self, method: &str, params: Value) -> Result<Value, CatalogClientError> {
        debug!(method, "serving mock response");
        self.calls
            .lock()
            .expect("couldn't acquire mock lock")
            .push(ApiCall {
                method: method.to_string(),
                params,
            });

        let response = self
            .responses
            .lock()
            .expect("couldn't acquire mock lock")
            .pop_front();
        match response {
            Some(MockResponse::Response(value)) => Ok(value),
            Some(MockResponse::Error(message)) => Err(CatalogClientError::Other(message)),
            None => Err(MockDataError::Exhausted(method.to_string()).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn serves_responses_in_order_and_records_calls() {
        let client = MockClient::new();
        client.push_response(json!({ "ok": true, "n": 1 }));
        client.push_error("connection reset");

        let first = client.api_call("a.method", json!({})).await.unwrap();
        assert_eq!(first, json!({ "ok": true, "n": 1 }));

        let second = client.api_call("b.method", json!({ "x": 1 })).await;
        assert!(matches!(second, Err(CatalogClientError::Other(msg)) if msg == "connection reset"));

        let third = client.api_call("a.method", json!({})).await;
        assert!(matches!(
            third,
            Err(CatalogClientError::MockData(MockDataError::Exhausted(method))) if method == "a.method"
        ));

        assert_eq!(client.calls().len(), 3);
        assert_eq!(client.calls_to("b.method"), vec![ApiCall {
            method: "b.method".to_string(),
            params: json!({ "x": 1 }),
        }]);
    }

    #[tokio::test]
    async fn clones_share_state() {
        let client = MockClient::new();
        let handle = client.clone();
        handle.push_response(json!({ "ok": true }));

        client.api_call("a.method", json!({})).await.unwrap();
        assert_eq!(handle.calls().len(), 1);
    }

    #[tokio::test]
    async fn reads_responses_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"ok": true, "samples": []}}, {{"ok": false}}]"#).unwrap();

        let client = MockClient::from_file(file.path()).unwrap();
        assert_eq!(
            client.api_call("a", json!({})).await.unwrap(),
            json!({ "ok": true, "samples": [] })
        );
        assert_eq!(
            client.api_call("a", json!({})).await.unwrap(),
            json!({ "ok": false })
        );
    }

    #[test]
    fn rejects_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            MockClient::from_file(file.path()),
            Err(MockDataError::ParseJson(_))
        ));
    }
}
