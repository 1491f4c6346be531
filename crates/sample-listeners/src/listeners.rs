use sample_catalog::{init_client, CatalogClientError, Client, ClientTrait, SampleCatalogConfig};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::error::DispatchError;
use crate::events::{entity_details_requested_callback, ENTITY_DETAILS_REQUESTED_EVENT};
use crate::functions::{filters_callback, search_callback, FILTERS_FUNCTION, SEARCH_FUNCTION};
use crate::FunctionExecution;

/// Routes function executions and events to their listeners.
#[derive(Debug)]
pub struct Listeners<C = Client> {
    client: C,
}

impl Listeners<Client> {
    /// Listeners talking to the API described by `config`.
    pub fn from_config(config: &SampleCatalogConfig) -> Result<Self, CatalogClientError> {
        Ok(Self::new(init_client(config)?))
    }
}

impl<C: ClientTrait> Listeners<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Callback ids of the functions listened for.
    pub fn functions() -> &'static [&'static str] {
        &[SEARCH_FUNCTION, FILTERS_FUNCTION]
    }

    /// Event types listened for.
    pub fn events() -> &'static [&'static str] {
        &[ENTITY_DETAILS_REQUESTED_EVENT]
    }

    /// Run the listener for the function `callback_id`.
    ///
    /// The listener acknowledges `execution` itself.
    #[instrument(skip(self, execution))]
    pub async fn handle_function(
        &self,
        callback_id: &str,
        execution: &impl FunctionExecution,
    ) -> Result<(), DispatchError> {
        debug!("dispatching function execution");
        match callback_id {
            SEARCH_FUNCTION => search_callback(execution, &self.client).await,
            FILTERS_FUNCTION => filters_callback(execution).await,
            _ => return Err(DispatchError::UnknownFunction(callback_id.to_string())),
        }
        Ok(())
    }

    /// Run the listener for `event`, chosen by its `type` field.
    #[instrument(skip_all)]
    pub async fn handle_event(&self, event: &Value) -> Result<(), DispatchError> {
        let event_type = event.get("type").and_then(Value::as_str).unwrap_or_default();
        debug!(event_type, "dispatching event");
        match event_type {
            ENTITY_DETAILS_REQUESTED_EVENT => {
                entity_details_requested_callback(&self.client, event).await
            },
            _ => return Err(DispatchError::UnknownEvent(event_type.to_string())),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use sample_catalog::{MockClient, API_METHOD};
    use serde_json::json;

    use super::*;
    use crate::events::entity_details_requested::PRESENT_DETAILS_METHOD;
    use crate::test_helpers::{fake_sample_data_response, FakeExecution, Signal};

    fn listeners() -> Listeners<MockClient> {
        let client = MockClient::new();
        client.push_response(fake_sample_data_response());
        client.push_response(json!({ "ok": true }));
        Listeners::new(client)
    }

    #[tokio::test]
    async fn routes_search_function() {
        let listeners = listeners();
        let execution = FakeExecution::new(json!({
            "query": "python",
            "user_context": { "id": "U123456" },
        }));

        listeners
            .handle_function(SEARCH_FUNCTION, &execution)
            .await
            .unwrap();

        assert_eq!(listeners.client().calls_to(API_METHOD).len(), 1);
        assert_eq!(execution.completions().len(), 1);
        assert_eq!(execution.ack_count(), 1);
    }

    #[tokio::test]
    async fn routes_filters_function_without_api_calls() {
        let listeners = listeners();
        let execution = FakeExecution::new(json!({ "user_context": { "id": "U123456" } }));

        listeners
            .handle_function(FILTERS_FUNCTION, &execution)
            .await
            .unwrap();

        assert!(listeners.client().calls().is_empty());
        assert_eq!(execution.completions().len(), 1);
    }

    #[tokio::test]
    async fn rejects_unknown_function() {
        let listeners = listeners();
        let execution = FakeExecution::new(json!({}));

        let err = listeners
            .handle_function("delete_everything", &execution)
            .await
            .unwrap_err();

        assert_eq!(err, DispatchError::UnknownFunction("delete_everything".to_string()));
        assert_eq!(execution.signals(), Vec::<Signal>::new());
    }

    #[tokio::test]
    async fn routes_entity_details_event() {
        let listeners = listeners();

        listeners
            .handle_event(&json!({
                "type": "entity_details_requested",
                "external_ref": { "id": "bolt-python-assistant" },
                "trigger_id": "trigger-123",
                "link": { "url": "https://example.com/sample" },
            }))
            .await
            .unwrap();

        assert_eq!(listeners.client().calls_to(PRESENT_DETAILS_METHOD).len(), 1);
    }

    #[tokio::test]
    async fn rejects_unknown_event() {
        let listeners = listeners();

        let err = listeners
            .handle_event(&json!({ "type": "app_mention" }))
            .await
            .unwrap_err();
        assert_eq!(err, DispatchError::UnknownEvent("app_mention".to_string()));

        let err = listeners.handle_event(&json!({})).await.unwrap_err();
        assert_eq!(err, DispatchError::UnknownEvent(String::new()));

        assert!(listeners.client().calls().is_empty());
    }

    #[test]
    fn lists_registered_listeners() {
        assert_eq!(Listeners::<MockClient>::functions(), ["search", "filters"]);
        assert_eq!(Listeners::<MockClient>::events(), ["entity_details_requested"]);
    }

    #[test]
    fn from_config_uses_mock_data() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, br#"[{ "ok": true, "samples": [] }]"#).unwrap();

        let mut config = SampleCatalogConfig::new(sample_catalog::DEFAULT_API_URL.parse().unwrap());
        config.mock_data = Some(file.path().to_path_buf());

        let listeners = Listeners::from_config(&config).unwrap();
        assert!(matches!(listeners.client(), Client::Mock(_)));
    }
}
