//! The `search` function: free-text and filtered search over the catalog.

use sample_catalog::filters::FilterSelection;
use sample_catalog::types::Sample;
use sample_catalog::{fetch_sample_data, ClientTrait};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnError};
use tracing::{debug, error, instrument};

use crate::{FunctionExecution, ListenerError, UserContext};

/// Shown to the user for any failed search.
pub const SEARCH_PROCESSING_ERROR_MSG: &str = "We encountered an issue processing your search results. Please try again or contact the app owner if the problem persists.";

#[serde_as]
#[derive(Debug, Deserialize)]
pub struct SearchInputs {
    #[serde(default)]
    pub query: Option<String>,
    /// Selections that aren't an object are ignored.
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub filters: Option<FilterSelection>,
    pub user_context: UserContext,
}

#[derive(Debug, Serialize)]
pub struct SearchOutputs {
    pub search_result: Vec<Sample>,
}

/// Run a search and report the results or a generic failure.
///
/// The execution is acknowledged exactly once, after everything else, even
/// if reporting the outcome fails.
#[instrument(skip_all)]
pub async fn search_callback(execution: &impl FunctionExecution, client: &impl ClientTrait) {
    if let Err(err) = search(execution, client).await {
        if err.is_upstream_response() {
            error!(error = ?err, "Failed to fetch or parse sample data");
        } else {
            error!(error = ?err, "Unexpected error occurred while processing search request");
        }

        if let Err(err) = execution.fail(SEARCH_PROCESSING_ERROR_MSG).await {
            error!(error = ?err, "failed to report search failure");
        }
    }

    if let Err(err) = execution.ack().await {
        error!(error = ?err, "failed to acknowledge search request");
    }
}

async fn search(
    execution: &impl FunctionExecution,
    client: &impl ClientTrait,
) -> Result<(), ListenerError> {
    let inputs =
        SearchInputs::deserialize(execution.inputs()).map_err(ListenerError::InvalidInputs)?;
    debug!(
        user = %inputs.user_context.id,
        query = ?inputs.query,
        filters = ?inputs.filters,
        "executing search query"
    );

    let response =
        fetch_sample_data(client, inputs.query.as_deref(), inputs.filters.as_ref()).await?;

    let outputs = serde_json::to_value(SearchOutputs {
        search_result: response.samples,
    })
    .map_err(ListenerError::Outputs)?;

    execution
        .complete(outputs)
        .await
        .map_err(ListenerError::Complete)
}
