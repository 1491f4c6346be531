//! The `filters` function: tells the platform which search filters exist.

use sample_catalog::filters::{filters, FilterDefinition};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use crate::{FunctionExecution, ListenerError, UserContext};

/// Shown to the user if the filters can't be delivered.
pub const FILTER_PROCESSING_ERROR_MSG: &str = "We encountered an issue processing filter results. Please try again or contact the app owner if the problem persists.";

#[derive(Debug, Deserialize)]
pub struct FiltersInputs {
    pub user_context: UserContext,
}

#[derive(Debug, Serialize)]
pub struct FiltersOutputs {
    pub filters: &'static [FilterDefinition],
}

/// Report the available filters, acknowledging the execution exactly once
/// afterwards.
#[instrument(skip_all)]
pub async fn filters_callback(execution: &impl FunctionExecution) {
    if let Err(err) = list_filters(execution).await {
        error!(error = ?err, "Unexpected error occurred while processing filters request");

        if let Err(err) = execution.fail(FILTER_PROCESSING_ERROR_MSG).await {
            error!(error = ?err, "failed to report filters failure");
        }
    }

    if let Err(err) = execution.ack().await {
        error!(error = ?err, "failed to acknowledge filters request");
    }
}

async fn list_filters(execution: &impl FunctionExecution) -> Result<(), ListenerError> {
    let inputs =
        FiltersInputs::deserialize(execution.inputs()).map_err(ListenerError::InvalidInputs)?;
    debug!(user = %inputs.user_context.id, "executing filter request");

    let outputs = serde_json::to_value(FiltersOutputs { filters: filters() })
        .map_err(ListenerError::Outputs)?;

    execution
        .complete(outputs)
        .await
        .map_err(ListenerError::Complete)
}
