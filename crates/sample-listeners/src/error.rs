use sample_catalog::CatalogClientError;
use thiserror::Error;

/// Errors raised while handling a single function execution or event.
///
/// These are logged by the listener and never returned to the host.
#[derive(Debug, Error)]
pub enum ListenerError {
    #[error(transparent)]
    Catalog(#[from] CatalogClientError),
    #[error("invalid function inputs")]
    InvalidInputs(#[source] serde_json::Error),
    #[error("invalid event payload")]
    InvalidEvent(#[source] serde_json::Error),
    #[error("failed to serialize function outputs")]
    Outputs(#[source] serde_json::Error),
    #[error("failed to complete function execution")]
    Complete(#[source] anyhow::Error),
}

impl ListenerError {
    /// Whether the catalog API rejected the sample data request.
    pub fn is_upstream_response(&self) -> bool {
        matches!(self, ListenerError::Catalog(err) if err.is_upstream_response())
    }
}

/// An invocation the app has no listener for.
#[derive(Debug, Error, PartialEq)]
pub enum DispatchError {
    #[error("no listener registered for function '{0}'")]
    UnknownFunction(String),
    #[error("no listener registered for event '{0}'")]
    UnknownEvent(String),
}
