//! Error handling for catalog API operations.

use thiserror::Error;

use crate::mock::MockDataError;

/// Common error type for catalog API operations.
///
/// [CatalogClientError::UpstreamResponse] is the only variant whose message
/// may be shown to users; it never includes the upstream error code.
#[derive(Debug, Error)]
pub enum CatalogClientError {
    /// The sample data envelope came back with `ok: false`.
    #[error("Failed to fetch sample data from Slack API")]
    UpstreamResponse { code: Option<String> },
    /// Any other Web API method came back with `ok: false`.
    #[error("Slack API method '{method}' failed: {}", code.as_deref().unwrap_or("unknown_error"))]
    MethodFailed {
        method: String,
        code: Option<String>,
    },
    #[error("invalid Slack API method '{method}'")]
    InvalidMethod {
        method: String,
        #[source]
        source: url::ParseError,
    },
    #[error("failed to reach Slack API")]
    Transport(#[source] reqwest::Error),
    #[error("failed to serialize request parameters")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to parse Slack API response")]
    Deserialize(#[source] serde_json::Error),
    #[error(transparent)]
    MockData(#[from] MockDataError),
    #[error("{}", .0)]
    Other(String),
}

impl CatalogClientError {
    /// Whether the upstream API rejected the request, as opposed to the
    /// request never completing or the response being malformed.
    pub fn is_upstream_response(&self) -> bool {
        matches!(self, CatalogClientError::UpstreamResponse { .. })
    }
}
