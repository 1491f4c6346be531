//! Sample catalog types.
//!
//! These represent the payloads exchanged with the Web API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use serde_with::skip_serializing_none;

// ---------------------------------------------------------------------------
// Catalog entries
// ---------------------------------------------------------------------------

/// Reference identifying a sample in the catalog.
///
/// Fields other than `id` are kept so the reference can be handed back to
/// the platform unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalRef {
    pub id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ExternalRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            extra: Map::new(),
        }
    }
}

/// A sample project or template listed in the catalog.
///
/// Only `external_ref` is required. Absent text fields stay absent and
/// unknown fields are kept, so a sample serializes back the way it was
/// received.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub title: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
    pub date_updated: Option<String>,
    pub external_ref: ExternalRef,
    pub content: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Sample {
    /// Long form description, if the sample has a non-empty one.
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref().filter(|content| !content.is_empty())
    }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Kind of catalog entry to restrict a search to.
///
/// Serializes to the name of the corresponding toggle filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleType {
    Template,
    Sample,
}

/// Filters sent with a sample data request.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SelectedFilters {
    pub languages: Option<Vec<String>>,
    #[serde(rename = "type")]
    pub sample_type: Option<SampleType>,
}

impl SelectedFilters {
    pub fn is_empty(&self) -> bool {
        self.languages.is_none() && self.sample_type.is_none()
    }
}

/// Parameters of a `developer.sampleData.get` call.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SampleDataRequest {
    pub query: Option<String>,
    pub filters: Option<SelectedFilters>,
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// The `ok`/`error` pair every Web API response carries.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiEnvelope {
    pub ok: bool,
    pub error: Option<String>,
}

/// Response of a `developer.sampleData.get` call.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleDataResponse {
    pub ok: bool,
    pub error: Option<String>,
    #[serde(default)]
    pub samples: Vec<Sample>,
}

impl SampleDataResponse {
    /// The sample whose external reference has the given id.
    pub fn find_sample(&self, id: &str) -> Option<&Sample> {
        self.samples.iter().find(|sample| sample.external_ref.id == id)
    }
}
