//! Fetching sample data from the catalog.

use serde::Deserialize;
use tracing::{debug, error, instrument};

use crate::client::ClientTrait;
use crate::error::CatalogClientError;
use crate::filters::{FilterSelection, LANGUAGES_FILTER, SAMPLES_FILTER, TEMPLATES_FILTER};
use crate::types::{ApiEnvelope, SampleDataRequest, SampleDataResponse, SampleType, SelectedFilters};

/// Web API method serving the sample catalog.
pub const API_METHOD: &str = "developer.sampleData.get";

/// Decide which kind of entry to restrict a search to from the two toggles.
///
/// Only a single switched-on toggle narrows the search. Both on and both off
/// are the same "no preference" outcome.
pub fn exclusive_sample_type(template: bool, sample: bool) -> Option<SampleType> {
    match (template, sample) {
        (true, false) => Some(SampleType::Template),
        (false, true) => Some(SampleType::Sample),
        (true, true) | (false, false) => None,
    }
}

impl SelectedFilters {
    /// Translate the filters chosen in the platform UI into request filters.
    pub fn from_selection(selection: &FilterSelection) -> Self {
        let languages = selection
            .options(&LANGUAGES_FILTER)
            .filter(|languages| !languages.is_empty())
            .map(<[String]>::to_vec);

        let sample_type = exclusive_sample_type(
            selection.is_toggled(&TEMPLATES_FILTER),
            selection.is_toggled(&SAMPLES_FILTER),
        );

        Self {
            languages,
            sample_type,
        }
    }
}

impl SampleDataRequest {
    /// Build request parameters from a search query and filter selection.
    ///
    /// Empty queries and selections that resolve to no filters are left out
    /// entirely.
    pub fn new(query: Option<&str>, selection: Option<&FilterSelection>) -> Self {
        let query = query
            .filter(|query| !query.is_empty())
            .map(str::to_string);

        let filters = selection
            .map(SelectedFilters::from_selection)
            .filter(|filters| !filters.is_empty());

        Self { query, filters }
    }
}

/// Fetch the samples matching `query` and `selection`.
///
/// Without a query or selection the whole catalog is returned.
/// The response is returned unchanged if the API reports success.
#[instrument(skip_all)]
pub async fn fetch_sample_data(
    client: &impl ClientTrait,
    query: Option<&str>,
    selection: Option<&FilterSelection>,
) -> Result<SampleDataResponse, CatalogClientError> {
    let request = SampleDataRequest::new(query, selection);
    debug!(?request, "sending sample data request");

    let params = serde_json::to_value(&request).map_err(CatalogClientError::Serialize)?;
    let response = client.api_call(API_METHOD, params).await?;

    let envelope =
        ApiEnvelope::deserialize(&response).map_err(CatalogClientError::Deserialize)?;
    if !envelope.ok {
        let code = envelope.error.as_deref().unwrap_or("unknown_error");
        error!("Search API request failed with error: {code}");
        return Err(CatalogClientError::UpstreamResponse {
            code: envelope.error,
        });
    }

    let response: SampleDataResponse =
        serde_json::from_value(response).map_err(CatalogClientError::Deserialize)?;
    debug!(n_samples = response.samples.len(), "received sample data");

    Ok(response)
}
