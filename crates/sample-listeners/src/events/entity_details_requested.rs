//! Showing the details of a catalog entry the user opened from search results.

use sample_catalog::types::{ExternalRef, Sample};
use sample_catalog::{call_method, fetch_sample_data, ClientTrait};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::skip_serializing_none;
use tracing::{debug, error, instrument, warn};

use crate::ListenerError;

/// Web API method opening the detail view of an entity.
pub const PRESENT_DETAILS_METHOD: &str = "entity.presentDetails";

/// Entity type every catalog entry is presented as.
pub const ENTITY_TYPE: &str = "slack#/entities/item";

const TITLE_MAX_LENGTH: u32 = 50;

#[derive(Debug, Clone, Deserialize)]
pub struct EntityDetailsRequestedEvent {
    pub external_ref: ExternalRef,
    pub trigger_id: String,
    pub link: EventLink,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventLink {
    pub url: String,
}

// ---------------------------------------------------------------------------
// entity.presentDetails parameters
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct PresentDetailsRequest<'a> {
    trigger_id: &'a str,
    metadata: EntityMetadata<'a>,
}

#[derive(Debug, Serialize)]
struct EntityMetadata<'a> {
    entity_type: &'static str,
    url: &'a str,
    external_ref: &'a ExternalRef,
    entity_payload: EntityPayload<'a>,
}

#[derive(Debug, Serialize)]
struct EntityPayload<'a> {
    attributes: EntityAttributes<'a>,
    custom_fields: Vec<CustomField<'a>>,
}

#[derive(Debug, Serialize)]
struct EntityAttributes<'a> {
    title: EntityTitle<'a>,
}

#[skip_serializing_none]
#[derive(Debug, Serialize)]
struct EntityTitle<'a> {
    text: Option<&'a str>,
    edit: TitleEdit,
}

#[derive(Debug, Serialize)]
struct TitleEdit {
    enabled: bool,
    text: TitleEditText,
}

#[derive(Debug, Serialize)]
struct TitleEditText {
    max_length: u32,
}

/// A detail row. Samples missing the value get a row without one.
#[skip_serializing_none]
#[derive(Debug, Serialize)]
struct CustomField<'a> {
    key: &'static str,
    label: &'static str,
    #[serde(rename = "type")]
    field_type: &'static str,
    value: Option<&'a str>,
}

impl<'a> CustomField<'a> {
    fn string(key: &'static str, label: &'static str, value: Option<&'a str>) -> Self {
        Self {
            key,
            label,
            field_type: "string",
            value,
        }
    }
}

impl<'a> PresentDetailsRequest<'a> {
    fn new(event: &'a EntityDetailsRequestedEvent, sample: &'a Sample) -> Self {
        let mut custom_fields = vec![
            CustomField::string(
                "description",
                "Description of sample",
                sample.description.as_deref(),
            ),
            CustomField::string("date_updated", "Last updated", sample.date_updated.as_deref()),
        ];
        if let Some(content) = sample.content() {
            custom_fields.push(CustomField::string("content", "Details of sample", Some(content)));
        }

        Self {
            trigger_id: &event.trigger_id,
            metadata: EntityMetadata {
                entity_type: ENTITY_TYPE,
                url: &event.link.url,
                external_ref: &event.external_ref,
                entity_payload: EntityPayload {
                    attributes: EntityAttributes {
                        title: EntityTitle {
                            text: sample.title.as_deref(),
                            edit: TitleEdit {
                                enabled: false,
                                text: TitleEditText {
                                    max_length: TITLE_MAX_LENGTH,
                                },
                            },
                        },
                    },
                    custom_fields,
                },
            },
        }
    }
}

/// Look up the requested entry and open its detail view.
///
/// Errors are logged and otherwise dropped; there is nobody to report them to.
#[instrument(skip_all)]
pub async fn entity_details_requested_callback(client: &impl ClientTrait, event: &Value) {
    if let Err(err) = present_details(client, event).await {
        if err.is_upstream_response() {
            error!(error = ?err, "Failed to fetch or parse sample data");
        } else {
            error!(
                error = ?err,
                "Unexpected error occurred while processing entity_details_requested event"
            );
        }
    }
}

async fn present_details(client: &impl ClientTrait, event: &Value) -> Result<(), ListenerError> {
    let event =
        EntityDetailsRequestedEvent::deserialize(event).map_err(ListenerError::InvalidEvent)?;
    let id = event.external_ref.id.as_str();

    let response = fetch_sample_data(client, None, None).await?;

    let Some(sample) = response.find_sample(id) else {
        warn!("Failed to find sample data with external reference id: {id}");
        return Ok(());
    };

    debug!(external_ref = id, "presenting sample details");
    let request = PresentDetailsRequest::new(&event, sample);
    call_method(client, PRESENT_DETAILS_METHOD, &request).await?;

    Ok(())
}
