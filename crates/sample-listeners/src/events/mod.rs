//! Events the app subscribes to.

pub mod entity_details_requested;

pub use entity_details_requested::entity_details_requested_callback;

pub const ENTITY_DETAILS_REQUESTED_EVENT: &str = "entity_details_requested";
