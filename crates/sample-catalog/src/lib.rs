//! Client infrastructure for the sample catalog exposed by the Slack Web API.
//!
//! This crate provides:
//! - The static set of search filters the app advertises
//! - Shaping of search queries and filter selections into request parameters
//! - An HTTP client for the Web API with bearer token authentication
//! - A mock client with canned responses for tests and local development
//!
//! ## Usage
//!
//! ```ignore
//! use sample_catalog::{fetch_sample_data, init_client, SampleCatalogConfig};
//!
//! let config = SampleCatalogConfig::load(None)?;
//! let client = init_client(&config)?;
//! let response = fetch_sample_data(&client, Some("bolt"), None).await?;
//! ```

mod client;
mod config;
mod error;
pub mod filters;
mod mock;
mod samples;
pub mod types;

#[cfg(any(test, feature = "tests"))]
pub mod test_helpers;

pub use client::{call_method, init_client, Client, ClientTrait, SlackClient};
pub use config::{ConfigError, SampleCatalogConfig, DEFAULT_API_URL};
pub use error::CatalogClientError;
pub use mock::{ApiCall, MockClient, MockDataError};
pub use samples::{exclusive_sample_type, fetch_sample_data, API_METHOD};
