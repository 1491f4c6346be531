//! Configuration types for catalog client construction.

use std::collections::{BTreeMap, HashMap};
use std::fmt::Debug;
use std::path::{Path, PathBuf};

use config::{Config as HierarchicalConfig, Environment};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;
use url::Url;

/// Base URL of the Slack Web API.
///
/// The trailing slash is required so that method names can be joined onto it.
pub const DEFAULT_API_URL: &str = "https://slack.com/api/";

/// Prefix of environment variables that override configuration values,
/// e.g. `SLACK_BOT_TOKEN`.
const ENV_PREFIX: &str = "SLACK_";

/// Configuration for catalog client construction.
#[derive(Clone, Deserialize)]
pub struct SampleCatalogConfig {
    /// Base URL of the Web API.
    pub api_url: Url,
    /// Bot token used as bearer token on every request.
    pub bot_token: Option<String>,
    /// Additional headers to include in requests.
    #[serde(default)]
    pub extra_headers: BTreeMap<String, String>,
    pub user_agent: Option<String>,
    /// Serve responses from a JSON file instead of the Web API.
    pub mock_data: Option<PathBuf>,
}

impl Debug for SampleCatalogConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SampleCatalogConfig")
            .field("api_url", &self.api_url.as_str())
            .field("has_token", &self.bot_token.is_some())
            .field("extra_headers", &self.extra_headers.keys())
            .field("user_agent", &self.user_agent)
            .field("mock_data", &self.mock_data)
            .finish()
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read configuration")]
    Read(#[from] config::ConfigError),
}

impl SampleCatalogConfig {
    /// A configuration talking to `api_url` without authentication.
    pub fn new(api_url: Url) -> Self {
        Self {
            api_url,
            bot_token: None,
            extra_headers: BTreeMap::new(),
            user_agent: None,
            mock_data: None,
        }
    }

    /// Read the configuration from defaults, an optional TOML file and
    /// `SLACK_*` environment variables, in increasing order of precedence.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_from(config_file, std::env::vars())
    }

    /// Like [SampleCatalogConfig::load] but with an explicit set of
    /// environment variables.
    pub fn load_from(
        config_file: Option<&Path>,
        vars: impl IntoIterator<Item = (String, String)>,
    ) -> Result<Self, ConfigError> {
        let mut builder = HierarchicalConfig::builder().set_default("api_url", DEFAULT_API_URL)?;

        if let Some(path) = config_file {
            debug!(path = %path.display(), "reading config file");
            builder = builder.add_source(
                config::File::from(path.to_path_buf())
                    .format(config::FileFormat::Toml)
                    .required(true),
            );
        }

        let overrides = vars
            .into_iter()
            .filter_map(|(k, v)| k.strip_prefix(ENV_PREFIX).map(|k| (k.to_lowercase(), v)))
            .collect::<HashMap<_, _>>();

        let config: SampleCatalogConfig = builder
            .add_source(Environment::default().source(Some(overrides)))
            .build()?
            .try_deserialize()?;

        debug!(?config, "loaded catalog client config");
        Ok(config)
    }
}
