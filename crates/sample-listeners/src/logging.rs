use anyhow::Context;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::prelude::*;

/// Log filter for the given level of detail.
///
/// `RUST_LOG` takes precedence when set.
pub fn log_filter(debug: bool) -> &'static str {
    if debug {
        "warn,sample_catalog=debug,sample_listeners=debug"
    } else {
        "warn,sample_catalog=info,sample_listeners=info"
    }
}

fn env_filter(debug: bool) -> anyhow::Result<EnvFilter> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_filter(debug)))
        .context("invalid log filter")
}

/// Install a global subscriber logging to stderr.
///
/// Fails if a global subscriber is already installed.
pub fn init_logger(debug: bool) -> anyhow::Result<()> {
    let fmt = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(env_filter(debug)?);

    tracing_subscriber::registry()
        .with(fmt)
        .try_init()
        .context("failed to install logger")?;

    tracing::debug!("initialized logger");
    Ok(())
}
