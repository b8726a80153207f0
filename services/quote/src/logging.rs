//! Tracing setup for the quote tool
//!
//! Configuration loading logs before the configured subscriber exists, so it
//! runs under a scoped bootstrap subscriber with the default level.

use anyhow::Result;
use sen_config::{defaults, load_config, LoggingConfig, OracleConfig};
use std::path::Path;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn filter_or(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Load configuration while logging to `writer` at the default level
pub fn load_config_logged<W>(
    base_path: Option<&Path>,
    environment: Option<&str>,
    writer: W,
) -> Result<OracleConfig>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let bootstrap = tracing_subscriber::fmt()
        .with_env_filter(filter_or(defaults::logging::LEVEL))
        .with_writer(writer)
        .finish();
    tracing::subscriber::with_default(bootstrap, || load_config(base_path, environment))
}

/// Install the global subscriber described by the configuration
pub fn init_tracing(logging: &LoggingConfig) {
    // Logs go to stderr so stdout carries only the quote
    let json_layer = logging
        .json
        .then(|| tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr));
    let text_layer = (!logging.json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(filter_or(&logging.level))
        .with(json_layer)
        .with(text_layer)
        .init();
}
