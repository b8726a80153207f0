//! Oracle Configuration Module
//!
//! Provides configuration loading for oracle tooling. Supports loading from
//! TOML files with environment-specific overlays and `SEN_` variable overrides.

use crate::defaults;
use anyhow::{bail, Context, Result};
use config_crate::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Main oracle configuration structure
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct OracleConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub tokens: TokenConfig,

    #[serde(default)]
    pub quote: QuoteConfig,
}

/// Logging settings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub level: String,
    /// Emit JSON log lines instead of human-readable ones
    pub json: bool,
}

/// Decimals of the two pool sides, used for human-readable amounts
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct TokenConfig {
    pub bid_decimals: u32,
    pub ask_decimals: u32,
}

/// Quote tool settings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct QuoteConfig {
    pub round_trip_tolerance: u64,
    pub output: OutputFormat,
    /// Default pool snapshot file
    pub pool_file: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::logging::LEVEL.to_string(),
            json: false,
        }
    }
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            bid_decimals: defaults::tokens::BID_DECIMALS,
            ask_decimals: defaults::tokens::ASK_DECIMALS,
        }
    }
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            round_trip_tolerance: defaults::quote::ROUND_TRIP_TOLERANCE,
            output: OutputFormat::Text,
            pool_file: None,
        }
    }
}

impl OracleConfig {
    /// Load configuration from files with environment overrides
    ///
    /// An explicit `base_path` must exist. Without one, `config/oracle.toml`
    /// is used if present and defaults apply otherwise.
    pub fn load(base_path: Option<&Path>, environment: Option<&str>) -> Result<Self> {
        let (base, required) = match base_path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(defaults::paths::BASE_CONFIG), false),
        };
        debug!("Loading oracle config from {:?} (required: {})", base, required);

        let mut builder = Config::builder().add_source(File::from(base.as_path()).required(required));

        // Add environment-specific overrides if specified
        if let Some(env) = environment {
            let env_file = base
                .parent()
                .unwrap_or_else(|| Path::new("."))
                .join(defaults::paths::ENVIRONMENTS_DIR)
                .join(format!("{}.toml", env));

            if env_file.exists() {
                info!("Loading environment config: {:?}", env_file);
                builder = builder.add_source(File::from(env_file));
            } else {
                warn!("Environment config not found: {:?}", env_file);
            }
        }

        // Override with environment variables (SEN_ prefix, `__` between sections)
        builder = builder.add_source(
            Environment::with_prefix(defaults::paths::ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = builder
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        config.validate()?;
        Ok(config)
    }

    /// Reject values the oracle cannot honour
    pub fn validate(&self) -> Result<()> {
        let max = defaults::tokens::MAX_DECIMALS;
        if self.tokens.bid_decimals > max {
            bail!("tokens.bid_decimals {} exceeds {}", self.tokens.bid_decimals, max);
        }
        if self.tokens.ask_decimals > max {
            bail!("tokens.ask_decimals {} exceeds {}", self.tokens.ask_decimals, max);
        }
        if self.logging.level.trim().is_empty() {
            bail!("logging.level must not be empty");
        }
        Ok(())
    }

    /// Expand environment variables in path values
    pub fn expand_env_vars(&mut self) -> Result<()> {
        if let Some(pool_file) = &self.quote.pool_file {
            let raw = pool_file.to_string_lossy();
            let expanded = shellexpand::env(&raw).context("Failed to expand pool file path")?;
            self.quote.pool_file = Some(PathBuf::from(expanded.as_ref()));
        }
        Ok(())
    }
}

/// Convenience function to load configuration with defaults
pub fn load_config(base_path: Option<&Path>, environment: Option<&str>) -> Result<OracleConfig> {
    let mut config = OracleConfig::load(base_path, environment)?;
    config.expand_env_vars()?;
    Ok(config)
}
