//! # SenSwap Oracle Configuration
//!
//! Centralized configuration and defaults for oracle tooling.
//!
//! ## Features
//!
//! - **Token Precision**: Decimals of each pool side for human-readable amounts
//! - **Quote Settings**: Round-trip tolerance, output format, default pool file
//! - **Logging**: Default filter directive and output format
//!
//! ## Usage
//!
//! ```rust,no_run
//! use sen_config::{load_config, OutputFormat};
//!
//! let config = load_config(None, Some("devnet")).unwrap();
//! if config.quote.output == OutputFormat::Json {
//!     println!("{}", config.tokens.bid_decimals);
//! }
//! ```

pub mod defaults;
pub mod oracle_config;

// Re-export commonly used types
pub use oracle_config::{
    load_config, LoggingConfig, OracleConfig, OutputFormat, QuoteConfig, TokenConfig,
};
