//! # SenSwap Quote Tool
//!
//! Command-line front end for the bonding-curve oracle. Pool snapshots come
//! from flags or TOML files; results print as text or JSON.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod pool_file;

pub use cli::{Cli, Command, PoolArgs};
pub use commands::{execute, QuoteOutput};
