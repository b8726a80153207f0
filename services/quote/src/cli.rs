//! Command-line definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sen-quote")]
#[command(author, version, about = "Quote swaps against an LPT-weighted bonding-curve pool")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Environment overlay (loads `environments/<ENV>.toml` next to the config file)
    #[arg(long, global = true)]
    pub env: Option<String>,

    /// Print JSON regardless of the configured output format
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// New ask reserve after the bid reserve moves
    Curve {
        /// Proposed bid reserve in base units
        new_bid_reserve: String,
        /// Also run the inverse curve and report the drift
        #[arg(long)]
        verify: bool,
        #[command(flatten)]
        pool: PoolArgs,
    },
    /// New bid reserve after the ask reserve moves
    InverseCurve {
        /// Proposed ask reserve in base units
        new_ask_reserve: String,
        #[command(flatten)]
        pool: PoolArgs,
    },
    /// Price-impact estimate for a bid reserve move
    Slippage {
        new_bid_reserve: String,
        #[command(flatten)]
        pool: PoolArgs,
    },
    /// Effective exchange rate for a bid reserve move
    Ratio {
        new_bid_reserve: String,
        #[command(flatten)]
        pool: PoolArgs,
    },
    /// Ask amount received for a bid deposit
    SwapOut {
        bid_amount: String,
        #[command(flatten)]
        pool: PoolArgs,
    },
    /// Bid amount required for an ask withdrawal
    SwapIn {
        ask_amount: String,
        #[command(flatten)]
        pool: PoolArgs,
    },
    /// Fixed-point division with 9 fractional digits
    Div { numerator: String, denominator: String },
    /// Human amount to base units
    Decimalize {
        amount: String,
        #[command(flatten)]
        precision: PrecisionArgs,
    },
    /// Base units to human amount
    Undecimalize {
        amount: String,
        #[command(flatten)]
        precision: PrecisionArgs,
    },
}

/// Pool snapshot given on the command line, a file, or both (flags win)
#[derive(Args, Debug, Clone, Default)]
pub struct PoolArgs {
    /// Pool snapshot file (TOML); defaults to `quote.pool_file`
    #[arg(long)]
    pub pool: Option<PathBuf>,

    #[arg(long, value_enum)]
    pub kind: Option<PoolKind>,

    #[arg(long)]
    pub bid_reserve: Option<String>,

    #[arg(long)]
    pub bid_lpt: Option<String>,

    #[arg(long)]
    pub ask_reserve: Option<String>,

    #[arg(long)]
    pub ask_lpt: Option<String>,

    /// Constant-product fee numerator
    #[arg(long)]
    pub fee: Option<String>,

    /// Constant-product fee denominator
    #[arg(long)]
    pub fee_decimals: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct PrecisionArgs {
    /// Decimals override; defaults to the configured decimals of `--side`
    #[arg(long)]
    pub decimals: Option<u32>,

    #[arg(long, value_enum, default_value_t = Side::Bid)]
    pub side: Side,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Side {
    #[default]
    Bid,
    Ask,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolKind {
    LptWeighted,
    ConstantProduct,
}
