//! Command execution

use crate::cli::{Command, PrecisionArgs, Side};
use crate::pool_file::{parse_amount, resolve};
use anyhow::{bail, Context, Result};
use sen_amm::{decimalize_str, div, undecimalize, BigUint};
use sen_config::defaults::tokens::MAX_DECIMALS;
use sen_config::{OracleConfig, OutputFormat};
use serde::Serialize;
use std::fmt::Display;
use tracing::{info, warn};

/// Result of one command, renderable as text or JSON
#[derive(Debug, Serialize, PartialEq)]
pub struct QuoteOutput {
    pub operation: &'static str,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round_trip: Option<RoundTrip>,
}

/// Curve followed by inverse curve on the same snapshot
#[derive(Debug, Serialize, PartialEq)]
pub struct RoundTrip {
    pub recovered_bid_reserve: String,
    pub drift: String,
    pub tolerance: u64,
    pub within_tolerance: bool,
}

impl QuoteOutput {
    fn new(operation: &'static str, value: impl Display) -> Self {
        Self {
            operation,
            value: value.to_string(),
            round_trip: None,
        }
    }

    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => {
                let mut out = format!("{}: {}", self.operation, self.value);
                if let Some(rt) = &self.round_trip {
                    out.push_str(&format!(
                        "\nround trip: {} (drift {}, tolerance {}, {})",
                        rt.recovered_bid_reserve,
                        rt.drift,
                        rt.tolerance,
                        if rt.within_tolerance { "ok" } else { "EXCEEDED" }
                    ));
                }
                Ok(out)
            }
            OutputFormat::Json => {
                serde_json::to_string_pretty(self).context("Failed to serialize quote")
            }
        }
    }
}

pub fn execute(command: &Command, config: &OracleConfig) -> Result<QuoteOutput> {
    let default_pool = config.quote.pool_file.as_deref();

    match command {
        Command::Curve {
            new_bid_reserve,
            verify,
            pool,
        } => {
            let pool = resolve(pool, default_pool)?.to_pool_state()?;
            let new_bid = parse_amount(new_bid_reserve, "new_bid_reserve")?;
            let new_ask = pool.quote_ask(&new_bid)?;
            info!(%new_bid, %new_ask, "curve quoted");

            let mut output = QuoteOutput::new("curve", &new_ask);
            if *verify {
                let recovered = pool.quote_bid(&new_ask)?;
                let drift = if recovered >= new_bid {
                    &recovered - &new_bid
                } else {
                    &new_bid - &recovered
                };
                let tolerance = config.quote.round_trip_tolerance;
                let within_tolerance = drift <= BigUint::from(tolerance);
                if !within_tolerance {
                    warn!(%drift, tolerance, "curve round trip drifted beyond tolerance");
                }
                output.round_trip = Some(RoundTrip {
                    recovered_bid_reserve: recovered.to_string(),
                    drift: drift.to_string(),
                    tolerance,
                    within_tolerance,
                });
            }
            Ok(output)
        }
        Command::InverseCurve {
            new_ask_reserve,
            pool,
        } => {
            let pool = resolve(pool, default_pool)?.to_pool_state()?;
            let new_ask = parse_amount(new_ask_reserve, "new_ask_reserve")?;
            let new_bid = pool.quote_bid(&new_ask)?;
            info!(%new_ask, %new_bid, "inverse curve quoted");
            Ok(QuoteOutput::new("inverse_curve", new_bid))
        }
        Command::Slippage {
            new_bid_reserve,
            pool,
        } => {
            let pool = resolve(pool, default_pool)?.to_pool_state()?;
            let new_bid = parse_amount(new_bid_reserve, "new_bid_reserve")?;
            Ok(QuoteOutput::new("slippage", pool.slippage(&new_bid)?))
        }
        Command::Ratio {
            new_bid_reserve,
            pool,
        } => {
            let pool = resolve(pool, default_pool)?.to_pool_state()?;
            let new_bid = parse_amount(new_bid_reserve, "new_bid_reserve")?;
            Ok(QuoteOutput::new("ratio", pool.ratio(&new_bid)?))
        }
        Command::SwapOut { bid_amount, pool } => {
            let pool = resolve(pool, default_pool)?.to_amm_pool()?;
            let amount = parse_amount(bid_amount, "bid_amount")?;
            let out = pool.amount_out(&amount)?;
            info!(pool_type = ?pool.pool_type(), %amount, %out, "swap out quoted");
            Ok(QuoteOutput::new("swap_out", out))
        }
        Command::SwapIn { ask_amount, pool } => {
            let pool = resolve(pool, default_pool)?.to_amm_pool()?;
            let amount = parse_amount(ask_amount, "ask_amount")?;
            let input = pool.amount_in(&amount)?;
            info!(pool_type = ?pool.pool_type(), %amount, %input, "swap in quoted");
            Ok(QuoteOutput::new("swap_in", input))
        }
        Command::Div {
            numerator,
            denominator,
        } => {
            let numerator = parse_amount(numerator, "numerator")?;
            let denominator = parse_amount(denominator, "denominator")?;
            Ok(QuoteOutput::new("div", div(&numerator, &denominator)?))
        }
        Command::Decimalize { amount, precision } => {
            let decimals = decimals_for(precision, config)?;
            Ok(QuoteOutput::new("decimalize", decimalize_str(amount, decimals)?))
        }
        Command::Undecimalize { amount, precision } => {
            let decimals = decimals_for(precision, config)?;
            let raw = parse_amount(amount, "amount")?;
            Ok(QuoteOutput::new("undecimalize", undecimalize(&raw, decimals)?))
        }
    }
}

fn decimals_for(precision: &PrecisionArgs, config: &OracleConfig) -> Result<u32> {
    let decimals = precision.decimals.unwrap_or(match precision.side {
        Side::Bid => config.tokens.bid_decimals,
        Side::Ask => config.tokens.ask_decimals,
    });
    if decimals > MAX_DECIMALS {
        bail!("--decimals {} exceeds {}", decimals, MAX_DECIMALS);
    }
    Ok(decimals)
}
