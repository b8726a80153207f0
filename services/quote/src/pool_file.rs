//! Pool snapshots from TOML files and command-line flags
//!
//! Amounts are written as decimal strings because reserves routinely exceed
//! the TOML integer range:
//!
//! ```toml
//! kind = "lpt_weighted"
//! bid_reserve = "1000000000000000"
//! bid_lpt = "2000000000000000000"
//! ask_reserve = "300000000000000000"
//! ask_lpt = "300000000000000000"
//!
//! [fee]
//! fee = "2500000"
//! fee_decimals = "1000000000"
//! ```

use crate::cli::{PoolArgs, PoolKind};
use anyhow::{anyhow, Context, Result};
use sen_amm::{AmmPool, BigUint, ConstantProductPool, FeeSchedule, PoolState};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct PoolFile {
    pub kind: Option<PoolKind>,
    pub bid_reserve: Option<String>,
    pub bid_lpt: Option<String>,
    pub ask_reserve: Option<String>,
    pub ask_lpt: Option<String>,
    pub fee: Option<FeeFile>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct FeeFile {
    pub fee: String,
    pub fee_decimals: String,
}

impl PoolFile {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read pool file {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse pool file {:?}", path))
    }

    /// Flags take precedence over file values
    pub fn merge(mut self, args: &PoolArgs) -> Self {
        if args.kind.is_some() {
            self.kind = args.kind;
        }
        let overrides = [
            (&mut self.bid_reserve, &args.bid_reserve),
            (&mut self.bid_lpt, &args.bid_lpt),
            (&mut self.ask_reserve, &args.ask_reserve),
            (&mut self.ask_lpt, &args.ask_lpt),
        ];
        for (slot, flag) in overrides {
            if flag.is_some() {
                *slot = flag.clone();
            }
        }
        if let (Some(fee), Some(fee_decimals)) = (&args.fee, &args.fee_decimals) {
            self.fee = Some(FeeFile {
                fee: fee.clone(),
                fee_decimals: fee_decimals.clone(),
            });
        }
        self
    }

    pub fn kind(&self) -> PoolKind {
        self.kind.unwrap_or(PoolKind::LptWeighted)
    }

    pub fn to_pool_state(&self) -> Result<PoolState> {
        Ok(PoolState::new(
            required(&self.bid_reserve, "bid_reserve")?,
            required(&self.bid_lpt, "bid_lpt")?,
            required(&self.ask_reserve, "ask_reserve")?,
            required(&self.ask_lpt, "ask_lpt")?,
        ))
    }

    pub fn to_constant_product(&self) -> Result<ConstantProductPool> {
        let fee = match &self.fee {
            Some(fee) => FeeSchedule::new(
                parse_amount(&fee.fee, "fee")?,
                parse_amount(&fee.fee_decimals, "fee_decimals")?,
            )?,
            None => FeeSchedule::zero(),
        };
        Ok(ConstantProductPool {
            bid_reserve: required(&self.bid_reserve, "bid_reserve")?,
            ask_reserve: required(&self.ask_reserve, "ask_reserve")?,
            fee,
        })
    }

    pub fn to_amm_pool(&self) -> Result<Box<dyn AmmPool>> {
        let pool: Box<dyn AmmPool> = match self.kind() {
            PoolKind::LptWeighted => Box::new(self.to_pool_state()?),
            PoolKind::ConstantProduct => Box::new(self.to_constant_product()?),
        };
        Ok(pool)
    }
}

/// Load the pool from `--pool`, else the configured default file, then apply flags
pub fn resolve(args: &PoolArgs, default_file: Option<&Path>) -> Result<PoolFile> {
    let file = match args.pool.as_deref().or(default_file) {
        Some(path) => {
            debug!("Loading pool snapshot from {:?}", path);
            PoolFile::load(path)?
        }
        None => PoolFile::default(),
    };
    Ok(file.merge(args))
}

/// Parse a base-unit integer of any size
pub fn parse_amount(raw: &str, field: &str) -> Result<BigUint> {
    BigUint::from_str(raw.trim())
        .map_err(|e| anyhow!("Invalid {} {:?}: {}", field, raw, e))
}

fn required(value: &Option<String>, field: &str) -> Result<BigUint> {
    let raw = value.as_deref().ok_or_else(|| {
        anyhow!(
            "Missing {} (pass --{} or set it in the pool file)",
            field,
            field.replace('_', "-")
        )
    })?;
    parse_amount(raw, field)
}
