//! Constant-product (`x * y = k`) quoting with a proportional fee
//!
//! Integer-exact counterpart of the classic AMM formulas for pools that do not
//! weight their sides by LPT supply. The pool keeps `k` from rounding against
//! it: the raw output is `ask_reserve` minus the floored post-trade ask reserve,
//! the raw input is the floored post-trade bid reserve minus `bid_reserve`.

use crate::error::{OracleError, Result};
use num_bigint::BigUint;
use num_traits::Zero;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Proportional fee `fee / fee_decimals`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSchedule {
    pub fee: BigUint,
    pub fee_decimals: BigUint,
}

impl FeeSchedule {
    pub fn new(fee: BigUint, fee_decimals: BigUint) -> Result<Self> {
        let schedule = Self { fee, fee_decimals };
        schedule.validate()?;
        Ok(schedule)
    }

    /// A schedule that charges nothing
    pub fn zero() -> Self {
        Self {
            fee: BigUint::zero(),
            fee_decimals: BigUint::from(1u32),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.fee_decimals.is_zero() {
            return Err(OracleError::DivisionByZero {
                context: "fee decimals",
            });
        }
        if self.fee >= self.fee_decimals {
            return Err(OracleError::invalid("fee", "must be below fee decimals"));
        }
        Ok(())
    }

    fn kept(&self) -> BigUint {
        &self.fee_decimals - &self.fee
    }
}

/// Constant-product swap math
pub struct ConstantProductMath;

impl ConstantProductMath {
    /// Ask amount released for `bid_amount`, before fees
    pub fn amount_out_raw(
        bid_amount: &BigUint,
        bid_reserve: &BigUint,
        ask_reserve: &BigUint,
    ) -> Result<BigUint> {
        require_reserves(bid_reserve, ask_reserve)?;

        let k = bid_reserve * ask_reserve;
        let new_ask_reserve = k / (bid_reserve + bid_amount);
        Ok(ask_reserve - new_ask_reserve)
    }

    /// Bid amount required to release `ask_amount`, before fees
    pub fn amount_in_raw(
        ask_amount: &BigUint,
        bid_reserve: &BigUint,
        ask_reserve: &BigUint,
    ) -> Result<BigUint> {
        require_reserves(bid_reserve, ask_reserve)?;
        if ask_amount >= ask_reserve {
            debug!(%ask_amount, %ask_reserve, "requested output drains the pool");
            return Err(OracleError::invalid(
                "ask_amount",
                "insufficient liquidity: output must be below the ask reserve",
            ));
        }

        let k = bid_reserve * ask_reserve;
        let new_bid_reserve = k / (ask_reserve - ask_amount);
        Ok(new_bid_reserve - bid_reserve)
    }

    /// Ask amount released for `bid_amount` after the fee is withheld
    pub fn amount_out(
        bid_amount: &BigUint,
        bid_reserve: &BigUint,
        ask_reserve: &BigUint,
        fee: &FeeSchedule,
    ) -> Result<BigUint> {
        fee.validate()?;
        let raw = Self::amount_out_raw(bid_amount, bid_reserve, ask_reserve)?;
        Ok(raw * fee.kept() / &fee.fee_decimals)
    }

    /// Bid amount required to release `ask_amount` once the fee is paid
    pub fn amount_in(
        ask_amount: &BigUint,
        bid_reserve: &BigUint,
        ask_reserve: &BigUint,
        fee: &FeeSchedule,
    ) -> Result<BigUint> {
        fee.validate()?;
        let raw = Self::amount_in_raw(ask_amount, bid_reserve, ask_reserve)?;
        Ok(raw * &fee.fee_decimals / fee.kept())
    }
}

fn require_reserves(bid_reserve: &BigUint, ask_reserve: &BigUint) -> Result<()> {
    if bid_reserve.is_zero() {
        return Err(OracleError::invalid("bid_reserve", "must be positive"));
    }
    if ask_reserve.is_zero() {
        return Err(OracleError::invalid("ask_reserve", "must be positive"));
    }
    Ok(())
}
