//! Pool trait definitions for unified swap quoting

use crate::constant_product::{ConstantProductMath, FeeSchedule};
use crate::curve::PoolState;
use crate::error::{OracleError, Result};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

/// Pool type identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PoolType {
    /// Reserves weighted by LPT supply, priced by the bonding curve
    LptWeighted,
    /// Plain `x * y = k`
    ConstantProduct,
}

/// Unified pool interface for swap quoting
pub trait AmmPool {
    /// Ask amount received for depositing `bid_amount`
    fn amount_out(&self, bid_amount: &BigUint) -> Result<BigUint>;

    /// Bid amount required to withdraw `ask_amount`
    fn amount_in(&self, ask_amount: &BigUint) -> Result<BigUint>;

    /// Current `(bid, ask)` reserves
    fn reserves(&self) -> (&BigUint, &BigUint);

    fn pool_type(&self) -> PoolType;
}

impl AmmPool for PoolState {
    fn amount_out(&self, bid_amount: &BigUint) -> Result<BigUint> {
        let new_ask_reserve = self.quote_ask(&(&self.bid_reserve + bid_amount))?;
        // Curve is monotone, so a deposit never raises the ask reserve
        Ok(&self.ask_reserve - new_ask_reserve.min(self.ask_reserve.clone()))
    }

    fn amount_in(&self, ask_amount: &BigUint) -> Result<BigUint> {
        if ask_amount >= &self.ask_reserve {
            return Err(OracleError::invalid(
                "ask_amount",
                "insufficient liquidity: output must be below the ask reserve",
            ));
        }
        let new_bid_reserve = self.quote_bid(&(&self.ask_reserve - ask_amount))?;
        Ok(new_bid_reserve.max(self.bid_reserve.clone()) - &self.bid_reserve)
    }

    fn reserves(&self) -> (&BigUint, &BigUint) {
        (&self.bid_reserve, &self.ask_reserve)
    }

    fn pool_type(&self) -> PoolType {
        PoolType::LptWeighted
    }
}

/// Constant-product pool snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstantProductPool {
    pub bid_reserve: BigUint,
    pub ask_reserve: BigUint,
    pub fee: FeeSchedule,
}

impl AmmPool for ConstantProductPool {
    fn amount_out(&self, bid_amount: &BigUint) -> Result<BigUint> {
        ConstantProductMath::amount_out(bid_amount, &self.bid_reserve, &self.ask_reserve, &self.fee)
    }

    fn amount_in(&self, ask_amount: &BigUint) -> Result<BigUint> {
        ConstantProductMath::amount_in(ask_amount, &self.bid_reserve, &self.ask_reserve, &self.fee)
    }

    fn reserves(&self) -> (&BigUint, &BigUint) {
        (&self.bid_reserve, &self.ask_reserve)
    }

    fn pool_type(&self) -> PoolType {
        PoolType::ConstantProduct
    }
}
