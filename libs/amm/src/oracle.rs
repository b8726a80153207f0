//! Public pricing entry points
//!
//! Thin layer over [`CurveMath`] that validates pool snapshots, converts the
//! fixed-point intermediates into caller-facing values and exposes the four
//! quotes used by swap and farming front ends.

use crate::curve::{CurveDirection, CurveMath, PoolState};
use crate::error::{OracleError, Result};
use crate::fixed_point::div;
use crate::precision::Precision;
use crate::scaling::undecimalize;
use num_bigint::BigUint;
use rust_decimal::Decimal;

/// Bonding-curve quotes over raw pool figures
pub struct Oracle;

impl Oracle {
    /// New ask reserve after the bid reserve moves to `new_bid_reserve`
    pub fn curve(
        new_bid_reserve: &BigUint,
        bid_reserve: &BigUint,
        bid_lpt: &BigUint,
        ask_reserve: &BigUint,
        ask_lpt: &BigUint,
    ) -> Result<BigUint> {
        CurveMath::solve(
            CurveDirection::Forward,
            new_bid_reserve,
            bid_reserve,
            bid_lpt,
            ask_reserve,
            ask_lpt,
        )
        .map(|solution| solution.reserve)
    }

    /// New bid reserve after the ask reserve moves to `new_ask_reserve`
    pub fn inverse_curve(
        new_ask_reserve: &BigUint,
        bid_reserve: &BigUint,
        bid_lpt: &BigUint,
        ask_reserve: &BigUint,
        ask_lpt: &BigUint,
    ) -> Result<BigUint> {
        CurveMath::solve(
            CurveDirection::Inverse,
            new_ask_reserve,
            bid_reserve,
            bid_lpt,
            ask_reserve,
            ask_lpt,
        )
        .map(|solution| solution.reserve)
    }

    /// Price-impact estimate `alpha * beta` for a bid-side move
    ///
    /// `ask_reserve` is validated like every other input but does not enter
    /// the result: alpha and beta are both ratios, independent of the ask
    /// side's absolute depth.
    ///
    /// Returns [`OracleError::PrecisionOverflow`] when the value's integer
    /// part does not fit a [`Decimal`], as happens for extreme reserve moves.
    pub fn slippage(
        new_bid_reserve: &BigUint,
        bid_reserve: &BigUint,
        bid_lpt: &BigUint,
        ask_reserve: &BigUint,
        ask_lpt: &BigUint,
    ) -> Result<Decimal> {
        let solution = CurveMath::solve(
            CurveDirection::Forward,
            new_bid_reserve,
            bid_reserve,
            bid_lpt,
            ask_reserve,
            ask_lpt,
        )?;

        let alpha = Precision::Single.reduce(&solution.alpha);
        let product = (alpha * &solution.beta)
            .to_biguint()
            .ok_or_else(|| OracleError::PrecisionOverflow {
                context: "negative slippage product".to_string(),
            })?;
        undecimalize(&product, Precision::Double.digits())
    }

    /// Effective exchange rate `|delta ask| / |delta bid|` with 9 fractional digits
    ///
    /// A bid move of zero yields zero, following [`div`]'s zero-numerator rule
    /// (the ask side does not move either).
    ///
    /// Returns [`OracleError::PrecisionOverflow`] when the rate exceeds the
    /// [`Decimal`] range.
    pub fn ratio(
        new_bid_reserve: &BigUint,
        bid_reserve: &BigUint,
        bid_lpt: &BigUint,
        ask_reserve: &BigUint,
        ask_lpt: &BigUint,
    ) -> Result<Decimal> {
        let new_ask_reserve =
            Self::curve(new_bid_reserve, bid_reserve, bid_lpt, ask_reserve, ask_lpt)?;

        let unit = Precision::Single.unit().magnitude();
        let delta_ask = abs_diff(ask_reserve, &new_ask_reserve) * unit;
        let delta_bid = abs_diff(new_bid_reserve, bid_reserve) * unit;
        div(&delta_ask, &delta_bid)
    }
}

fn abs_diff(a: &BigUint, b: &BigUint) -> BigUint {
    if a >= b {
        a - b
    } else {
        b - a
    }
}

impl PoolState {
    /// New ask reserve for a bid reserve of `new_bid_reserve`
    pub fn quote_ask(&self, new_bid_reserve: &BigUint) -> Result<BigUint> {
        Oracle::curve(
            new_bid_reserve,
            &self.bid_reserve,
            &self.bid_lpt,
            &self.ask_reserve,
            &self.ask_lpt,
        )
    }

    /// New bid reserve for an ask reserve of `new_ask_reserve`
    pub fn quote_bid(&self, new_ask_reserve: &BigUint) -> Result<BigUint> {
        Oracle::inverse_curve(
            new_ask_reserve,
            &self.bid_reserve,
            &self.bid_lpt,
            &self.ask_reserve,
            &self.ask_lpt,
        )
    }

    pub fn slippage(&self, new_bid_reserve: &BigUint) -> Result<Decimal> {
        Oracle::slippage(
            new_bid_reserve,
            &self.bid_reserve,
            &self.bid_lpt,
            &self.ask_reserve,
            &self.ask_lpt,
        )
    }

    pub fn ratio(&self, new_bid_reserve: &BigUint) -> Result<Decimal> {
        Oracle::ratio(
            new_bid_reserve,
            &self.bid_reserve,
            &self.bid_lpt,
            &self.ask_reserve,
            &self.ask_lpt,
        )
    }
}
