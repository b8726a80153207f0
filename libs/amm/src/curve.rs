//! LPT-weighted bonding curve with exact integer arithmetic
//!
//! A deposit grows the driving side's reserve by a factor `a = new / old`. The
//! counter side then shrinks by the factor `beta` that keeps the two sides'
//! LPT-weighted values balanced:
//!
//! ```text
//! lambda * (1/beta - beta) = a - 1/a        lambda = counter_lpt / driving_lpt
//! ```
//!
//! Rearranged this is the quadratic `beta^2 + b*beta - 1 = 0` with
//! `b = (a - 1/a) / lambda`, whose non-negative root is
//! `beta = (sqrt(b^2 + 4) - b) / 2`. Since `sqrt(b^2 + 4) >= |b|` the root is
//! never negative, whichever sign `b` has.
//!
//! The forward curve drives with the bid side and solves for the ask reserve.
//! The inverse curve is the same solve with the sides swapped, which is why
//! both go through [`CurveMath::solve`].

use crate::error::{OracleError, Result};
use crate::precision::{checked_div, isqrt, Precision};
use num_bigint::{BigInt, BigUint};
use num_traits::Zero;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Snapshot of a pool's reserves and LPT supplies, in base units
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolState {
    pub bid_reserve: BigUint,
    pub bid_lpt: BigUint,
    pub ask_reserve: BigUint,
    pub ask_lpt: BigUint,
}

/// Which side of the pool receives the reserve change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CurveDirection {
    /// Bid reserve changes, ask reserve is solved for
    Forward,
    /// Ask reserve changes, bid reserve is solved for
    Inverse,
}

impl CurveDirection {
    fn new_reserve_field(self) -> &'static str {
        match self {
            Self::Forward => "new_bid_reserve",
            Self::Inverse => "new_ask_reserve",
        }
    }
}

/// Intermediate and final values of one curve solve
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurveSolution {
    /// `old / new` driving reserve, double precision
    pub alpha: BigInt,
    /// Counter-side reserve factor, single precision
    pub beta: BigInt,
    /// New counter-side reserve in base units
    pub reserve: BigUint,
}

struct Side<'a> {
    reserve: &'a BigUint,
    lpt: &'a BigUint,
}

/// Bonding-curve math over unbounded integers
pub struct CurveMath;

impl CurveMath {
    /// `reserve / new_reserve` in double precision
    pub fn alpha(new_reserve: &BigUint, reserve: &BigUint) -> Result<BigInt> {
        Precision::Double.scaled_div(
            &BigInt::from(reserve.clone()),
            &BigInt::from(new_reserve.clone()),
            "alpha",
        )
    }

    /// `new_reserve / reserve` in double precision
    pub fn inverse_alpha(new_reserve: &BigUint, reserve: &BigUint) -> Result<BigInt> {
        Precision::Double.scaled_div(
            &BigInt::from(new_reserve.clone()),
            &BigInt::from(reserve.clone()),
            "inverse alpha",
        )
    }

    /// `counter_lpt / driving_lpt` in single precision
    pub fn lambda(driving_lpt: &BigUint, counter_lpt: &BigUint) -> Result<BigInt> {
        Precision::Single.scaled_div(
            &BigInt::from(counter_lpt.clone()),
            &BigInt::from(driving_lpt.clone()),
            "lambda",
        )
    }

    /// Solve the quadratic for `(alpha, beta)`
    pub fn beta(
        new_reserve: &BigUint,
        reserve: &BigUint,
        driving_lpt: &BigUint,
        counter_lpt: &BigUint,
    ) -> Result<(BigInt, BigInt)> {
        let alpha = Self::alpha(new_reserve, reserve)?;
        let inverse_alpha = Self::inverse_alpha(new_reserve, reserve)?;
        let lambda = Self::lambda(driving_lpt, counter_lpt)?;

        // Double / single leaves b in single precision
        let b = checked_div(&(inverse_alpha - &alpha), &lambda, "lambda")?;
        let delta = &b * &b + Precision::Double.unit() * 4u32;
        let root = BigInt::from(isqrt(delta.magnitude()));
        let beta = (root - &b) / 2u32;

        trace!(%alpha, %lambda, %b, %beta, "curve quadratic solved");
        Ok((alpha, beta))
    }

    /// Full solve in the given direction
    ///
    /// All reserves, LPT supplies and the new driving reserve must be positive.
    pub fn solve(
        direction: CurveDirection,
        new_reserve: &BigUint,
        bid_reserve: &BigUint,
        bid_lpt: &BigUint,
        ask_reserve: &BigUint,
        ask_lpt: &BigUint,
    ) -> Result<CurveSolution> {
        let inputs = [
            (direction.new_reserve_field(), new_reserve),
            ("bid_reserve", bid_reserve),
            ("bid_lpt", bid_lpt),
            ("ask_reserve", ask_reserve),
            ("ask_lpt", ask_lpt),
        ];
        for (field, value) in inputs {
            if value.is_zero() {
                debug!(field, ?direction, "rejecting zero curve input");
                return Err(OracleError::invalid(field, "must be positive"));
            }
        }

        let bid = Side {
            reserve: bid_reserve,
            lpt: bid_lpt,
        };
        let ask = Side {
            reserve: ask_reserve,
            lpt: ask_lpt,
        };
        let (driving, counter) = match direction {
            CurveDirection::Forward => (bid, ask),
            CurveDirection::Inverse => (ask, bid),
        };

        let (alpha, beta) = Self::beta(new_reserve, driving.reserve, driving.lpt, counter.lpt)?;
        let scaled = BigInt::from(counter.reserve.clone()) * &beta;
        let reserve = Precision::Single
            .reduce(&scaled)
            .to_biguint()
            .ok_or_else(|| OracleError::PrecisionOverflow {
                context: format!("negative curve root {beta}"),
            })?;

        Ok(CurveSolution {
            alpha,
            beta,
            reserve,
        })
    }
}

impl PoolState {
    pub fn new(bid_reserve: BigUint, bid_lpt: BigUint, ask_reserve: BigUint, ask_lpt: BigUint) -> Self {
        Self {
            bid_reserve,
            bid_lpt,
            ask_reserve,
            ask_lpt,
        }
    }

    /// The same pool seen from the other side of the trade
    pub fn flipped(&self) -> Self {
        Self {
            bid_reserve: self.ask_reserve.clone(),
            bid_lpt: self.ask_lpt.clone(),
            ask_reserve: self.bid_reserve.clone(),
            ask_lpt: self.bid_lpt.clone(),
        }
    }

    pub fn solve(&self, direction: CurveDirection, new_reserve: &BigUint) -> Result<CurveSolution> {
        CurveMath::solve(
            direction,
            new_reserve,
            &self.bid_reserve,
            &self.bid_lpt,
            &self.ask_reserve,
            &self.ask_lpt,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(v: u128) -> BigUint {
        BigUint::from(v)
    }

    fn sample_pool() -> PoolState {
        PoolState::new(
            big(1_000_000_000_000_000),
            big(2_000_000_000_000_000_000),
            big(300_000_000_000_000_000),
            big(300_000_000_000_000_000),
        )
    }

    #[test]
    fn test_forward_solution() {
        let pool = sample_pool();
        let solution = pool
            .solve(CurveDirection::Forward, &big(1_000_001_000_000_000))
            .unwrap();

        assert_eq!(solution.reserve, big(299_998_000_007_666_658));
        assert_eq!(solution.beta, BigInt::from(999_993_333_358_888_863u64));
        assert_eq!(
            solution.alpha,
            BigInt::from(999_999_000_000_999_999_000_000_999_999_000_000u128)
        );
    }

    #[test]
    fn test_inverse_solution_recovers_bid_reserve() {
        let pool = sample_pool();
        let solution = pool
            .solve(CurveDirection::Inverse, &big(299_998_000_007_666_658))
            .unwrap();
        assert_eq!(solution.reserve, big(1_000_001_000_000_000));
    }

    #[test]
    fn test_inverse_equals_forward_on_flipped_pool() {
        let pool = sample_pool();
        let new_ask = big(250_000_000_000_000_000);
        let inverse = pool.solve(CurveDirection::Inverse, &new_ask).unwrap();
        let flipped = pool.flipped().solve(CurveDirection::Forward, &new_ask).unwrap();
        assert_eq!(inverse, flipped);
    }

    #[test]
    fn test_no_change_is_identity() {
        let pool = sample_pool();
        let forward = pool.solve(CurveDirection::Forward, &pool.bid_reserve).unwrap();
        assert_eq!(forward.reserve, pool.ask_reserve);
        assert_eq!(&forward.beta, Precision::Single.unit());

        let inverse = pool.solve(CurveDirection::Inverse, &pool.ask_reserve).unwrap();
        assert_eq!(inverse.reserve, pool.bid_reserve);
    }

    #[test]
    fn test_withdrawal_grows_counter_reserve() {
        let pool = sample_pool();
        let solution = pool
            .solve(CurveDirection::Forward, &big(900_000_000_000_000))
            .unwrap();
        assert!(solution.reserve > pool.ask_reserve);
    }

    #[test]
    fn test_zero_inputs_rejected() {
        let pool = sample_pool();
        let err = pool.solve(CurveDirection::Forward, &big(0)).unwrap_err();
        assert_eq!(
            err,
            OracleError::InvalidInput {
                field: "new_bid_reserve",
                reason: "must be positive"
            }
        );

        let err = pool.solve(CurveDirection::Inverse, &big(0)).unwrap_err();
        assert!(matches!(err, OracleError::InvalidInput { field: "new_ask_reserve", .. }));

        for field in ["bid_reserve", "bid_lpt", "ask_reserve", "ask_lpt"] {
            let mut broken = pool.clone();
            match field {
                "bid_reserve" => broken.bid_reserve = big(0),
                "bid_lpt" => broken.bid_lpt = big(0),
                "ask_reserve" => broken.ask_reserve = big(0),
                _ => broken.ask_lpt = big(0),
            }
            let err = broken
                .solve(CurveDirection::Forward, &big(1_000_001_000_000_000))
                .unwrap_err();
            assert!(
                matches!(err, OracleError::InvalidInput { field: f, .. } if f == field),
                "{field}: {err:?}"
            );
        }
    }

    #[test]
    fn test_lambda_below_precision_is_division_by_zero() {
        // ask_lpt / bid_lpt < 10^-18 rounds lambda to zero
        let pool = PoolState::new(big(1_000), big(10u128.pow(30)), big(1_000), big(1));
        let err = pool.solve(CurveDirection::Forward, &big(2_000)).unwrap_err();
        assert_eq!(err, OracleError::DivisionByZero { context: "lambda" });
    }
}
