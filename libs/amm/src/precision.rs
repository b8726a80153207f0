//! Fixed-point precision scales and big-integer helpers
//!
//! The curve carries fractional accuracy through integer-only arithmetic by
//! scaling intermediates with one of two units:
//!
//! - **Single precision**: `10^18`
//! - **Double precision**: `10^36`
//!
//! Every scale factor in the engine goes through [`Precision`] so that a value
//! is never multiplied or reduced by the wrong unit.

use crate::error::{OracleError, Result};
use num_bigint::{BigInt, BigUint};
use num_integer::Roots;
use num_traits::{One, Zero};
use once_cell::sync::Lazy;

pub const SINGLE_PRECISION_DIGITS: u32 = 18;
pub const DOUBLE_PRECISION_DIGITS: u32 = 36;

static SINGLE_UNIT: Lazy<BigInt> = Lazy::new(|| BigInt::from(pow10(SINGLE_PRECISION_DIGITS)));
static DOUBLE_UNIT: Lazy<BigInt> = Lazy::new(|| BigInt::from(pow10(DOUBLE_PRECISION_DIGITS)));

/// Scale of a fixed-point intermediate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Precision {
    Single,
    Double,
}

impl Precision {
    /// Number of implied fractional decimal digits
    pub fn digits(self) -> u32 {
        match self {
            Self::Single => SINGLE_PRECISION_DIGITS,
            Self::Double => DOUBLE_PRECISION_DIGITS,
        }
    }

    /// The unit (`10^digits`) representing 1.0 at this scale
    pub fn unit(self) -> &'static BigInt {
        match self {
            Self::Single => &*SINGLE_UNIT,
            Self::Double => &*DOUBLE_UNIT,
        }
    }

    /// `value * unit / divisor`, truncating toward zero
    pub fn scaled_div(self, value: &BigInt, divisor: &BigInt, context: &'static str) -> Result<BigInt> {
        checked_div(&(value * self.unit()), divisor, context)
    }

    /// Removes one factor of this unit from `value`
    pub fn reduce(self, value: &BigInt) -> BigInt {
        value / self.unit()
    }
}

/// Truncating signed division that reports a zero divisor instead of panicking
pub fn checked_div(numerator: &BigInt, denominator: &BigInt, context: &'static str) -> Result<BigInt> {
    if denominator.is_zero() {
        return Err(OracleError::DivisionByZero { context });
    }
    Ok(numerator / denominator)
}

/// `floor(sqrt(n))`
pub fn isqrt(n: &BigUint) -> BigUint {
    if n < &BigUint::from(2u8) {
        return n.clone();
    }
    Roots::sqrt(n)
}

/// `10^exp` as an unbounded integer
pub fn pow10(exp: u32) -> BigUint {
    if exp == 0 {
        return BigUint::one();
    }
    BigUint::from(10u8).pow(exp)
}
