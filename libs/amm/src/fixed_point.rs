//! Fixed-point division of unbounded integers
//!
//! Produces a quotient with exactly [`DIV_FRACTION_DIGITS`] fractional digits
//! using schoolbook long division on the remainder, so the fraction is exact to
//! the last digit regardless of operand size. Digits past the ninth are
//! truncated.

use crate::error::{OracleError, Result};
use crate::precision::pow10;
use crate::scaling::undecimalize;
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::Zero;
use rust_decimal::Decimal;

/// Fractional digits carried by [`div`]
pub const DIV_FRACTION_DIGITS: u32 = 9;

/// `numerator / denominator` with 9 fractional digits
///
/// A zero numerator short-circuits to zero before the denominator is looked at.
pub fn div(numerator: &BigUint, denominator: &BigUint) -> Result<Decimal> {
    if numerator.is_zero() {
        return Ok(Decimal::ZERO);
    }
    if denominator.is_zero() {
        return Err(OracleError::DivisionByZero { context: "div denominator" });
    }

    let (integer, mut remainder) = numerator.div_rem(denominator);
    let mut fraction = BigUint::zero();
    for _ in 0..DIV_FRACTION_DIGITS {
        remainder *= 10u32;
        let (digit, rest) = remainder.div_rem(denominator);
        fraction = fraction * 10u32 + digit;
        remainder = rest;
    }

    let scaled = integer * pow10(DIV_FRACTION_DIGITS) + fraction;
    undecimalize(&scaled, DIV_FRACTION_DIGITS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn big(v: u128) -> BigUint {
        BigUint::from(v)
    }

    #[test]
    fn test_div_vector() {
        assert_eq!(div(&big(123), &big(456)).unwrap(), dec!(0.269736842));
    }

    #[test]
    fn test_div_zero_numerator() {
        assert_eq!(div(&big(0), &big(7)).unwrap(), Decimal::ZERO);
        assert_eq!(div(&big(0), &big(0)).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_div_by_zero() {
        let err = div(&big(1), &big(0)).unwrap_err();
        assert!(matches!(err, OracleError::DivisionByZero { .. }));
    }

    #[test]
    fn test_div_truncates_ninth_digit() {
        // 2/3 = 0.666666666|6...
        assert_eq!(div(&big(2), &big(3)).unwrap(), dec!(0.666666666));
        assert_eq!(div(&big(10), &big(4)).unwrap(), dec!(2.5));
    }

    #[test]
    fn test_div_large_operands() {
        // Operands beyond u128, quotient still exact to 9 digits
        let denominator = pow10(40) * 3u32;
        let numerator = pow10(40) * 10u32;
        assert_eq!(div(&numerator, &denominator).unwrap(), dec!(3.333333333));
    }
}
