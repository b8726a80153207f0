//! Conversion between human-readable amounts and integer base units
//!
//! On-ledger balances are integers in the token's smallest unit. A token with
//! `decimals = 9` stores `1.1` as `1_100_000_000`. Conversions are exact in both
//! directions whenever the target type can hold the value; `Decimal` carries at
//! most 28 fractional digits and a 96-bit mantissa, so undecimalizing very
//! large or very fine values drops the least significant digits.

use crate::error::{OracleError, Result};
use crate::precision::pow10;
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{ToPrimitive, Zero};
use rust_decimal::Decimal;
use tracing::trace;

/// Largest fractional scale a `Decimal` can carry
pub const MAX_DECIMAL_SCALE: u32 = 28;

/// Scale a human amount into base units, rounding half up to the nearest unit
pub fn decimalize(amount: Decimal, decimals: u32) -> Result<BigUint> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(OracleError::invalid("amount", "must not be negative"));
    }

    let mantissa = BigUint::from(amount.mantissa().unsigned_abs());
    let scale = amount.scale();

    if decimals >= scale {
        return Ok(mantissa * pow10(decimals - scale));
    }
    Ok(round_half_up(&mantissa, &pow10(scale - decimals)))
}

/// Same as [`decimalize`] but parses an unsigned decimal string of any length
///
/// Accepts `"12"`, `"12.5"`, `".5"` and `"12."`. Signs, exponents and digit
/// separators are rejected.
pub fn decimalize_str(input: &str, decimals: u32) -> Result<BigUint> {
    let trimmed = input.trim();
    let (int_part, frac_part) = trimmed.split_once('.').unwrap_or((trimmed, ""));

    if frac_part.contains('.') {
        return Err(OracleError::invalid("amount", "more than one decimal point"));
    }
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(OracleError::invalid("amount", "empty amount"));
    }
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(int_part) || !all_digits(frac_part) {
        return Err(OracleError::invalid(
            "amount",
            "expected an unsigned decimal number",
        ));
    }

    let decimals = decimals as usize;
    let kept = &frac_part[..frac_part.len().min(decimals)];
    let padding = "0".repeat(decimals - kept.len());
    let digits = format!("{int_part}{kept}{padding}");

    let mut value = if digits.is_empty() {
        BigUint::zero()
    } else {
        BigUint::parse_bytes(digits.as_bytes(), 10)
            .ok_or_else(|| OracleError::invalid("amount", "expected an unsigned decimal number"))?
    };

    // First dropped digit decides the rounding direction
    if frac_part.len() > decimals && frac_part.as_bytes()[decimals] >= b'5' {
        value += 1u32;
    }
    Ok(value)
}

/// Scale base units back into a human amount
pub fn undecimalize(amount: &BigUint, decimals: u32) -> Result<Decimal> {
    let mut mantissa = amount.clone();
    let mut scale = decimals;

    if scale > MAX_DECIMAL_SCALE {
        let dropped = scale - MAX_DECIMAL_SCALE;
        // Every digit falls past the representable scale
        if u64::from(dropped) >= amount.to_str_radix(10).len() as u64 {
            trace!(decimals, "undecimalize truncated every digit");
            return Ok(Decimal::ZERO);
        }
        mantissa /= pow10(dropped);
        scale = MAX_DECIMAL_SCALE;
    }

    loop {
        if let Some(m) = mantissa.to_i128() {
            if let Ok(value) = Decimal::try_from_i128_with_scale(m, scale) {
                if scale < decimals {
                    trace!(decimals, scale, "undecimalize truncated fractional digits");
                }
                return Ok(value);
            }
        }
        if scale == 0 {
            return Err(OracleError::PrecisionOverflow {
                context: format!("{amount} at {decimals} decimals exceeds the decimal range"),
            });
        }
        mantissa /= 10u32;
        scale -= 1;
    }
}

fn round_half_up(value: &BigUint, divisor: &BigUint) -> BigUint {
    let (quotient, remainder) = value.div_rem(divisor);
    if remainder * 2u32 >= *divisor {
        quotient + 1u32
    } else {
        quotient
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_decimalize() {
        assert_eq!(decimalize(dec!(1.1), 9).unwrap(), BigUint::from(1_100_000_000u64));
        assert_eq!(
            decimalize(dec!(5000000000), 9).unwrap(),
            BigUint::from(5_000_000_000_000_000_000u64)
        );
        assert_eq!(decimalize(dec!(0), 9).unwrap(), BigUint::zero());
    }

    #[test]
    fn test_decimalize_rounds_to_nearest() {
        assert_eq!(decimalize(dec!(1.23456), 3).unwrap(), BigUint::from(1235u32));
        assert_eq!(decimalize(dec!(1.23449), 3).unwrap(), BigUint::from(1234u32));
        assert_eq!(decimalize(dec!(0.5), 0).unwrap(), BigUint::from(1u32));
    }

    #[test]
    fn test_decimalize_rejects_negative() {
        let err = decimalize(dec!(-1), 9).unwrap_err();
        assert!(matches!(err, OracleError::InvalidInput { field: "amount", .. }));
    }

    #[test]
    fn test_decimalize_str() {
        assert_eq!(decimalize_str("1.1", 9).unwrap(), BigUint::from(1_100_000_000u64));
        assert_eq!(decimalize_str(".5", 2).unwrap(), BigUint::from(50u32));
        assert_eq!(decimalize_str("7.", 1).unwrap(), BigUint::from(70u32));
        assert_eq!(decimalize_str("1.23456", 3).unwrap(), BigUint::from(1235u32));
        assert_eq!(decimalize_str("0.4", 0).unwrap(), BigUint::zero());

        // Beyond both u128 and Decimal range
        let big = decimalize_str("123456789012345678901234567890123456789.5", 1).unwrap();
        assert_eq!(big.to_string(), "1234567890123456789012345678901234567895");
    }

    #[test]
    fn test_decimalize_str_rejects_malformed() {
        for bad in ["", ".", "1.2.3", "-1", "1e9", "1_000", "abc"] {
            assert!(decimalize_str(bad, 9).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn test_undecimalize() {
        assert_eq!(
            undecimalize(&BigUint::from(5_000_123_456_789u64), 9).unwrap(),
            dec!(5000.123456789)
        );
        assert_eq!(undecimalize(&BigUint::from(42u32), 9).unwrap(), dec!(0.000000042));
        assert_eq!(undecimalize(&BigUint::from(42u32), 0).unwrap(), dec!(42));
    }

    #[test]
    fn test_undecimalize_truncates_beyond_decimal_scale() {
        // 0.999992333366555496444502555504111137 at 36 digits
        let raw = BigUint::parse_bytes(b"999992333366555496444502555504111137", 10).unwrap();
        assert_eq!(
            undecimalize(&raw, 36).unwrap(),
            dec!(0.9999923333665554964445025555)
        );
    }

    #[test]
    fn test_undecimalize_huge_decimals_is_zero() {
        assert_eq!(undecimalize(&BigUint::from(1u32), u32::MAX).unwrap(), Decimal::ZERO);
        assert_eq!(undecimalize(&BigUint::from(999u32), 31).unwrap(), Decimal::ZERO);
        assert_eq!(undecimalize(&BigUint::zero(), 4_000_000_000).unwrap(), Decimal::ZERO);
        // One digit left after dropping the excess scale
        assert_eq!(
            undecimalize(&BigUint::from(1234u32), 31).unwrap(),
            Decimal::from_i128_with_scale(1, 28)
        );
    }

    #[test]
    fn test_undecimalize_overflow() {
        let huge = pow10(40);
        let err = undecimalize(&huge, 0).unwrap_err();
        assert!(matches!(err, OracleError::PrecisionOverflow { .. }));

        // Integer part fits once the fraction is dropped
        let value = undecimalize(&pow10(40), 20).unwrap();
        assert_eq!(value, dec!(100000000000000000000));
    }

    #[test]
    fn test_round_trip() {
        for raw in [0u64, 1, 999_999_999, 1_100_000_000, 5_000_123_456_789, u64::MAX] {
            let x = BigUint::from(raw);
            let human = undecimalize(&x, 9).unwrap();
            assert_eq!(decimalize(human, 9).unwrap(), x);
        }
    }
}
