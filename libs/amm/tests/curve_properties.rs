//! Bonding-Curve Property Tests
//!
//! Mathematical properties that must hold for every pool snapshot, not just
//! the hand-picked vectors in the unit tests.

use num_bigint::BigUint;
use proptest::prelude::*;
use rust_decimal::Decimal;
use sen_amm::{decimalize, div, isqrt, undecimalize, Oracle, OracleError, PoolState};

/// Pool with comparable sides: reserves and LPT supplies within 2x of each other
fn balanced_pool() -> impl Strategy<Value = PoolState> {
    (
        1_000_000_000u64..1_000_000_000_000_000_000u64,
        1_000_000_000u64..1_000_000_000_000_000_000u64,
        50u64..=200,
        50u64..=200,
    )
        .prop_map(|(bid_reserve, bid_lpt, ask_pct, lpt_pct)| {
            PoolState::new(
                BigUint::from(bid_reserve),
                BigUint::from(bid_lpt),
                BigUint::from(bid_reserve) * ask_pct / 100u64,
                BigUint::from(bid_lpt) * lpt_pct / 100u64,
            )
        })
}

/// Any pool whose LPT ratio stays above single precision
fn any_pool() -> impl Strategy<Value = PoolState> {
    (1u64..u64::MAX, 1u32..u32::MAX, 1u64..u64::MAX, 1u32..u32::MAX).prop_map(
        |(bid_reserve, bid_lpt, ask_reserve, ask_lpt)| {
            PoolState::new(
                BigUint::from(bid_reserve),
                BigUint::from(bid_lpt),
                BigUint::from(ask_reserve),
                BigUint::from(ask_lpt),
            )
        },
    )
}

fn abs_diff(a: &BigUint, b: &BigUint) -> BigUint {
    if a >= b {
        a - b
    } else {
        b - a
    }
}

proptest! {
    #[test]
    fn prop_no_deposit_is_identity(pool in any_pool()) {
        let new_ask = pool.quote_ask(&pool.bid_reserve).unwrap();
        prop_assert_eq!(new_ask, pool.ask_reserve.clone());

        let new_bid = pool.quote_bid(&pool.ask_reserve).unwrap();
        prop_assert_eq!(new_bid, pool.bid_reserve.clone());
    }

    #[test]
    fn prop_curve_is_monotone(
        pool in balanced_pool(),
        first_permille in 0u64..=1000,
        second_permille in 0u64..=1000,
    ) {
        let (small, large) = if first_permille <= second_permille {
            (first_permille, second_permille)
        } else {
            (second_permille, first_permille)
        };
        let deposit = |permille: u64| &pool.bid_reserve + &pool.bid_reserve * permille / 1000u64;

        let ask_small = pool.quote_ask(&deposit(small)).unwrap();
        let ask_large = pool.quote_ask(&deposit(large)).unwrap();
        prop_assert!(ask_large <= ask_small);
        prop_assert!(ask_small <= pool.ask_reserve);
    }

    #[test]
    fn prop_round_trip_recovers_bid_reserve(
        pool in balanced_pool(),
        permille in 0u64..=100,
    ) {
        let new_bid = &pool.bid_reserve + &pool.bid_reserve * permille / 1000u64;
        let new_ask = pool.quote_ask(&new_bid).unwrap();
        let recovered = pool.quote_bid(&new_ask).unwrap();

        let drift = abs_diff(&recovered, &new_bid);
        prop_assert!(drift <= BigUint::from(32u32), "drift {} for {:?}", drift, pool);
    }

    #[test]
    fn prop_slippage_at_most_one_for_deposits(
        pool in balanced_pool(),
        permille in 0u64..=1000,
    ) {
        let new_bid = &pool.bid_reserve + &pool.bid_reserve * permille / 1000u64;
        let slippage = pool.slippage(&new_bid).unwrap();
        prop_assert!(slippage <= Decimal::ONE);
        prop_assert!(slippage >= Decimal::ZERO);
    }

    #[test]
    fn prop_zero_ask_lpt_is_invalid_input(pool in any_pool()) {
        let mut broken = pool;
        broken.ask_lpt = BigUint::from(0u32);
        let result = Oracle::curve(
            &broken.bid_reserve,
            &broken.bid_reserve,
            &broken.bid_lpt,
            &broken.ask_reserve,
            &broken.ask_lpt,
        );
        let is_invalid_input = matches!(result, Err(OracleError::InvalidInput { .. }));
        prop_assert!(is_invalid_input);
    }

    #[test]
    fn prop_isqrt_is_floor(n in any::<u128>()) {
        let n = BigUint::from(n);
        let root = isqrt(&n);
        let next = &root + 1u32;
        prop_assert!(&root * &root <= n);
        prop_assert!(&next * &next > n);
    }

    #[test]
    fn prop_isqrt_is_monotone(a in any::<u128>(), b in any::<u128>()) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(isqrt(&BigUint::from(lo)) <= isqrt(&BigUint::from(hi)));
    }

    #[test]
    fn prop_decimal_round_trip(raw in any::<u64>(), decimals in 0u32..=18) {
        let x = BigUint::from(raw);
        let human = undecimalize(&x, decimals).unwrap();
        prop_assert_eq!(decimalize(human, decimals).unwrap(), x);
    }

    #[test]
    fn prop_div_exact_multiples(a in 0u64..1_000_000_000_000, b in 1u64..u64::MAX) {
        let numerator = BigUint::from(a) * b;
        let quotient = div(&numerator, &BigUint::from(b)).unwrap();
        prop_assert_eq!(quotient, Decimal::from(a));
    }
}
