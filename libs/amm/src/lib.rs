//! # SenSwap AMM Oracle - Integer-Exact Bonding-Curve Pricing
//!
//! ## Purpose
//!
//! Deterministic pricing engine for two-sided pools whose sides are weighted by
//! their liquidity-provider-token (LPT) supplies. Given a pool snapshot and a
//! proposed reserve change it computes the counter-side reserve (forward and
//! inverse curve), a slippage estimate and the effective exchange rate. All
//! arithmetic runs on unbounded integers; nothing touches floating point.
//!
//! ## Integration Points
//!
//! - **Input Sources**: Reserve and LPT-supply snapshots read by swap and
//!   farming transaction builders
//! - **Output Destinations**: Instruction builders (proposed counter amounts)
//!   and user interfaces (slippage, price)
//! - **Precision**: Single (`10^18`) and double (`10^36`) fixed-point scales,
//!   9-digit fixed-point division for displayed ratios
//!
//! ## Architecture Role
//!
//! Pure function library: no I/O, no shared state, identical inputs give
//! bit-identical outputs on every thread. Callers own snapshot freshness.
//!
//! See [`architecture_diagram()`] for the data flow.
//!
//! ## Example
//!
//! ```rust
//! use sen_amm::{BigUint, Oracle, PoolState};
//!
//! let pool = PoolState::new(
//!     BigUint::from(1_000_000_000_000_000u64),
//!     BigUint::from(2_000_000_000_000_000_000u64),
//!     BigUint::from(300_000_000_000_000_000u64),
//!     BigUint::from(300_000_000_000_000_000u64),
//! );
//! let new_bid = BigUint::from(1_000_001_000_000_000u64);
//!
//! let new_ask = Oracle::curve(
//!     &new_bid,
//!     &pool.bid_reserve,
//!     &pool.bid_lpt,
//!     &pool.ask_reserve,
//!     &pool.ask_lpt,
//! )
//! .unwrap();
//! assert_eq!(new_ask, BigUint::from(299_998_000_007_666_658u64));
//! assert_eq!(pool.quote_bid(&new_ask).unwrap(), new_bid);
//! ```

pub mod constant_product;
pub mod curve;
pub mod error;
pub mod fixed_point;
pub mod oracle;
pub mod pool_traits;
pub mod precision;
pub mod scaling;

pub use constant_product::{ConstantProductMath, FeeSchedule};
pub use curve::{CurveDirection, CurveMath, CurveSolution, PoolState};
pub use error::{OracleError, Result};
pub use fixed_point::{div, DIV_FRACTION_DIGITS};
pub use oracle::Oracle;
pub use pool_traits::{AmmPool, ConstantProductPool, PoolType};
pub use precision::{isqrt, Precision, DOUBLE_PRECISION_DIGITS, SINGLE_PRECISION_DIGITS};
pub use scaling::{decimalize, decimalize_str, undecimalize};

/// Common types for oracle calculations
pub use num_bigint::BigUint;
pub use rust_decimal::Decimal;
pub use rust_decimal_macros::dec;

/// Architecture diagram showing the oracle's data flow
#[cfg_attr(doc, aquamarine::aquamarine)]
/// ```mermaid
/// graph LR
///     subgraph Input["📊 Pool Snapshot"]
///         BR[Bid Reserve]
///         BL[Bid LPT]
///         AR[Ask Reserve]
///         AL[Ask LPT]
///         ND[Proposed Reserve]
///     end
///
///     subgraph Engine["🧮 Curve Engine"]
///         PC[Precision Scales]
///         FW[Forward Solve]
///         IV[Inverse Solve]
///         SQ[Integer Sqrt]
///     end
///
///     subgraph Facade["📐 Oracle"]
///         CU[curve]
///         IC[inverse_curve]
///         SL[slippage]
///         RA[ratio]
///     end
///
///     subgraph Output["🎯 Callers"]
///         TX[Instruction Builders]
///         UI[Quote Display]
///     end
///
///     BR --> FW
///     BL --> FW
///     AR --> IV
///     AL --> IV
///     ND --> PC
///     PC --> FW
///     PC --> IV
///     SQ --> FW
///     SQ --> IV
///
///     FW --> CU
///     FW --> SL
///     FW --> RA
///     IV --> IC
///
///     CU --> TX
///     IC --> TX
///     SL --> UI
///     RA --> UI
///
///     style Input fill:#e1f5fe
///     style Engine fill:#fff3e0
///     style Facade fill:#f3e5f5
///     style Output fill:#e8f5e9
/// ```
pub fn architecture_diagram() {
    // This function exists solely for documentation purposes
    // The diagram is rendered by aquamarine in rustdoc
}
