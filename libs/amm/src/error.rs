//! Error types for oracle arithmetic
//!
//! Every failure is detected synchronously where the bad value is first seen.
//! No operation returns a partial result.

use thiserror::Error;

/// Errors raised by the pricing engine
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OracleError {
    /// A denominator (raw or derived from pool state) is zero
    #[error("Division by zero: {context}")]
    DivisionByZero { context: &'static str },

    /// A reserve, LPT supply or amount is outside the domain of the curve
    #[error("Invalid input `{field}`: {reason}")]
    InvalidInput {
        field: &'static str,
        reason: &'static str,
    },

    /// A value cannot be represented in the requested output type
    #[error("Precision overflow: {context}")]
    PrecisionOverflow { context: String },
}

impl OracleError {
    pub(crate) fn invalid(field: &'static str, reason: &'static str) -> Self {
        Self::InvalidInput { field, reason }
    }
}

pub type Result<T> = std::result::Result<T, OracleError>;
