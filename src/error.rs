//! Error types for Ladder Book.
//!
//! Only conditions detected *before* any book state is touched are
//! reported as errors. Broken internal invariants panic instead.

use thiserror::Error;

use crate::types::Side;

/// Result type alias for book operations.
pub type Result<T> = std::result::Result<T, BookError>;

/// Recoverable errors raised at the edges of the engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookError {
    /// `BookConfig` failed validation
    #[error("invalid book config: {0}")]
    InvalidConfig(String),

    /// Price falls outside `[0, max_price)`
    #[error("price {price} outside domain [0, {max_price})")]
    PriceOutOfDomain { price: u64, max_price: u64 },

    /// Limit order submitted with zero quantity
    #[error("order {0} has zero quantity")]
    ZeroQuantity(u64),

    /// An order with this id is already resting
    #[error("order {0} is already resting")]
    DuplicateOrderId(u64),

    /// `WorkloadConfig` failed validation
    #[error("invalid workload: {0}")]
    InvalidWorkload(String),

    /// Book state check failed
    #[error("{side:?} book inconsistent: {detail}")]
    Inconsistent { side: Side, detail: String },
}

impl BookError {
    /// Shorthand for an `Inconsistent` error.
    pub fn inconsistent(side: Side, detail: impl Into<String>) -> Self {
        BookError::Inconsistent {
            side,
            detail: detail.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BookError::PriceOutOfDomain {
            price: 250,
            max_price: 200,
        };
        assert_eq!(err.to_string(), "price 250 outside domain [0, 200)");

        let err = BookError::inconsistent(Side::Sell, "volume 5 != 7");
        assert_eq!(err.to_string(), "Sell book inconsistent: volume 5 != 7");
    }
}
