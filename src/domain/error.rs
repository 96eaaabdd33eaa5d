//! Domain validation errors for core domain types.
//!
//! These errors are returned when an order intent cannot be sent to the
//! exchange as-is.
//!
//! # Examples
//!
//! ```
//! use courtside::domain::error::DomainError;
//! use courtside::domain::{Order, OrderType, Side, Token};
//! use rust_decimal_macros::dec;
//!
//! let order = Order::new(dec!(0), dec!(0.5), Side::Buy, Token::A, OrderType::Gtc);
//!
//! assert!(matches!(order.validate(), Err(DomainError::NonPositiveSize { .. })));
//! ```

use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Order sizes must be strictly positive.
    #[error("size must be positive, got {size}")]
    NonPositiveSize {
        /// The invalid size that was provided.
        size: rust_decimal::Decimal,
    },

    /// Prices must lie in the closed unit interval.
    #[error("price {price} outside [0, 1]")]
    PriceOutOfRange {
        /// The invalid price that was provided.
        price: rust_decimal::Decimal,
    },
}
