//! Order book types for market depth representation.
//!
//! This module provides types for representing order book state:
//!
//! - [`OrderBookEntry`] - A single price level with size
//! - [`MarketOrderBook`] - The public book of the market's primary token
//!
//! # Order Book Structure
//!
//! An order book has two sides:
//! - **Bids**: Buy orders, sorted by price descending (best bid first)
//! - **Asks**: Sell orders, sorted by price ascending (best ask first)
//!
//! # Examples
//!
//! ```
//! use courtside::domain::{MarketOrderBook, OrderBookEntry};
//! use rust_decimal_macros::dec;
//!
//! let book = MarketOrderBook::new(
//!     vec![
//!         OrderBookEntry::new(dec!(0.44), dec!(200)),
//!         OrderBookEntry::new(dec!(0.45), dec!(100)),
//!     ],
//!     vec![OrderBookEntry::new(dec!(0.46), dec!(150))],
//! );
//!
//! assert_eq!(book.bids()[0].price(), dec!(0.45));
//! assert_eq!(book.asks()[0].price(), dec!(0.46));
//! ```

use serde::{Deserialize, Serialize};

use super::money::{complement, Price, Volume};

/// A single price level in an order book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBookEntry {
    price: Price,
    size: Volume,
}

impl OrderBookEntry {
    /// Creates a new price level.
    #[must_use]
    pub const fn new(price: Price, size: Volume) -> Self {
        Self { price, size }
    }

    /// Returns the price at this level.
    #[must_use]
    pub const fn price(&self) -> Price {
        self.price
    }

    /// Returns the total volume available at this level.
    #[must_use]
    pub const fn size(&self) -> Volume {
        self.size
    }

    /// The same level seen from the complementary outcome (price `1 - p`).
    #[must_use]
    pub fn complemented(&self) -> Self {
        Self::new(complement(self.price), self.size)
    }
}

/// Public order book of one token, best prices first on both sides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketOrderBook {
    bids: Vec<OrderBookEntry>,
    asks: Vec<OrderBookEntry>,
}

impl MarketOrderBook {
    /// Build a book from unsorted levels. Bids end up descending, asks ascending.
    #[must_use]
    pub fn new(mut bids: Vec<OrderBookEntry>, mut asks: Vec<OrderBookEntry>) -> Self {
        bids.sort_by(|a, b| b.price.cmp(&a.price));
        asks.sort_by(|a, b| a.price.cmp(&b.price));
        Self { bids, asks }
    }

    /// A book with no levels, used when the exchange fetch fails.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn bids(&self) -> &[OrderBookEntry] {
        &self.bids
    }

    #[must_use]
    pub fn asks(&self) -> &[OrderBookEntry] {
        &self.asks
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }

    /// Split into `(bids, asks)`.
    #[must_use]
    pub fn into_levels(self) -> (Vec<OrderBookEntry>, Vec<OrderBookEntry>) {
        (self.bids, self.asks)
    }
}
