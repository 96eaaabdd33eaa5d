//! Per-tick market snapshot with derived statistics.
//!
//! Only token A's book and price are stored. Token B is the complement of A,
//! so its price is `1 - price(A)` and its book is synthesized on demand:
//! a token-A ask at `p` is a token-B bid at `1 - p` and vice versa.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::book::{MarketOrderBook, OrderBookEntry};
use super::money::{complement, Price};
use super::order::Side;
use super::own_book::OwnOrderBook;
use super::token::Token;

/// Immutable snapshot of the market and the account at one tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketState {
    timestamp: DateTime<Utc>,
    price_a: Price,
    bids: Vec<OrderBookEntry>,
    asks: Vec<OrderBookEntry>,
    own_orders: OwnOrderBook,
}

impl MarketState {
    /// Assemble a snapshot from token A's price and public book.
    #[must_use]
    pub fn new(
        timestamp: DateTime<Utc>,
        price_a: Price,
        book: MarketOrderBook,
        own_orders: OwnOrderBook,
    ) -> Self {
        let (bids, asks) = book.into_levels();
        Self {
            timestamp,
            price_a,
            bids,
            asks,
            own_orders,
        }
    }

    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    #[must_use]
    pub const fn own_orders(&self) -> &OwnOrderBook {
        &self.own_orders
    }

    /// Last traded price of an outcome.
    #[must_use]
    pub fn price(&self, token: Token) -> Price {
        match token {
            Token::A => self.price_a,
            Token::B => complement(self.price_a),
        }
    }

    /// Highest token-A bid.
    #[must_use]
    pub fn best_bid(&self) -> Option<Price> {
        self.bids.iter().map(OrderBookEntry::price).max()
    }

    /// Lowest token-A ask.
    #[must_use]
    pub fn best_ask(&self) -> Option<Price> {
        self.asks.iter().map(OrderBookEntry::price).min()
    }

    /// Token-A mid price, when both sides are quoted.
    #[must_use]
    pub fn mid(&self) -> Option<Price> {
        Some((self.best_bid()? + self.best_ask()?) / Decimal::TWO)
    }

    /// Token-A spread, when both sides are quoted.
    #[must_use]
    pub fn spread(&self) -> Option<Price> {
        Some(self.best_ask()? - self.best_bid()?)
    }

    /// Mid price of an outcome.
    #[must_use]
    pub fn mid_price(&self, token: Token) -> Option<Price> {
        let mid = self.mid()?;
        Some(match token {
            Token::A => mid,
            Token::B => complement(mid),
        })
    }

    /// Bids oriented for `token`, best first.
    #[must_use]
    pub fn get_bids(&self, token: Token) -> Vec<OrderBookEntry> {
        match token {
            Token::A => self.bids.clone(),
            Token::B => self.asks.iter().map(OrderBookEntry::complemented).collect(),
        }
    }

    /// Asks oriented for `token`, best first.
    #[must_use]
    pub fn get_asks(&self, token: Token) -> Vec<OrderBookEntry> {
        match token {
            Token::A => self.asks.clone(),
            Token::B => self.bids.iter().map(OrderBookEntry::complemented).collect(),
        }
    }

    /// Highest bid for `token`.
    #[must_use]
    pub fn max_bid(&self, token: Token) -> Option<Price> {
        match token {
            Token::A => self.best_bid(),
            Token::B => self.best_ask().map(complement),
        }
    }

    /// Lowest ask for `token`.
    #[must_use]
    pub fn min_ask(&self, token: Token) -> Option<Price> {
        match token {
            Token::A => self.best_ask(),
            Token::B => self.best_bid().map(complement),
        }
    }

    /// The price an aggressive order on `side` would trade at.
    ///
    /// BUY takes the best ask, SELL hits the best bid. `None` when that side
    /// of the book is empty.
    #[must_use]
    pub fn get_best_limit_price(&self, token: Token, side: Side) -> Option<Price> {
        match side {
            Side::Buy => self.min_ask(token),
            Side::Sell => self.max_bid(token),
        }
    }
}
