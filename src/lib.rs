//! Courtside - score-driven front-running on binary prediction markets.
//!
//! The engine watches a live game score and the order book of a two-outcome
//! market (away team = token A, home team = token B). When the score margin
//! swings sharply it buys the favored side before the market reprices, then
//! flattens the position after a fixed delay.
//!
//! # Architecture
//!
//! - **`domain`** - Exchange-agnostic types: tokens, orders, books, market
//!   and score snapshots
//!   - `domain::strategy` - Strategy trait and the `FrontRunStrategy` state
//!     machine
//! - **`exchange`** - Collaborator traits: market data, order gateway, score
//!   feed, order manager
//! - **`orderbook`** - `OrderBookManager`, the background-polled view of the
//!   account's orders and balances
//! - **`app`** - Reconciliation tick, run loop, shutdown, audit trail and
//!   backtest replay
//! - **`cli`** - Command-line handlers for the `courtside` binary
//!
//! # Example
//!
//! ```
//! use courtside::domain::strategy::{FrontRunConfig, FrontRunStrategy, Strategy, ThresholdComparator};
//! use rust_decimal_macros::dec;
//!
//! let strategy = FrontRunStrategy::new(FrontRunConfig {
//!     order_size: dec!(10),
//!     reset_delay_secs: 60,
//!     diff_pct_threshold: dec!(0.5),
//!     threshold_comparator: ThresholdComparator::Gte,
//!     min_diff_in_diff: 2,
//!     strict: true,
//!     flatten_price: dec!(0.01),
//! });
//! assert_eq!(strategy.name(), "front_run");
//! assert!(strategy.pending_reset().is_none());
//! ```

pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod exchange;
pub mod orderbook;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
