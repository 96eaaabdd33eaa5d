//! Exchange trait definitions.
//!
//! These traits define the interfaces of the collaborators the engine
//! consumes: market data, order submission, the account's order book and the
//! live score feed. Concrete clients live outside this crate.

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tracing::warn;

use crate::domain::{
    Balances, MarketOrderBook, Order, OrderId, OwnOrderBook, Price, ScoreBoard, TokenId,
};
use crate::error::Result;

/// Public market data queries.
#[async_trait]
pub trait MarketData: Send + Sync {
    /// Public order book for one token.
    async fn get_order_book(&self, token_id: &TokenId) -> Result<MarketOrderBook>;

    /// Current price of one token, in `[0, 1]`.
    async fn get_price(&self, token_id: &TokenId) -> Result<Price>;
}

/// Account-level order submission and queries.
#[async_trait]
pub trait OrderGateway: Send + Sync {
    /// Open orders of the account on the traded market, with exchange ids.
    async fn get_orders(&self) -> Result<Vec<Order>>;

    /// Collateral and outcome token balances.
    async fn get_balances(&self) -> Result<Balances>;

    /// Submit an order, returning the id the exchange assigned.
    async fn place(&self, order: &Order) -> Result<OrderId>;

    /// Cancel an existing order.
    async fn cancel(&self, order_id: &OrderId) -> Result<()>;

    /// Cancel every open order of the account.
    async fn cancel_all(&self) -> Result<()>;

    /// Get the exchange name for logging/debugging.
    fn exchange_name(&self) -> &'static str;
}

/// Source of live score snapshots.
#[async_trait]
pub trait ScoreFeed: Send + Sync {
    /// Latest scoreboard, `None` on a transient failure.
    async fn get_scoreboard(&self) -> Option<ScoreBoard>;
}

/// How many orders of a batch the exchange accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchReport {
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.failed == 0
    }
}

/// Handle to an asynchronous place or cancel batch.
///
/// The reconciliation loop drops it (fire-and-forget); shutdown awaits it.
#[must_use = "drop explicitly to fire and forget"]
pub struct BatchHandle {
    task: Option<JoinHandle<BatchReport>>,
    size: usize,
}

impl BatchHandle {
    /// Wrap a spawned task handling `size` orders.
    pub fn spawned(task: JoinHandle<BatchReport>, size: usize) -> Self {
        Self {
            task: Some(task),
            size,
        }
    }

    /// A batch that already finished with `report`.
    pub fn completed(report: BatchReport) -> Self {
        Self {
            task: None,
            size: report.succeeded + report.failed,
        }
    }

    /// Wait for the batch to finish. A task that died counts every order as
    /// failed.
    pub async fn wait(self) -> BatchReport {
        let Some(task) = self.task else {
            return BatchReport {
                succeeded: self.size,
                failed: 0,
            };
        };
        match task.await {
            Ok(report) => report,
            Err(e) => {
                warn!(error = %e, "Order batch task failed");
                BatchReport {
                    succeeded: 0,
                    failed: self.size,
                }
            }
        }
    }
}

/// The account's live order book, maintained in the background.
///
/// Implementations run at most one placement batch and one cancellation
/// batch at a time.
#[async_trait]
pub trait OrderManager: Send + Sync {
    /// Latest snapshot, `None` until one has been fetched successfully.
    fn get_order_book(&self) -> Option<OwnOrderBook>;

    /// Place a batch of orders asynchronously.
    fn place_orders(&self, orders: Vec<Order>) -> BatchHandle;

    /// Cancel a batch of orders asynchronously.
    fn cancel_orders(&self, orders: Vec<Order>) -> BatchHandle;

    /// Cancel every open order and wait for the exchange to confirm.
    ///
    /// Batches already handed to `place_orders` or `cancel_orders` finish
    /// before the exchange-wide cancel is sent.
    async fn cancel_all_orders(&self) -> Result<()>;

    /// Fetch a fresh snapshot now instead of waiting for the next poll.
    async fn refresh(&self) -> Result<OwnOrderBook>;
}
