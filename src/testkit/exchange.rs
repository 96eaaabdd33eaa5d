//! Mock collaborators for the exchange traits.
//!
//! - [`MockMarketData`]: settable order book and price, either can fail.
//! - [`ScriptedScoreFeed`]: pops scoreboards from a queue, repeating the last.
//! - [`RecordingOrderManager`]: fixed own order book, records every dispatch,
//!   can be told to fail cancel-all or reject placements.
//! - [`MockGateway`]: in-memory exchange account for [`OrderBookManager`]
//!   tests, tracking how many placements overlap.
//!
//! [`OrderBookManager`]: crate::orderbook::OrderBookManager

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::{
    Balances, MarketOrderBook, Order, OrderId, OrderType, OwnOrderBook, Price, ScoreBoard, TokenId,
};
use crate::error::{Error, ExecutionError, Result};
use crate::exchange::{BatchHandle, BatchReport, MarketData, OrderGateway, OrderManager, ScoreFeed};

// ---------------------------------------------------------------------------
// MockMarketData
// ---------------------------------------------------------------------------

/// Market data with a settable book and price. `None` makes the call fail.
pub struct MockMarketData {
    book: Mutex<Option<MarketOrderBook>>,
    price: Mutex<Option<Price>>,
    book_calls: AtomicU32,
    price_calls: AtomicU32,
}

impl MockMarketData {
    pub fn new(book: MarketOrderBook, price: Price) -> Self {
        Self {
            book: Mutex::new(Some(book)),
            price: Mutex::new(Some(price)),
            book_calls: AtomicU32::new(0),
            price_calls: AtomicU32::new(0),
        }
    }

    pub fn set_book(&self, book: Option<MarketOrderBook>) {
        *self.book.lock() = book;
    }

    pub fn set_price(&self, price: Option<Price>) {
        *self.price.lock() = price;
    }

    /// Total calls across both queries.
    pub fn calls(&self) -> u32 {
        self.book_calls.load(Ordering::SeqCst) + self.price_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MarketData for MockMarketData {
    async fn get_order_book(&self, token_id: &TokenId) -> Result<MarketOrderBook> {
        self.book_calls.fetch_add(1, Ordering::SeqCst);
        self.book
            .lock()
            .clone()
            .ok_or_else(|| Error::Connection(format!("no book for {token_id}")))
    }

    async fn get_price(&self, token_id: &TokenId) -> Result<Price> {
        self.price_calls.fetch_add(1, Ordering::SeqCst);
        (*self.price.lock())
            .ok_or_else(|| Error::Connection(format!("no price for {token_id}")))
    }
}

// ---------------------------------------------------------------------------
// ScriptedScoreFeed
// ---------------------------------------------------------------------------

/// Score feed replaying a fixed sequence.
///
/// Each call pops the next entry. Once the queue is empty the last popped
/// entry is repeated.
pub struct ScriptedScoreFeed {
    boards: Mutex<VecDeque<Option<ScoreBoard>>>,
    last: Mutex<Option<ScoreBoard>>,
    calls: AtomicU32,
}

impl ScriptedScoreFeed {
    pub fn new(boards: Vec<Option<ScoreBoard>>) -> Self {
        Self {
            boards: Mutex::new(boards.into()),
            last: Mutex::new(None),
            calls: AtomicU32::new(0),
        }
    }

    /// A feed that always reports `board`.
    pub fn fixed(board: ScoreBoard) -> Self {
        Self::new(vec![Some(board)])
    }

    pub fn push(&self, board: Option<ScoreBoard>) {
        self.boards.lock().push_back(board);
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ScoreFeed for ScriptedScoreFeed {
    async fn get_scoreboard(&self) -> Option<ScoreBoard> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut last = self.last.lock();
        if let Some(next) = self.boards.lock().pop_front() {
            *last = next;
        }
        last.clone()
    }
}

// ---------------------------------------------------------------------------
// RecordingOrderManager
// ---------------------------------------------------------------------------

/// One call made on a [`RecordingOrderManager`].
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    Place(Vec<Order>),
    Cancel(Vec<Order>),
    CancelAll,
    Refresh,
}

/// Order manager serving a settable snapshot and recording every call.
pub struct RecordingOrderManager {
    book: Mutex<Option<OwnOrderBook>>,
    dispatches: Mutex<Vec<Dispatch>>,
    fail_cancel_all: AtomicBool,
    reject_places: AtomicBool,
}

impl RecordingOrderManager {
    pub fn new(book: Option<OwnOrderBook>) -> Self {
        Self {
            book: Mutex::new(book),
            dispatches: Mutex::new(Vec::new()),
            fail_cancel_all: AtomicBool::new(false),
            reject_places: AtomicBool::new(false),
        }
    }

    /// Make `cancel_all_orders` return a connection error.
    pub fn fail_cancel_all(&self, fail: bool) {
        self.fail_cancel_all.store(fail, Ordering::SeqCst);
    }

    /// Report every placement as rejected.
    pub fn reject_places(&self, reject: bool) {
        self.reject_places.store(reject, Ordering::SeqCst);
    }

    pub fn set_book(&self, book: Option<OwnOrderBook>) {
        *self.book.lock() = book;
    }

    pub fn dispatches(&self) -> Vec<Dispatch> {
        self.dispatches.lock().clone()
    }

    /// Every order handed to `place_orders`, flattened.
    pub fn placed(&self) -> Vec<Order> {
        self.dispatches
            .lock()
            .iter()
            .filter_map(|d| match d {
                Dispatch::Place(orders) => Some(orders.clone()),
                _ => None,
            })
            .flatten()
            .collect()
    }

    /// Every order handed to `cancel_orders`, flattened.
    pub fn cancelled(&self) -> Vec<Order> {
        self.dispatches
            .lock()
            .iter()
            .filter_map(|d| match d {
                Dispatch::Cancel(orders) => Some(orders.clone()),
                _ => None,
            })
            .flatten()
            .collect()
    }
}

#[async_trait]
impl OrderManager for RecordingOrderManager {
    fn get_order_book(&self) -> Option<OwnOrderBook> {
        self.book.lock().clone()
    }

    fn place_orders(&self, orders: Vec<Order>) -> BatchHandle {
        let report = if self.reject_places.load(Ordering::SeqCst) {
            BatchReport {
                succeeded: 0,
                failed: orders.len(),
            }
        } else {
            BatchReport {
                succeeded: orders.len(),
                failed: 0,
            }
        };
        self.dispatches.lock().push(Dispatch::Place(orders));
        BatchHandle::completed(report)
    }

    fn cancel_orders(&self, orders: Vec<Order>) -> BatchHandle {
        let report = BatchReport {
            succeeded: orders.len(),
            failed: 0,
        };
        self.dispatches.lock().push(Dispatch::Cancel(orders));
        BatchHandle::completed(report)
    }

    async fn cancel_all_orders(&self) -> Result<()> {
        self.dispatches.lock().push(Dispatch::CancelAll);
        if self.fail_cancel_all.load(Ordering::SeqCst) {
            return Err(Error::Connection("cancel-all refused".into()));
        }
        if let Some(book) = self.book.lock().as_mut() {
            book.orders.clear();
        }
        Ok(())
    }

    async fn refresh(&self) -> Result<OwnOrderBook> {
        self.dispatches.lock().push(Dispatch::Refresh);
        self.book
            .lock()
            .clone()
            .ok_or_else(|| Error::DataUnavailable("no scripted order book".into()))
    }
}

// ---------------------------------------------------------------------------
// MockGateway
// ---------------------------------------------------------------------------

/// In-memory exchange account.
///
/// Placed GTC orders rest until cancelled; FOK orders fill immediately.
/// `place_delay` stretches every placement so overlapping batches would be
/// observable through [`MockGateway::max_concurrent_places`].
pub struct MockGateway {
    orders: Mutex<Vec<Order>>,
    balances: Mutex<Balances>,
    next_id: AtomicU64,
    place_delay: Duration,
    reject_places: AtomicBool,
    active_places: AtomicUsize,
    max_active_places: AtomicUsize,
    cancel_all_calls: AtomicU32,
}

impl MockGateway {
    pub fn new(balances: Balances) -> Self {
        Self {
            orders: Mutex::new(Vec::new()),
            balances: Mutex::new(balances),
            next_id: AtomicU64::new(1),
            place_delay: Duration::ZERO,
            reject_places: AtomicBool::new(false),
            active_places: AtomicUsize::new(0),
            max_active_places: AtomicUsize::new(0),
            cancel_all_calls: AtomicU32::new(0),
        }
    }

    pub fn with_place_delay(mut self, delay: Duration) -> Self {
        self.place_delay = delay;
        self
    }

    pub fn reject_places(&self, reject: bool) {
        self.reject_places.store(reject, Ordering::SeqCst);
    }

    pub fn set_balances(&self, balances: Balances) {
        *self.balances.lock() = balances;
    }

    /// Orders resting on the mock exchange.
    pub fn resting(&self) -> Vec<Order> {
        self.orders.lock().clone()
    }

    pub fn max_concurrent_places(&self) -> usize {
        self.max_active_places.load(Ordering::SeqCst)
    }

    pub fn cancel_all_calls(&self) -> u32 {
        self.cancel_all_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OrderGateway for MockGateway {
    async fn get_orders(&self) -> Result<Vec<Order>> {
        Ok(self.orders.lock().clone())
    }

    async fn get_balances(&self) -> Result<Balances> {
        Ok(*self.balances.lock())
    }

    async fn place(&self, order: &Order) -> Result<OrderId> {
        let active = self.active_places.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_active_places.fetch_max(active, Ordering::SeqCst);
        if !self.place_delay.is_zero() {
            tokio::time::sleep(self.place_delay).await;
        }
        self.active_places.fetch_sub(1, Ordering::SeqCst);

        if self.reject_places.load(Ordering::SeqCst) {
            return Err(ExecutionError::OrderRejected(format!("rejected {order}")).into());
        }

        let id = OrderId::new(format!("order-{}", self.next_id.fetch_add(1, Ordering::SeqCst)));
        if order.order_type == OrderType::Gtc {
            self.orders.lock().push(order.clone().with_id(id.clone()));
        }
        Ok(id)
    }

    async fn cancel(&self, order_id: &OrderId) -> Result<()> {
        let mut orders = self.orders.lock();
        let before = orders.len();
        orders.retain(|o| o.id.as_ref() != Some(order_id));
        if orders.len() == before {
            return Err(ExecutionError::CancelFailed {
                order_id: order_id.to_string(),
                reason: "unknown order".into(),
            }
            .into());
        }
        Ok(())
    }

    async fn cancel_all(&self) -> Result<()> {
        self.cancel_all_calls.fetch_add(1, Ordering::SeqCst);
        self.orders.lock().clear();
        Ok(())
    }

    fn exchange_name(&self) -> &'static str {
        "mock"
    }
}
