//! Background-maintained view of the account's orders and balances.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::RwLock;
use tokio::sync::{watch, Mutex, Notify};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::domain::{Balances, Order, OrderType, OwnOrderBook};
use crate::error::{Error, Result};
use crate::exchange::{BatchHandle, BatchReport, OrderGateway, OrderManager};

/// Last fetched account state.
#[derive(Debug, Clone, Default)]
struct Snapshot {
    orders: Vec<Order>,
    balances: Balances,
}

struct Inner {
    gateway: Arc<dyn OrderGateway>,
    snapshot: RwLock<Option<Snapshot>>,
    place_lock: Mutex<()>,
    cancel_lock: Mutex<()>,
    pending_places: AtomicUsize,
    pending_cancels: AtomicUsize,
    /// Signalled whenever a batch finishes.
    batch_done: Notify,
}

impl Inner {
    async fn refresh(&self) -> Result<OwnOrderBook> {
        let (orders, balances) =
            tokio::try_join!(self.gateway.get_orders(), self.gateway.get_balances())?;
        *self.snapshot.write() = Some(Snapshot { orders, balances });
        self.view()
            .ok_or_else(|| Error::DataUnavailable("order book snapshot".into()))
    }

    fn view(&self) -> Option<OwnOrderBook> {
        let snapshot = self.snapshot.read();
        snapshot.as_ref().map(|s| {
            OwnOrderBook::new(
                s.orders.clone(),
                s.balances,
                self.pending_places.load(Ordering::SeqCst) > 0,
                self.pending_cancels.load(Ordering::SeqCst) > 0,
            )
        })
    }

    fn has_pending_batches(&self) -> bool {
        self.pending_places.load(Ordering::SeqCst) > 0
            || self.pending_cancels.load(Ordering::SeqCst) > 0
    }

    /// Wait until every spawned batch, running or queued, has finished.
    async fn drain(&self) {
        loop {
            let notified = self.batch_done.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();
            if !self.has_pending_batches() {
                return;
            }
            debug!("Waiting for outstanding order batches");
            notified.await;
        }
    }

    async fn place_batch(&self, orders: Vec<Order>) -> BatchReport {
        let report = {
            let _guard = self.place_lock.lock().await;
            let mut report = BatchReport::default();

            for order in orders {
                if let Err(e) = order.validate() {
                    warn!(error = %e, %order, "Refusing to submit invalid order");
                    report.failed += 1;
                    continue;
                }
                match self.gateway.place(&order).await {
                    Ok(id) => {
                        debug!(order_id = %id, %order, "Order placed");
                        // FOK orders fill or die immediately and never rest.
                        if order.order_type == OrderType::Gtc {
                            if let Some(snapshot) = self.snapshot.write().as_mut() {
                                snapshot.orders.push(order.with_id(id));
                            }
                        }
                        report.succeeded += 1;
                    }
                    Err(e) => {
                        warn!(error = %e, %order, "Failed to place order");
                        report.failed += 1;
                    }
                }
            }

            info!(
                placed = report.succeeded,
                failed = report.failed,
                exchange = self.gateway.exchange_name(),
                "Placement batch finished"
            );
            report
        };
        self.pending_places.fetch_sub(1, Ordering::SeqCst);
        self.batch_done.notify_waiters();
        report
    }

    async fn cancel_batch(&self, orders: Vec<Order>) -> BatchReport {
        let report = {
            let _guard = self.cancel_lock.lock().await;
            let mut report = BatchReport::default();

            for order in orders {
                let Some(id) = order.id.as_ref() else {
                    warn!(%order, "Cannot cancel order without exchange id");
                    report.failed += 1;
                    continue;
                };
                match self.gateway.cancel(id).await {
                    Ok(()) => {
                        debug!(order_id = %id, "Order cancelled");
                        if let Some(snapshot) = self.snapshot.write().as_mut() {
                            snapshot.orders.retain(|o| o.id.as_ref() != Some(id));
                        }
                        report.succeeded += 1;
                    }
                    Err(e) => {
                        warn!(error = %e, order_id = %id, "Failed to cancel order");
                        report.failed += 1;
                    }
                }
            }

            info!(
                cancelled = report.succeeded,
                failed = report.failed,
                exchange = self.gateway.exchange_name(),
                "Cancellation batch finished"
            );
            report
        };
        self.pending_cancels.fetch_sub(1, Ordering::SeqCst);
        self.batch_done.notify_waiters();
        report
    }
}

/// [`OrderManager`] backed by an [`OrderGateway`].
///
/// A background task polls orders and balances; place and cancel batches run
/// on their own tasks, one batch of each kind at a time. Further batches
/// queue behind the running one.
#[derive(Clone)]
pub struct OrderBookManager {
    inner: Arc<Inner>,
    refresh_interval: Duration,
}

impl OrderBookManager {
    #[must_use]
    pub fn new(gateway: Arc<dyn OrderGateway>, refresh_interval: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                gateway,
                snapshot: RwLock::new(None),
                place_lock: Mutex::new(()),
                cancel_lock: Mutex::new(()),
                pending_places: AtomicUsize::new(0),
                pending_cancels: AtomicUsize::new(0),
                batch_done: Notify::new(),
            }),
            refresh_interval,
        }
    }

    /// Spawn the polling task. It stops once `shutdown` flips to `true` or
    /// its sender is dropped.
    pub fn start(&self, mut shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        let inner = Arc::clone(&self.inner);
        let period = self.refresh_interval;

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    result = shutdown.changed() => {
                        if result.is_err() || *shutdown.borrow() {
                            debug!("Order book poller stopping");
                            break;
                        }
                    }
                    _ = interval.tick() => {
                        if let Err(e) = inner.refresh().await {
                            warn!(error = %e, "Failed to refresh own order book");
                        }
                    }
                }
            }
        })
    }
}

#[async_trait]
impl OrderManager for OrderBookManager {
    fn get_order_book(&self) -> Option<OwnOrderBook> {
        self.inner.view()
    }

    fn place_orders(&self, orders: Vec<Order>) -> BatchHandle {
        if orders.is_empty() {
            return BatchHandle::completed(BatchReport::default());
        }
        self.inner.pending_places.fetch_add(1, Ordering::SeqCst);
        let size = orders.len();
        let inner = Arc::clone(&self.inner);
        BatchHandle::spawned(tokio::spawn(async move { inner.place_batch(orders).await }), size)
    }

    fn cancel_orders(&self, orders: Vec<Order>) -> BatchHandle {
        if orders.is_empty() {
            return BatchHandle::completed(BatchReport::default());
        }
        self.inner.pending_cancels.fetch_add(1, Ordering::SeqCst);
        let size = orders.len();
        let inner = Arc::clone(&self.inner);
        BatchHandle::spawned(tokio::spawn(async move { inner.cancel_batch(orders).await }), size)
    }

    async fn cancel_all_orders(&self) -> Result<()> {
        self.inner.drain().await;
        let _place = self.inner.place_lock.lock().await;
        let _cancel = self.inner.cancel_lock.lock().await;
        self.inner.gateway.cancel_all().await?;
        if let Some(snapshot) = self.inner.snapshot.write().as_mut() {
            snapshot.orders.clear();
        }
        info!(exchange = self.inner.gateway.exchange_name(), "Cancelled all orders");
        Ok(())
    }

    async fn refresh(&self) -> Result<OwnOrderBook> {
        self.inner.refresh().await
    }
}
