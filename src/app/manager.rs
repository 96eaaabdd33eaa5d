//! One reconciliation tick: snapshot, decide, dispatch.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, error, info, warn};

use super::audit::{AuditTrail, TickRecord};
use crate::domain::strategy::Strategy;
use crate::domain::{Market, MarketOrderBook, MarketState, SportsStrategyState, MAX_DECIMALS};
use crate::error::Result;
use crate::exchange::{MarketData, OrderManager, ScoreFeed};

/// Why a tick stopped before reaching the strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    /// No own order book snapshot has been fetched yet.
    OwnOrdersUnavailable,
    /// The price feed failed.
    PriceUnavailable,
    /// The score feed had nothing to report.
    ScoreUnavailable,
}

impl fmt::Display for AbortReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbortReason::OwnOrdersUnavailable => write!(f, "own orders unavailable"),
            AbortReason::PriceUnavailable => write!(f, "price unavailable"),
            AbortReason::ScoreUnavailable => write!(f, "scoreboard unavailable"),
        }
    }
}

/// Result of one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The tick stopped early and emitted nothing.
    Aborted(AbortReason),
    /// The strategy ran; counts of intents handed to the order manager.
    Completed { placed: usize, cancelled: usize },
}

/// Feeds the strategy a consistent market, account and score snapshot.
pub struct StrategyManager {
    market: Market,
    market_data: Arc<dyn MarketData>,
    score_feed: Arc<dyn ScoreFeed>,
    order_manager: Arc<dyn OrderManager>,
    strategy: Box<dyn Strategy>,
    audit: Option<AuditTrail>,
    sequence: u64,
}

impl StrategyManager {
    #[must_use]
    pub fn new(
        market: Market,
        market_data: Arc<dyn MarketData>,
        score_feed: Arc<dyn ScoreFeed>,
        order_manager: Arc<dyn OrderManager>,
        strategy: Box<dyn Strategy>,
    ) -> Self {
        Self {
            market,
            market_data,
            score_feed,
            order_manager,
            strategy,
            audit: None,
            sequence: 0,
        }
    }

    /// Record every completed tick to `audit`.
    #[must_use]
    pub fn with_audit(mut self, audit: AuditTrail) -> Self {
        self.audit = Some(audit);
        self
    }

    #[must_use]
    pub fn market(&self) -> &Market {
        &self.market
    }

    #[must_use]
    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Whether ticks are still being recorded.
    #[must_use]
    pub const fn is_auditing(&self) -> bool {
        self.audit.is_some()
    }

    /// Number of completed ticks so far.
    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.sequence
    }

    /// Run one tick stamped with the current time.
    #[allow(clippy::result_large_err)]
    pub async fn synchronize(&mut self) -> Result<TickOutcome> {
        self.synchronize_at(Utc::now()).await
    }

    /// Run one tick stamped with `now`.
    ///
    /// Data gaps abort the tick with an [`AbortReason`]. Only audit write
    /// failures surface as errors, after the intents have been dispatched;
    /// the trail is then closed for the rest of the run.
    #[allow(clippy::result_large_err)]
    pub async fn synchronize_at(&mut self, now: DateTime<Utc>) -> Result<TickOutcome> {
        let Some(own_orders) = self.order_manager.get_order_book() else {
            warn!("Own order book unavailable, skipping tick");
            return Ok(TickOutcome::Aborted(AbortReason::OwnOrdersUnavailable));
        };

        let token_id = self.market.primary_token_id();
        let book = match self.market_data.get_order_book(token_id).await {
            Ok(book) => book,
            Err(e) => {
                warn!(error = %e, token_id = %token_id, "Order book fetch failed, using empty book");
                MarketOrderBook::empty()
            }
        };

        let price = match self.market_data.get_price(token_id).await {
            Ok(price) => price.round_dp(MAX_DECIMALS),
            Err(e) => {
                warn!(error = %e, token_id = %token_id, "Price fetch failed, skipping tick");
                return Ok(TickOutcome::Aborted(AbortReason::PriceUnavailable));
            }
        };

        let market_state = MarketState::new(now, price, book, own_orders);

        let Some(score_board) = self.score_feed.get_scoreboard().await else {
            warn!("Scoreboard unavailable, skipping tick");
            return Ok(TickOutcome::Aborted(AbortReason::ScoreUnavailable));
        };

        let state = SportsStrategyState::new(market_state, score_board);
        let intents = self.strategy.get_orders(&state);
        let placed = intents.to_place.len();
        let cancelled = intents.to_cancel.len();

        if cancelled > 0 {
            drop(self.order_manager.cancel_orders(intents.to_cancel.clone()));
        }
        if placed > 0 {
            drop(self.order_manager.place_orders(intents.to_place.clone()));
        }

        if placed + cancelled > 0 {
            info!(
                strategy = self.strategy.name(),
                placed,
                cancelled,
                "Dispatched order intents"
            );
        } else {
            debug!(strategy = self.strategy.name(), "No order intents");
        }

        let sequence = self.sequence;
        self.sequence += 1;

        if let Some(audit) = &self.audit {
            let record = TickRecord {
                sequence,
                state,
                intents,
            };
            if let Err(e) = audit.append(&record) {
                // The strategy has already moved past this tick, so later
                // records would no longer replay. Keep the trail a clean prefix.
                error!(
                    error = %e,
                    path = %audit.path().display(),
                    sequence,
                    "Audit write failed, disabling audit trail"
                );
                self.audit = None;
                return Err(e);
            }
        }

        Ok(TickOutcome::Completed { placed, cancelled })
    }
}
