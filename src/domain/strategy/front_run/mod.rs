//! Front-run strategy.
//!
//! Bets on the side a score change favors before the market reprices, then
//! flattens the position after a fixed delay. The strategy remembers the
//! previous tick's state to measure score deltas and holds at most one
//! pending [`OrderReset`].
//!
//! Per tick:
//!
//! 1. Detect a favored token from the previous and current scoreboards.
//! 2. On a signal, BUY the favored token at the best ask and schedule a
//!    reset. A pending reset on the same token absorbs the new one; a reset
//!    on the other token is flattened right away.
//! 3. Consume the pending reset if its trigger has passed.
//!
//! Consuming a reset emits one SELL FOK at the flatten price for the full
//! reset size, plus cancels for every open order on that token.

mod config;
mod reset;
mod signal;

use chrono::Duration;
use rust_decimal::Decimal;
use tracing::{debug, info};

use config::MAX_RESET_DELAY_SECS;
pub use config::{FrontRunConfig, ThresholdComparator};
pub use reset::OrderReset;
pub use signal::{detect, margin_swing, Signal, SignalKind, SignalRule};

use super::{OrderIntents, Strategy};
use crate::domain::{MarketState, Order, OrderType, Side, SportsStrategyState, Token};

/// Score-driven front-run strategy.
pub struct FrontRunStrategy {
    config: FrontRunConfig,
    rule: SignalRule,
    reset_delay: Duration,
    previous: Option<SportsStrategyState>,
    pending_reset: Option<OrderReset>,
}

impl FrontRunStrategy {
    /// Create a new strategy in the idle state.
    #[must_use]
    pub fn new(config: FrontRunConfig) -> Self {
        let rule = SignalRule {
            min_diff_in_diff: config.min_diff_in_diff,
            threshold: config.diff_pct_threshold,
            comparator: config.threshold_comparator,
        };
        // Unvalidated configs are clamped to the longest delay validate accepts.
        let reset_delay = i64::try_from(config.reset_delay_secs.min(MAX_RESET_DELAY_SECS))
            .map_or(Duration::zero(), Duration::seconds);
        Self {
            config,
            rule,
            reset_delay,
            previous: None,
            pending_reset: None,
        }
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &FrontRunConfig {
        &self.config
    }

    /// The reset waiting to be consumed, if any.
    #[must_use]
    pub const fn pending_reset(&self) -> Option<&OrderReset> {
        self.pending_reset.as_ref()
    }

    /// State remembered from the last tick.
    #[must_use]
    pub const fn previous_state(&self) -> Option<&SportsStrategyState> {
        self.previous.as_ref()
    }

    /// Opening BUY for `token`, or `None` when strict and the book has no ask.
    fn open_order(&self, market: &MarketState, token: Token) -> Option<Order> {
        match market.get_best_limit_price(token, Side::Buy) {
            Some(price) => Some(Order::new(
                self.config.order_size,
                price,
                Side::Buy,
                token,
                OrderType::Gtc,
            )),
            None if self.config.strict => None,
            None => Some(Order::new(
                self.config.order_size,
                Decimal::ONE,
                Side::Buy,
                token,
                OrderType::Fok,
            )),
        }
    }

    fn flatten_order(&self, reset: &OrderReset) -> Order {
        Order::new(
            reset.size,
            self.config.flatten_price,
            Side::Sell,
            reset.token,
            OrderType::Fok,
        )
    }

    /// Flatten the pending reset and clear it.
    fn consume_reset(&mut self, market: &MarketState, intents: &mut OrderIntents) {
        let Some(reset) = self.pending_reset.take() else {
            return;
        };

        let cancels: Vec<Order> = market.own_orders().orders_for(reset.token).cloned().collect();
        info!(
            token = %reset.token,
            size = %reset.size,
            cancels = cancels.len(),
            "Consuming order reset"
        );

        intents.to_place.push(self.flatten_order(&reset));
        intents.to_cancel.extend(cancels);
    }

    fn schedule_reset(
        &mut self,
        candidate: OrderReset,
        market: &MarketState,
        intents: &mut OrderIntents,
    ) {
        match self.pending_reset.as_mut() {
            Some(pending) if pending.token == candidate.token => {
                pending.merge(&candidate);
                debug!(
                    token = %pending.token,
                    size = %pending.size,
                    trigger = %pending.trigger_timestamp,
                    "Merged order reset"
                );
            }
            Some(_) => {
                self.consume_reset(market, intents);
                self.pending_reset = Some(candidate);
            }
            None => self.pending_reset = Some(candidate),
        }
    }
}

impl Strategy for FrontRunStrategy {
    fn name(&self) -> &'static str {
        "front_run"
    }

    fn get_orders(&mut self, state: &SportsStrategyState) -> OrderIntents {
        let mut intents = OrderIntents::default();
        let now = state.timestamp();
        let market = &state.market_state;

        let signal = detect(
            self.previous.as_ref().map(|p| &p.score_board),
            &state.score_board,
            &self.rule,
        );

        if let Some(signal) = signal {
            match self.open_order(market, signal.token) {
                Some(open) => {
                    info!(
                        token = %signal.token,
                        kind = %signal.kind,
                        price = %open.price,
                        size = %open.size,
                        "Front-run signal"
                    );
                    let candidate =
                        OrderReset::new(now + self.reset_delay, signal.token, self.config.order_size);
                    self.schedule_reset(candidate, market, &mut intents);
                    intents.to_place.push(open);
                }
                None => {
                    debug!(token = %signal.token, "No ask to lift, skipping signal");
                }
            }
        }

        if self.pending_reset.as_ref().is_some_and(|r| r.is_due(now)) {
            self.consume_reset(market, &mut intents);
        }

        self.previous = Some(state.clone());

        debug!(
            away = state.score_board.away_score,
            home = state.score_board.home_score,
            game_time = %state.score_board.game_time,
            to_place = intents.to_place.len(),
            to_cancel = intents.to_cancel.len(),
            reset_pending = self.pending_reset.is_some(),
            "Strategy tick"
        );

        intents
    }
}
