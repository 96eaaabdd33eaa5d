//! Offline replay of recorded ticks.
//!
//! Recorded states are fed through a fresh strategy in order. Recomputed
//! intents are compared against the recorded ones, and every placement is
//! assumed to fill at its limit price against a simulated account.
//! Recorded own orders are left untouched so the strategy sees exactly what
//! it saw live.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::audit::TickRecord;
use crate::domain::strategy::Strategy;
use crate::domain::{Balances, MarketState, Order, Side, Token};

/// Portfolio value after one replayed tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PnlPoint {
    pub sequence: u64,
    pub timestamp: DateTime<Utc>,
    pub total_value: Decimal,
    pub balances: Balances,
}

/// Summary of a replay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestReport {
    pub ticks: usize,
    pub orders_placed: usize,
    pub orders_cancelled: usize,
    /// Sequences whose recomputed intents differ from the recorded ones.
    pub mismatches: Vec<u64>,
    pub initial_value: Decimal,
    pub final_value: Decimal,
    pub final_balances: Balances,
    pub history: Vec<PnlPoint>,
}

impl BacktestReport {
    #[must_use]
    pub fn pnl(&self) -> Decimal {
        self.final_value - self.initial_value
    }

    /// Whether the replay reproduced every recorded decision.
    #[must_use]
    pub fn is_deterministic(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// Replays [`TickRecord`]s through a strategy.
pub struct Backtest {
    strategy: Box<dyn Strategy>,
    balances: Balances,
}

impl Backtest {
    #[must_use]
    pub fn new(strategy: Box<dyn Strategy>, initial: Balances) -> Self {
        Self {
            strategy,
            balances: initial,
        }
    }

    fn portfolio_value(&self, market: &MarketState) -> Decimal {
        self.balances.collateral
            + Token::ALL
                .iter()
                .map(|&token| self.balances.get(token) * market.price(token))
                .sum::<Decimal>()
    }

    fn fill(&mut self, order: &Order) {
        let notional = order.notional();
        match order.side {
            Side::Buy => {
                *self.balances.get_mut(order.token) += order.size;
                self.balances.collateral -= notional;
            }
            Side::Sell => {
                *self.balances.get_mut(order.token) -= order.size;
                self.balances.collateral += notional;
            }
        }
    }

    /// Replay `records` in order and report the simulated outcome.
    pub fn run(mut self, records: &[TickRecord]) -> BacktestReport {
        let initial_balances = self.balances;
        let mut report = BacktestReport {
            ticks: 0,
            orders_placed: 0,
            orders_cancelled: 0,
            mismatches: Vec::new(),
            initial_value: Decimal::ZERO,
            final_value: Decimal::ZERO,
            final_balances: initial_balances,
            history: Vec::with_capacity(records.len()),
        };

        for (index, record) in records.iter().enumerate() {
            let market = &record.state.market_state;
            if index == 0 {
                report.initial_value = self.portfolio_value(market);
            }

            let intents = self.strategy.get_orders(&record.state);
            if intents != record.intents {
                warn!(sequence = record.sequence, "Replayed intents differ from recording");
                report.mismatches.push(record.sequence);
            }

            // Placements fill in full, so nothing rests for cancels to remove.
            for order in &intents.to_place {
                self.fill(order);
            }

            report.ticks += 1;
            report.orders_placed += intents.to_place.len();
            report.orders_cancelled += intents.to_cancel.len();

            let total_value = self.portfolio_value(market);
            if !intents.is_empty() {
                debug!(
                    sequence = record.sequence,
                    placed = intents.to_place.len(),
                    cancelled = intents.to_cancel.len(),
                    value = %total_value,
                    "Replayed tick"
                );
            }
            report.history.push(PnlPoint {
                sequence: record.sequence,
                timestamp: market.timestamp(),
                total_value,
                balances: self.balances,
            });
        }

        report.final_value = report
            .history
            .last()
            .map_or(report.initial_value, |p| p.total_value);
        report.final_balances = self.balances;
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::strategy::{FrontRunConfig, FrontRunStrategy, OrderIntents};
    use crate::domain::{
        MarketOrderBook, OrderBookEntry, OrderType, OwnOrderBook, ScoreBoard, SportsStrategyState,
    };
    use chrono::{Duration, TimeZone};
    use rust_decimal_macros::dec;

    fn tick(sequence: u64, secs: i64, away: u32, home: u32, intents: OrderIntents) -> TickRecord {
        let timestamp = Utc.with_ymd_and_hms(2024, 2, 1, 1, 0, 0).unwrap() + Duration::seconds(secs);
        let market = MarketState::new(
            timestamp,
            dec!(0.50),
            MarketOrderBook::new(
                vec![OrderBookEntry::new(dec!(0.49), dec!(50))],
                vec![OrderBookEntry::new(dec!(0.51), dec!(50))],
            ),
            OwnOrderBook::default(),
        );
        TickRecord {
            sequence,
            state: SportsStrategyState::new(market, ScoreBoard::new(away, home, "Q1")),
            intents,
        }
    }

    fn strategy() -> Box<dyn Strategy> {
        Box::new(FrontRunStrategy::new(FrontRunConfig::for_tests()))
    }

    #[test]
    fn simulates_fills_and_values_portfolio() {
        let buy = Order::new(dec!(10), dec!(0.51), Side::Buy, Token::A, OrderType::Gtc);
        let sell = Order::new(dec!(10), dec!(0.01), Side::Sell, Token::A, OrderType::Fok);
        let records = vec![
            tick(0, 0, 0, 0, OrderIntents::default()),
            tick(1, 1, 3, 0, OrderIntents { to_place: vec![buy], to_cancel: vec![] }),
            tick(2, 61, 3, 0, OrderIntents { to_place: vec![sell], to_cancel: vec![] }),
        ];

        let report = Backtest::new(strategy(), Balances::new(dec!(100), dec!(0), dec!(0))).run(&records);

        assert!(report.is_deterministic());
        assert_eq!(report.ticks, 3);
        assert_eq!(report.orders_placed, 2);
        assert_eq!(report.initial_value, dec!(100));
        // bought 10 @ 0.51, marked at 0.50
        assert_eq!(report.history[1].total_value, dec!(99.90));
        // dumped 10 @ 0.01
        assert_eq!(report.final_value, dec!(95.00));
        assert_eq!(report.pnl(), dec!(-5.00));
        assert_eq!(report.final_balances.token_a, dec!(0));
    }

    #[test]
    fn reports_diverging_recordings() {
        let records = vec![
            tick(0, 0, 0, 0, OrderIntents::default()),
            tick(1, 1, 3, 0, OrderIntents::default()),
        ];

        let report = Backtest::new(strategy(), Balances::default()).run(&records);
        assert_eq!(report.mismatches, vec![1]);
    }

    #[test]
    fn empty_replay() {
        let report = Backtest::new(strategy(), Balances::default()).run(&[]);
        assert_eq!(report.ticks, 0);
        assert_eq!(report.final_value, Decimal::ZERO);
    }
}
