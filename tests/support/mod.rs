#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use courtside::app::StrategyManager;
use courtside::domain::strategy::FrontRunStrategy;
use courtside::domain::{Balances, MarketOrderBook, Order, OwnOrderBook, ScoreBoard};
use courtside::testkit::config;
use courtside::testkit::domain::{book, market, own_book};
use courtside::testkit::exchange::{MockMarketData, RecordingOrderManager, ScriptedScoreFeed};
use rust_decimal_macros::dec;

static TEMP_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Write `contents` to a unique file under the system temp dir.
pub fn write_temp_file(prefix: &str, extension: &str, contents: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let suffix = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    path.push(format!("courtside-{prefix}-{nanos}-{suffix}.{extension}"));
    fs::write(&path, contents).expect("write temp file");
    path
}

/// Token-A book quoted 0.48 / 0.52.
pub fn quoted_book() -> MarketOrderBook {
    book(&[(dec!(0.48), dec!(100))], &[(dec!(0.52), dec!(100))])
}

/// Mocks wired into a manager running the canonical front-run config.
pub struct Harness {
    pub market_data: Arc<MockMarketData>,
    pub score_feed: Arc<ScriptedScoreFeed>,
    pub order_manager: Arc<RecordingOrderManager>,
    pub manager: StrategyManager,
}

impl Harness {
    pub fn new(scores: Vec<Option<ScoreBoard>>, own: Option<OwnOrderBook>) -> Self {
        let market_data = Arc::new(MockMarketData::new(quoted_book(), dec!(0.5)));
        let score_feed = Arc::new(ScriptedScoreFeed::new(scores));
        let order_manager = Arc::new(RecordingOrderManager::new(own));
        let manager = StrategyManager::new(
            market(),
            market_data.clone(),
            score_feed.clone(),
            order_manager.clone(),
            Box::new(FrontRunStrategy::new(config::front_run())),
        );
        Self {
            market_data,
            score_feed,
            order_manager,
            manager,
        }
    }

    /// Harness whose account holds `orders` and 1000 collateral.
    pub fn with_orders(scores: Vec<Option<ScoreBoard>>, orders: Vec<Order>) -> Self {
        Self::new(
            scores,
            Some(own_book(orders, Balances::new(dec!(1000), dec!(0), dec!(0)))),
        )
    }
}
