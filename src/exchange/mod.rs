//! Exchange abstraction layer.
//!
//! Defines the collaborator traits the engine consumes, so the strategy and
//! reconciliation loop stay independent of any concrete exchange client.

mod traits;

pub use traits::{BatchHandle, BatchReport, MarketData, OrderGateway, OrderManager, ScoreFeed};
