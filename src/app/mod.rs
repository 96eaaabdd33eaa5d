//! Application layer: reconciliation loop, audit trail, replay and shutdown.

mod audit;
mod backtest;
mod manager;
mod orchestrator;
mod shutdown;

pub use audit::{read_records, AuditTrail, TickRecord};
pub use backtest::{Backtest, BacktestReport, PnlPoint};
pub use manager::{AbortReason, StrategyManager, TickOutcome};
pub use orchestrator::{App, Collaborators};
pub use shutdown::shutdown;
