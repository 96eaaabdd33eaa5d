//! Handler for the `backtest` command.

use rust_decimal::Decimal;

use crate::app::{read_records, Backtest};
use crate::cli::{output, BacktestArgs};
use crate::config::Config;
use crate::domain::strategy::build_strategy;
use crate::domain::Balances;
use crate::error::Result;

/// Execute `backtest`.
#[allow(clippy::result_large_err)]
pub fn execute(config: &Config, args: &BacktestArgs) -> Result<()> {
    let strategy = build_strategy(config.manager.strategy, config.front_run.as_ref())?;
    let records = read_records(&args.records)?;

    let initial = Balances::new(args.collateral, Decimal::ZERO, Decimal::ZERO);
    let report = Backtest::new(strategy, initial).run(&records);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    output::section("Backtest");
    output::field("Records", args.records.display());
    output::field("Ticks", report.ticks);
    output::field("Placed", report.orders_placed);
    output::field("Cancelled", report.orders_cancelled);

    output::section("Portfolio");
    output::field("Initial", report.initial_value);
    output::field("Final", report.final_value);
    output::field("PnL", report.pnl());
    output::field("Token A", report.final_balances.token_a);
    output::field("Token B", report.final_balances.token_b);

    output::section("Determinism");
    if report.is_deterministic() {
        output::success("replay matches the recorded decisions");
    } else {
        output::warning(&format!(
            "{} tick(s) diverged: {:?}",
            report.mismatches.len(),
            report.mismatches
        ));
    }
    Ok(())
}
