//! Handler for the `config` command group.

use std::path::Path;

use crate::cli::output;
use crate::config::Config;
use crate::error::Result;

/// Execute `config validate`.
#[allow(clippy::result_large_err)]
pub fn execute_validate(path: &Path) -> Result<()> {
    let config = Config::load(path)?;
    output::success(&format!("{} is valid", path.display()));
    output::field("Market", config.market());
    output::field("Strategy", config.manager.strategy);
    Ok(())
}

/// Execute `config show`.
#[allow(clippy::result_large_err)]
pub fn execute_show(path: &Path) -> Result<()> {
    let config = Config::load(path)?;

    output::section("Market");
    output::field("Condition", &config.market.condition_id);
    output::field("Token A", &config.market.token_a);
    output::field("Token B", &config.market.token_b);

    output::section("Manager");
    output::field("Strategy", config.manager.strategy);
    output::field("Sync", format!("{}ms", config.manager.sync_interval_ms));
    output::field("Refresh", format!("{}ms", config.manager.refresh_interval_ms));
    output::field("Startup delay", format!("{}ms", config.manager.startup_delay_ms));

    if let Some(front_run) = &config.front_run {
        output::section("Front run");
        output::field("Order size", front_run.order_size);
        output::field("Reset delay", format!("{}s", front_run.reset_delay_secs));
        output::field(
            "Threshold",
            format!(
                "{:?} {}",
                front_run.threshold_comparator, front_run.diff_pct_threshold
            ),
        );
        output::field("Min swing", front_run.min_diff_in_diff);
        output::field("Strict", front_run.strict);
        output::field("Flatten at", front_run.flatten_price);
    }

    output::section("Audit");
    match &config.audit.path {
        Some(path) => output::field("Path", path.display()),
        None => output::warning("disabled"),
    }

    output::section("Logging");
    output::field("Level", &config.logging.level);
    output::field("Format", &config.logging.format);
    Ok(())
}
