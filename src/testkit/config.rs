//! Canonical test configurations.

use rust_decimal_macros::dec;

use crate::config::Config;
use crate::domain::strategy::{FrontRunConfig, ThresholdComparator};

/// Front-run settings used across tests: fire on a 50% margin swing of at
/// least two points, reset after a minute.
pub fn front_run() -> FrontRunConfig {
    FrontRunConfig {
        order_size: dec!(10),
        reset_delay_secs: 60,
        diff_pct_threshold: dec!(0.5),
        threshold_comparator: ThresholdComparator::Gte,
        min_diff_in_diff: 2,
        strict: true,
        flatten_price: dec!(0.01),
    }
}

/// Complete configuration file text matching [`front_run`].
pub const CONFIG_TOML: &str = r#"
[logging]
level = "debug"
format = "pretty"

[market]
condition_id = "0xgame"
token_a = "away"
token_b = "home"

[manager]
strategy = "front_run"
sync_interval_ms = 10
refresh_interval_ms = 10

[front_run]
order_size = 10
reset_delay_secs = 60
diff_pct_threshold = 0.5
threshold_comparator = "gte"
min_diff_in_diff = 2
strict = true
flatten_price = 0.01
"#;

/// Parsed [`CONFIG_TOML`].
pub fn config() -> Config {
    match Config::parse(CONFIG_TOML) {
        Ok(config) => config,
        Err(e) => panic!("canonical test config is invalid: {e}"),
    }
}
