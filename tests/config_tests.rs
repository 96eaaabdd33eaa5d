mod support;

use std::fs;

use courtside::config::Config;
use courtside::domain::strategy::{StrategyKind, ThresholdComparator};
use courtside::error::{ConfigError, Error};
use courtside::testkit::config::CONFIG_TOML;
use rust_decimal_macros::dec;
use support::write_temp_file;

#[test]
fn canonical_config_loads() {
    let path = write_temp_file("config", "toml", CONFIG_TOML);
    let result = Config::load(&path);
    let _ = fs::remove_file(&path);

    let config = result.expect("canonical config is valid");
    assert_eq!(config.manager.strategy, StrategyKind::FrontRun);
    assert_eq!(config.manager.sync_interval_ms, 10);
    assert_eq!(config.market().token_id(courtside::domain::Token::B).as_str(), "home");

    let front_run = config.front_run.expect("front_run section");
    assert_eq!(front_run.order_size, dec!(10));
    assert_eq!(front_run.threshold_comparator, ThresholdComparator::Gte);
}

#[test]
fn missing_file_is_read_error() {
    match Config::load("/nonexistent/courtside.toml") {
        Err(Error::Config(ConfigError::ReadFile(_))) => {}
        other => panic!("Expected read error, got {other:?}"),
    }
}

#[test]
fn malformed_toml_is_parse_error() {
    let path = write_temp_file("config", "toml", "[market\ncondition_id = ");
    let result = Config::load(&path);
    let _ = fs::remove_file(&path);

    assert!(matches!(result, Err(Error::Config(ConfigError::Parse(_)))));
}

#[test]
fn flatten_price_must_be_inside_unit_interval() {
    let toml = CONFIG_TOML.replace("flatten_price = 0.01", "flatten_price = 1.5");
    let path = write_temp_file("config", "toml", &toml);
    let result = Config::load(&path);
    let _ = fs::remove_file(&path);

    match result {
        Err(Error::Config(ConfigError::InvalidValue {
            field: "flatten_price",
            ..
        })) => {}
        other => panic!("Expected invalid flatten_price, got {other:?}"),
    }
}

#[test]
fn unknown_comparator_rejected() {
    let toml = CONFIG_TOML.replace("threshold_comparator = \"gte\"", "threshold_comparator = \"lt\"");
    assert!(matches!(
        Config::parse(&toml),
        Err(Error::Config(ConfigError::Parse(_)))
    ));
}

#[test]
fn strategy_name_is_case_insensitive() {
    let toml = CONFIG_TOML.replace("strategy = \"front_run\"", "strategy = \"FRONT_RUN\"");
    assert_eq!(
        Config::parse(&toml).unwrap().manager.strategy,
        StrategyKind::FrontRun
    );
}

#[test]
fn bands_strategy_rejected_at_startup() {
    let toml = CONFIG_TOML.replace("strategy = \"front_run\"", "strategy = \"bands\"");
    match Config::parse(&toml) {
        Err(Error::Config(ConfigError::InvalidValue { field: "strategy", reason })) => {
            assert!(reason.contains("bands"));
        }
        other => panic!("Expected unsupported strategy, got {other:?}"),
    }
}

#[test]
fn shipped_example_config_is_valid() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config.toml.example");
    let config = Config::load(path).expect("example config parses");
    assert!(config.audit.path.is_some());
    assert_eq!(
        config.front_run.unwrap().threshold_comparator,
        ThresholdComparator::Gt
    );
}
