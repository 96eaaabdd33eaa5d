//! Command-line interface definitions.

pub mod backtest;
pub mod config;
pub mod output;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;

/// Courtside - score-driven front-running on binary prediction markets.
#[derive(Parser, Debug)]
#[command(name = "courtside")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay a recorded audit trail through the strategy
    Backtest(BacktestArgs),

    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Subcommands for `courtside config`
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Validate configuration file
    Validate(ConfigPathArg),
    /// Show the effective configuration
    Show(ConfigPathArg),
}

/// Shared argument for commands that only need a config path.
#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,
}

/// Arguments for the `backtest` subcommand.
#[derive(Parser, Debug)]
pub struct BacktestArgs {
    /// Audit trail to replay (JSON Lines)
    pub records: PathBuf,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Starting collateral of the simulated account
    #[arg(long, default_value = "1000")]
    pub collateral: Decimal,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}
