//! Application configuration loading and validation.
//!
//! Configuration is read from a TOML file. `RUST_LOG` overrides the
//! configured log level.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, EnvFilter};

use crate::domain::strategy::{FrontRunConfig, StrategyKind};
use crate::domain::{Market, TokenId};
use crate::error::{ConfigError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    pub market: MarketConfig,
    #[serde(default)]
    pub manager: ManagerConfig,
    /// Required when `manager.strategy` is `front_run`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub front_run: Option<FrontRunConfig>,
    #[serde(default)]
    pub audit: AuditConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".into()
}

fn default_log_format() -> String {
    "pretty".into()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// The binary market being traded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketConfig {
    pub condition_id: String,
    /// Exchange token id of the away outcome.
    pub token_a: String,
    /// Exchange token id of the home outcome.
    pub token_b: String,
}

/// Reconciliation loop settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManagerConfig {
    #[serde(default = "default_strategy")]
    pub strategy: StrategyKind,
    /// Milliseconds between reconciliation ticks.
    #[serde(default = "default_sync_interval_ms")]
    pub sync_interval_ms: u64,
    /// Milliseconds between own order book refreshes.
    #[serde(default = "default_refresh_interval_ms")]
    pub refresh_interval_ms: u64,
    /// Milliseconds to wait before the first tick.
    #[serde(default)]
    pub startup_delay_ms: u64,
}

fn default_strategy() -> StrategyKind {
    StrategyKind::FrontRun
}

const fn default_sync_interval_ms() -> u64 {
    1000
}

const fn default_refresh_interval_ms() -> u64 {
    500
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            strategy: default_strategy(),
            sync_interval_ms: default_sync_interval_ms(),
            refresh_interval_ms: default_refresh_interval_ms(),
            startup_delay_ms: 0,
        }
    }
}

impl ManagerConfig {
    #[must_use]
    pub const fn sync_interval(&self) -> Duration {
        Duration::from_millis(self.sync_interval_ms)
    }

    #[must_use]
    pub const fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms)
    }

    #[must_use]
    pub const fn startup_delay(&self) -> Duration {
        Duration::from_millis(self.startup_delay_ms)
    }
}

/// Audit trail settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditConfig {
    /// JSON Lines file receiving one record per tick. Disabled when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl Config {
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse(&content)
    }

    /// Parse and validate configuration from TOML text.
    #[allow(clippy::result_large_err)]
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        if self.market.condition_id.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "condition_id",
            }
            .into());
        }
        if self.market.token_a.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "token_a" }.into());
        }
        if self.market.token_b.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "token_b" }.into());
        }
        if self.market.token_a == self.market.token_b {
            return Err(ConfigError::InvalidValue {
                field: "token_b",
                reason: "must differ from token_a".into(),
            }
            .into());
        }

        if self.manager.sync_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "sync_interval_ms",
                reason: "must be positive".into(),
            }
            .into());
        }
        if self.manager.refresh_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "refresh_interval_ms",
                reason: "must be positive".into(),
            }
            .into());
        }

        match self.manager.strategy {
            StrategyKind::FrontRun => {
                self.front_run
                    .as_ref()
                    .ok_or(ConfigError::MissingField { field: "front_run" })?
                    .validate()?;
            }
            kind => {
                return Err(ConfigError::InvalidValue {
                    field: "strategy",
                    reason: format!("'{kind}' is not supported by this engine"),
                }
                .into());
            }
        }

        Ok(())
    }

    /// The traded market with its outcome token ids.
    #[must_use]
    pub fn market(&self) -> Market {
        Market::new(
            self.market.condition_id.clone(),
            TokenId::from(self.market.token_a.clone()),
            TokenId::from(self.market.token_b.clone()),
        )
    }

    /// Install the global tracing subscriber. Logs go to stderr so command
    /// output on stdout stays machine-readable.
    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.logging.level));

        match self.logging.format.as_str() {
            "json" => {
                fmt()
                    .json()
                    .with_env_filter(filter)
                    .with_writer(std::io::stderr)
                    .init();
            }
            _ => {
                fmt()
                    .with_env_filter(filter)
                    .with_writer(std::io::stderr)
                    .init();
            }
        }
    }
}
