//! Strategy abstraction for score-driven trading.
//!
//! A strategy turns one [`SportsStrategyState`] per tick into order intents.
//! Strategies are stateful and owned exclusively by the reconciliation loop,
//! so [`Strategy::get_orders`] takes `&mut self` and is called in strict
//! sequence.
//!
//! The strategy variant is selected once at startup from a configuration
//! string (see [`StrategyKind`]).
//!
//! # Example
//!
//! ```
//! use courtside::domain::strategy::StrategyKind;
//!
//! let kind: StrategyKind = "FRONT_RUN".parse().unwrap();
//! assert_eq!(kind, StrategyKind::FrontRun);
//! ```

pub mod front_run;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use front_run::{FrontRunConfig, FrontRunStrategy, OrderReset, ThresholdComparator};

use crate::domain::{Order, SportsStrategyState};
use crate::error::{ConfigError, Result};

/// Orders a strategy wants placed and cancelled after one tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderIntents {
    pub to_place: Vec<Order>,
    pub to_cancel: Vec<Order>,
}

impl OrderIntents {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.to_place.is_empty() && self.to_cancel.is_empty()
    }
}

/// A trading strategy driven by market and score snapshots.
pub trait Strategy: Send {
    /// Unique identifier for this strategy.
    ///
    /// Used in configuration and logging.
    fn name(&self) -> &'static str;

    /// Decide what to place and cancel given this tick's state.
    fn get_orders(&mut self, state: &SportsStrategyState) -> OrderIntents;
}

/// Strategy variants selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StrategyKind {
    Amm,
    Bands,
    FrontRun,
}

impl StrategyKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            StrategyKind::Amm => "amm",
            StrategyKind::Bands => "bands",
            StrategyKind::FrontRun => "front_run",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        [StrategyKind::Amm, StrategyKind::Bands, StrategyKind::FrontRun]
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "strategy",
                reason: format!("unknown strategy '{s}'"),
            })
    }
}

impl TryFrom<String> for StrategyKind {
    type Error = ConfigError;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<StrategyKind> for String {
    fn from(kind: StrategyKind) -> Self {
        kind.as_str().to_string()
    }
}

/// Construct the configured strategy.
///
/// Only the front-run strategy is implemented by this engine; the market
/// making variants are recognized so a misrouted configuration fails loudly.
#[allow(clippy::result_large_err)]
pub fn build_strategy(
    kind: StrategyKind,
    front_run: Option<&FrontRunConfig>,
) -> Result<Box<dyn Strategy>> {
    match kind {
        StrategyKind::FrontRun => {
            let config = front_run.ok_or(ConfigError::MissingField { field: "front_run" })?;
            config.validate()?;
            Ok(Box::new(FrontRunStrategy::new(config.clone())))
        }
        StrategyKind::Amm | StrategyKind::Bands => Err(ConfigError::InvalidValue {
            field: "strategy",
            reason: format!("'{kind}' is not supported by this engine"),
        }
        .into()),
    }
}
