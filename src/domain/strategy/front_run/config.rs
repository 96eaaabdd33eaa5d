//! Front-run strategy configuration.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::domain::{Price, Volume};
use crate::error::ConfigError;

/// Longest reset delay accepted, one week.
pub(super) const MAX_RESET_DELAY_SECS: u64 = 7 * 24 * 60 * 60;

/// How `diff_pct` is compared against `diff_pct_threshold`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThresholdComparator {
    /// Strictly greater than the threshold.
    Gt,
    /// Greater than or equal to the threshold.
    Gte,
}

impl ThresholdComparator {
    #[must_use]
    pub fn passes(self, value: Decimal, threshold: Decimal) -> bool {
        match self {
            ThresholdComparator::Gt => value > threshold,
            ThresholdComparator::Gte => value >= threshold,
        }
    }
}

/// Configuration for the front-run strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrontRunConfig {
    /// Size of each opening BUY and of each scheduled reset.
    #[serde(default = "default_order_size")]
    pub order_size: Volume,

    /// Seconds between opening a position and flattening it.
    #[serde(default = "default_reset_delay_secs")]
    pub reset_delay_secs: u64,

    /// Relative score-margin swing needed to fire a signal.
    pub diff_pct_threshold: Decimal,

    /// Comparator applied to `diff_pct_threshold`.
    pub threshold_comparator: ThresholdComparator,

    /// Minimum absolute swing in the point margin.
    #[serde(default = "default_min_diff_in_diff")]
    pub min_diff_in_diff: u32,

    /// Skip the open when the book has no ask instead of crossing at 1.0.
    #[serde(default = "default_strict")]
    pub strict: bool,

    /// Limit price of the flattening SELL.
    #[serde(default = "default_flatten_price")]
    pub flatten_price: Price,
}

fn default_order_size() -> Volume {
    dec!(10)
}

fn default_reset_delay_secs() -> u64 {
    60
}

fn default_min_diff_in_diff() -> u32 {
    2
}

fn default_strict() -> bool {
    true
}

fn default_flatten_price() -> Price {
    dec!(0.01)
}

impl FrontRunConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.order_size <= Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "order_size",
                reason: "must be positive".into(),
            });
        }

        if self.reset_delay_secs > MAX_RESET_DELAY_SECS {
            return Err(ConfigError::InvalidValue {
                field: "reset_delay_secs",
                reason: format!("must be at most {MAX_RESET_DELAY_SECS}"),
            });
        }

        if self.diff_pct_threshold < Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "diff_pct_threshold",
                reason: "must be non-negative".into(),
            });
        }

        if self.min_diff_in_diff == 0 {
            return Err(ConfigError::InvalidValue {
                field: "min_diff_in_diff",
                reason: "must be at least 1".into(),
            });
        }

        if self.flatten_price <= Decimal::ZERO || self.flatten_price >= Decimal::ONE {
            return Err(ConfigError::InvalidValue {
                field: "flatten_price",
                reason: "must be between 0 and 1 (exclusive)".into(),
            });
        }

        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn for_tests() -> Self {
        Self {
            order_size: default_order_size(),
            reset_delay_secs: default_reset_delay_secs(),
            diff_pct_threshold: dec!(0.5),
            threshold_comparator: ThresholdComparator::Gte,
            min_diff_in_diff: default_min_diff_in_diff(),
            strict: true,
            flatten_price: default_flatten_price(),
        }
    }
}
