//! Scheduled position flattening.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Token, Volume};

/// A pending instruction to flatten `size` units of `token` by
/// `trigger_timestamp`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderReset {
    pub trigger_timestamp: DateTime<Utc>,
    pub token: Token,
    pub size: Volume,
}

impl OrderReset {
    #[must_use]
    pub const fn new(trigger_timestamp: DateTime<Utc>, token: Token, size: Volume) -> Self {
        Self {
            trigger_timestamp,
            token,
            size,
        }
    }

    /// Fold a same-token reset into this one.
    ///
    /// Sizes accumulate and the earlier trigger wins.
    pub fn merge(&mut self, other: &OrderReset) {
        debug_assert_eq!(self.token, other.token);
        self.size += other.size;
        self.trigger_timestamp = self.trigger_timestamp.min(other.trigger_timestamp);
    }

    /// Whether the reset should be consumed at `now`.
    #[must_use]
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.trigger_timestamp <= now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use rust_decimal_macros::dec;

    #[test]
    fn merge_sums_size_and_keeps_earlier_trigger() {
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 20, 0, 0).unwrap();
        let mut pending = OrderReset::new(t0 + Duration::seconds(60), Token::A, dec!(10));
        pending.merge(&OrderReset::new(t0 + Duration::seconds(90), Token::A, dec!(10)));

        assert_eq!(pending.size, dec!(20));
        assert_eq!(pending.trigger_timestamp, t0 + Duration::seconds(60));
    }

    #[test]
    fn due_at_trigger_instant() {
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 20, 0, 0).unwrap();
        let reset = OrderReset::new(t0, Token::B, dec!(5));
        assert!(!reset.is_due(t0 - Duration::seconds(1)));
        assert!(reset.is_due(t0));
    }
}
