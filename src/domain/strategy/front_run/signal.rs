//! Favored-token detection from consecutive scoreboards.

use std::fmt;

use rust_decimal::Decimal;

use super::config::ThresholdComparator;
use crate::domain::{ScoreBoard, Token};

/// Parameters controlling when a score change fires.
#[derive(Debug, Clone, Copy)]
pub struct SignalRule {
    pub min_diff_in_diff: u32,
    pub threshold: Decimal,
    pub comparator: ThresholdComparator,
}

/// Why a token was favored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalKind {
    /// The game ended with this token's side ahead.
    GameEnd,
    /// The point margin swung by `diff_in_diff`, a `diff_pct` fraction of
    /// the previous margin.
    ScoreSwing {
        diff_in_diff: u32,
        diff_pct: Decimal,
    },
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalKind::GameEnd => write!(f, "game_end"),
            SignalKind::ScoreSwing {
                diff_in_diff,
                diff_pct,
            } => write!(f, "swing({diff_in_diff}, {diff_pct})"),
        }
    }
}

/// A directional signal for one token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signal {
    pub token: Token,
    pub kind: SignalKind,
}

/// Margin swing between two scoreboards.
///
/// Returns `(diff_in_diff, diff_pct)`. A previous margin of zero yields a
/// `diff_pct` of one.
#[must_use]
pub fn margin_swing(previous: &ScoreBoard, current: &ScoreBoard) -> (u32, Decimal) {
    let old_diff = previous.margin();
    let diff_in_diff = current.margin().abs_diff(old_diff);
    let diff_pct = if old_diff == 0 {
        Decimal::ONE
    } else {
        Decimal::from(diff_in_diff) / Decimal::from(old_diff)
    };
    (diff_in_diff, diff_pct)
}

/// Detect the token a score change favors, if any.
///
/// The first observed scoreboard never fires. Once the game is final the
/// leading side is favored on every tick; a final tie favors nobody.
#[must_use]
pub fn detect(previous: Option<&ScoreBoard>, current: &ScoreBoard, rule: &SignalRule) -> Option<Signal> {
    let previous = previous?;

    if current.is_final() {
        return current.leader().map(|token| Signal {
            token,
            kind: SignalKind::GameEnd,
        });
    }

    let (diff_in_diff, diff_pct) = margin_swing(previous, current);
    if diff_in_diff < rule.min_diff_in_diff || !rule.comparator.passes(diff_pct, rule.threshold) {
        return None;
    }

    let away_diff = i64::from(current.away_score) - i64::from(previous.away_score);
    let home_diff = i64::from(current.home_score) - i64::from(previous.home_score);
    let token = if away_diff > 0 {
        Token::A
    } else if home_diff > 0 {
        Token::B
    } else {
        return None;
    };

    Some(Signal {
        token,
        kind: SignalKind::ScoreSwing {
            diff_in_diff,
            diff_pct,
        },
    })
}
