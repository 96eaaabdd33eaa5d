//! Combined decision input for one tick.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::market_state::MarketState;
use super::score::ScoreBoard;

/// Everything the strategy sees on one tick. Built fresh every tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SportsStrategyState {
    pub market_state: MarketState,
    pub score_board: ScoreBoard,
}

impl SportsStrategyState {
    #[must_use]
    pub const fn new(market_state: MarketState, score_board: ScoreBoard) -> Self {
        Self {
            market_state,
            score_board,
        }
    }

    /// Tick timestamp; the only clock the strategy reads.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.market_state.timestamp()
    }
}
