//! Live game score snapshot.

use serde::{Deserialize, Serialize};

use super::token::Token;

/// Marker the score feed puts in `game_time` once the game has ended.
const FINAL_MARKER: &str = "Final";

/// Score of the game at one tick. Away maps to token A, home to token B.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScoreBoard {
    pub away_score: u32,
    pub home_score: u32,
    pub game_time: String,
}

impl ScoreBoard {
    pub fn new(away_score: u32, home_score: u32, game_time: impl Into<String>) -> Self {
        Self {
            away_score,
            home_score,
            game_time: game_time.into(),
        }
    }

    /// Whether the feed reports the game as over.
    #[must_use]
    pub fn is_final(&self) -> bool {
        self.game_time.contains(FINAL_MARKER)
    }

    /// Points scored by the side backing `token`.
    #[must_use]
    pub const fn score(&self, token: Token) -> u32 {
        match token {
            Token::A => self.away_score,
            Token::B => self.home_score,
        }
    }

    /// Absolute point margin between the teams.
    #[must_use]
    pub const fn margin(&self) -> u32 {
        self.away_score.abs_diff(self.home_score)
    }

    /// The side currently ahead, `None` on a tie.
    #[must_use]
    pub fn leader(&self) -> Option<Token> {
        match self.away_score.cmp(&self.home_score) {
            std::cmp::Ordering::Greater => Some(Token::A),
            std::cmp::Ordering::Less => Some(Token::B),
            std::cmp::Ordering::Equal => None,
        }
    }
}
