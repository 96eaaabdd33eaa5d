//! Binary outcome tokens and their mapping onto exchange token ids.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ids::TokenId;

/// One of the two complementary outcomes of a binary market.
///
/// `A` is the away team, `B` the home team. Their prices always sum to one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Token {
    A,
    B,
}

impl Token {
    /// Both outcomes.
    pub const ALL: [Token; 2] = [Token::A, Token::B];
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::A => write!(f, "A"),
            Token::B => write!(f, "B"),
        }
    }
}

/// The traded binary market: a condition and its two outcome token ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Market {
    condition_id: String,
    token_a: TokenId,
    token_b: TokenId,
}

impl Market {
    pub fn new(condition_id: impl Into<String>, token_a: TokenId, token_b: TokenId) -> Self {
        Self {
            condition_id: condition_id.into(),
            token_a,
            token_b,
        }
    }

    pub fn condition_id(&self) -> &str {
        &self.condition_id
    }

    /// Exchange token id for an outcome.
    pub fn token_id(&self, token: Token) -> &TokenId {
        match token {
            Token::A => &self.token_a,
            Token::B => &self.token_b,
        }
    }

    /// The token whose order book is fetched each tick.
    pub fn primary_token_id(&self) -> &TokenId {
        &self.token_a
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Market[condition_id={}, token_a={}, token_b={}]",
            self.condition_id, self.token_a, self.token_b
        )
    }
}
