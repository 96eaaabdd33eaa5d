//! The account's own side of the market: open orders and balances.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::money::Volume;
use super::order::Order;
use super::token::Token;

/// Account balances: settlement collateral plus both outcome tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balances {
    pub collateral: Volume,
    pub token_a: Volume,
    pub token_b: Volume,
}

impl Balances {
    #[must_use]
    pub const fn new(collateral: Volume, token_a: Volume, token_b: Volume) -> Self {
        Self {
            collateral,
            token_a,
            token_b,
        }
    }

    /// Balance held of an outcome token.
    #[must_use]
    pub const fn get(&self, token: Token) -> Volume {
        match token {
            Token::A => self.token_a,
            Token::B => self.token_b,
        }
    }

    /// Mutable balance of an outcome token.
    pub fn get_mut(&mut self, token: Token) -> &mut Volume {
        match token {
            Token::A => &mut self.token_a,
            Token::B => &mut self.token_b,
        }
    }

    /// The outcome held in excess and by how much, if the holdings differ.
    ///
    /// Equal A and B holdings redeem to collateral regardless of the result,
    /// so only the difference carries directional exposure.
    #[must_use]
    pub fn imbalance(&self) -> Option<(Token, Volume)> {
        let diff = self.token_a - self.token_b;
        if diff > Decimal::ZERO {
            Some((Token::A, diff))
        } else if diff < Decimal::ZERO {
            Some((Token::B, -diff))
        } else {
            None
        }
    }
}

/// Snapshot of the account's open orders and balances.
///
/// `orders_being_placed` and `orders_being_cancelled` are set while an
/// asynchronous batch of that kind is outstanding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OwnOrderBook {
    pub orders: Vec<Order>,
    pub balances: Balances,
    pub orders_being_placed: bool,
    pub orders_being_cancelled: bool,
}

impl OwnOrderBook {
    #[must_use]
    pub const fn new(
        orders: Vec<Order>,
        balances: Balances,
        orders_being_placed: bool,
        orders_being_cancelled: bool,
    ) -> Self {
        Self {
            orders,
            balances,
            orders_being_placed,
            orders_being_cancelled,
        }
    }

    /// Open orders resting on one outcome token.
    pub fn orders_for(&self, token: Token) -> impl Iterator<Item = &Order> {
        self.orders.iter().filter(move |o| o.token == token)
    }
}
