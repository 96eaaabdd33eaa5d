//! Order intents and resting orders.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::ids::OrderId;
use super::money::{Price, Volume};
use super::token::Token;

/// Order side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Buy,
    Sell,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

/// Time-in-force of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderType {
    /// Good-til-cancelled: rests on the book until matched or cancelled.
    Gtc,
    /// Fill-or-kill: fills completely right away or is rejected.
    Fok,
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderType::Gtc => write!(f, "GTC"),
            OrderType::Fok => write!(f, "FOK"),
        }
    }
}

/// An order on one outcome token.
///
/// Before placement an order is an intent compared by value. Once the
/// exchange has assigned an id, the id alone is its identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub size: Volume,
    pub price: Price,
    pub side: Side,
    pub token: Token,
    pub order_type: OrderType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<OrderId>,
}

impl Order {
    /// Create an order intent without an exchange id.
    #[must_use]
    pub const fn new(
        size: Volume,
        price: Price,
        side: Side,
        token: Token,
        order_type: OrderType,
    ) -> Self {
        Self {
            size,
            price,
            side,
            token,
            order_type,
            id: None,
        }
    }

    /// Check that the order can be submitted: positive size, price in
    /// `[0, 1]`.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.size <= Decimal::ZERO {
            return Err(DomainError::NonPositiveSize { size: self.size });
        }
        if self.price < Decimal::ZERO || self.price > Decimal::ONE {
            return Err(DomainError::PriceOutOfRange { price: self.price });
        }
        Ok(())
    }

    /// Attach the id the exchange assigned on placement.
    #[must_use]
    pub fn with_id(mut self, id: OrderId) -> Self {
        self.id = Some(id);
        self
    }

    /// Collateral notional of the order (price times size).
    #[must_use]
    pub fn notional(&self) -> Decimal {
        self.price * self.size
    }
}

impl PartialEq for Order {
    fn eq(&self, other: &Self) -> bool {
        match (&self.id, &other.id) {
            (Some(a), Some(b)) => a == b,
            (None, None) => {
                self.size == other.size
                    && self.price == other.price
                    && self.side == other.side
                    && self.token == other.token
                    && self.order_type == other.order_type
            }
            _ => false,
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Order[id={}, price={}, size={}, side={}, token={}, type={}]",
            self.id.as_ref().map_or("-", OrderId::as_str),
            self.price,
            self.size,
            self.side,
            self.token,
            self.order_type
        )
    }
}
