//! Exchange-agnostic domain types.

pub mod error;
pub mod strategy;

mod book;
mod ids;
mod market_state;
mod money;
mod order;
mod own_book;
mod score;
mod state;
mod token;

pub use book::{MarketOrderBook, OrderBookEntry};
pub use ids::{OrderId, TokenId};
pub use market_state::MarketState;
pub use money::{complement, Price, Volume, MAX_DECIMALS};
pub use order::{Order, OrderType, Side};
pub use own_book::{Balances, OwnOrderBook};
pub use score::ScoreBoard;
pub use state::SportsStrategyState;
pub use token::{Market, Token};
