//! Builders for domain primitives used across tests.

use chrono::{DateTime, Duration, TimeZone, Utc};
use rust_decimal::Decimal;

use crate::domain::{
    Balances, Market, MarketOrderBook, MarketState, Order, OrderBookEntry, OwnOrderBook, Price,
    ScoreBoard, SportsStrategyState, TokenId,
};

/// Market with away token `away` and home token `home`.
pub fn market() -> Market {
    Market::new("0xgame", TokenId::from("away"), TokenId::from("home"))
}

/// Fixed reference instant plus `secs` seconds.
pub fn at(secs: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0)
        .single()
        .unwrap_or_default()
        + Duration::seconds(secs)
}

/// Token-A book from `(price, size)` pairs.
pub fn book(bids: &[(Decimal, Decimal)], asks: &[(Decimal, Decimal)]) -> MarketOrderBook {
    let levels = |side: &[(Decimal, Decimal)]| {
        side.iter()
            .map(|&(price, size)| OrderBookEntry::new(price, size))
            .collect()
    };
    MarketOrderBook::new(levels(bids), levels(asks))
}

/// Own order book with no batches in flight.
pub fn own_book(orders: Vec<Order>, balances: Balances) -> OwnOrderBook {
    OwnOrderBook::new(orders, balances, false, false)
}

/// In-game scoreboard.
pub fn score(away: u32, home: u32) -> ScoreBoard {
    ScoreBoard::new(away, home, "6:12 - 3rd")
}

/// Full tick input at `secs` past the reference instant.
pub fn sports_state(
    secs: i64,
    price_a: Price,
    book: MarketOrderBook,
    own: OwnOrderBook,
    board: ScoreBoard,
) -> SportsStrategyState {
    SportsStrategyState::new(MarketState::new(at(secs), price_a, book, own), board)
}
