use courtside::domain::strategy::{FrontRunStrategy, OrderIntents, Strategy};
use courtside::domain::{
    Balances, MarketOrderBook, Order, OrderId, OrderType, ScoreBoard, Side, SportsStrategyState,
    Token,
};
use courtside::testkit::config;
use courtside::testkit::domain::{book, own_book, sports_state};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn quoted() -> MarketOrderBook {
    book(
        &[(dec!(0.40), dec!(20)), (dec!(0.44), dec!(10))],
        &[(dec!(0.47), dec!(15)), (dec!(0.46), dec!(5))],
    )
}

fn tick(secs: i64, away: u32, home: u32, orders: Vec<Order>) -> SportsStrategyState {
    sports_state(
        secs,
        dec!(0.45),
        quoted(),
        own_book(orders, Balances::default()),
        ScoreBoard::new(away, home, "8:00 - 1st"),
    )
}

fn run(ticks: &[SportsStrategyState]) -> (FrontRunStrategy, Vec<OrderIntents>) {
    let mut strategy = FrontRunStrategy::new(config::front_run());
    let intents = ticks.iter().map(|t| strategy.get_orders(t)).collect();
    (strategy, intents)
}

#[test]
fn complement_pricing_holds_for_both_tokens() {
    let state = tick(0, 0, 0, vec![]).market_state;

    assert_eq!(state.price(Token::A) + state.price(Token::B), Decimal::ONE);
    assert_eq!(state.best_bid(), Some(dec!(0.44)));
    assert_eq!(state.best_ask(), Some(dec!(0.46)));
    assert_eq!(state.mid(), Some(dec!(0.45)));
    assert_eq!(state.spread(), Some(dec!(0.02)));

    let b_bids: Vec<Decimal> = state.get_bids(Token::B).iter().map(|e| e.price()).collect();
    let b_asks: Vec<Decimal> = state.get_asks(Token::B).iter().map(|e| e.price()).collect();
    assert_eq!(b_bids, vec![dec!(0.54), dec!(0.53)]);
    assert_eq!(b_asks, vec![dec!(0.56), dec!(0.60)]);
    assert_eq!(state.get_best_limit_price(Token::B, Side::Buy), Some(dec!(0.56)));
    assert_eq!(state.get_best_limit_price(Token::B, Side::Sell), Some(dec!(0.54)));
}

#[test]
fn replaying_the_same_history_is_deterministic() {
    let history = vec![
        tick(0, 0, 0, vec![]),
        tick(10, 3, 0, vec![]),
        tick(20, 5, 0, vec![]),
        tick(30, 5, 4, vec![]),
        tick(95, 5, 4, vec![]),
    ];

    let (_, first) = run(&history);
    let (_, second) = run(&history);
    assert_eq!(first, second);
}

#[test]
fn margin_swing_below_threshold_is_ignored() {
    // margin 6 -> 8: diff_in_diff 2 but only a third of the old margin
    let (strategy, intents) = run(&[tick(0, 16, 10, vec![]), tick(5, 18, 10, vec![])]);

    assert!(intents[1].is_empty());
    assert!(strategy.pending_reset().is_none());
}

#[test]
fn repeated_same_side_signals_accumulate_one_reset() {
    let (strategy, intents) = run(&[
        tick(0, 0, 0, vec![]),
        tick(10, 3, 0, vec![]),
        tick(40, 6, 0, vec![]),
    ]);

    assert_eq!(intents[1].to_place.len(), 1);
    assert_eq!(intents[2].to_place.len(), 1);
    let reset = strategy.pending_reset().unwrap();
    assert_eq!(reset.token, Token::A);
    assert_eq!(reset.size, dec!(20));
    assert_eq!(reset.trigger_timestamp, courtside::testkit::domain::at(70));
}

#[test]
fn opposite_signal_flattens_pending_side_in_same_tick() {
    let a_order = Order::new(dec!(10), dec!(0.46), Side::Buy, Token::A, OrderType::Gtc)
        .with_id(OrderId::new("a-open"));

    let (strategy, intents) = run(&[
        tick(0, 0, 0, vec![]),
        tick(10, 3, 0, vec![]),
        tick(20, 3, 3, vec![a_order.clone()]),
    ]);

    let third = &intents[2];
    assert_eq!(third.to_cancel, vec![a_order]);
    assert_eq!(
        third.to_place,
        vec![
            Order::new(dec!(10), dec!(0.01), Side::Sell, Token::A, OrderType::Fok),
            Order::new(dec!(10), dec!(0.56), Side::Buy, Token::B, OrderType::Gtc),
        ]
    );
    assert_eq!(strategy.pending_reset().map(|r| r.token), Some(Token::B));
}

#[test]
fn reset_is_consumed_once_on_expiry() {
    let (strategy, intents) = run(&[
        tick(0, 0, 0, vec![]),
        tick(10, 3, 0, vec![]),
        tick(69, 3, 0, vec![]),
        tick(70, 3, 0, vec![]),
        tick(71, 3, 0, vec![]),
    ]);

    assert!(intents[2].is_empty());
    assert_eq!(
        intents[3].to_place,
        vec![Order::new(dec!(10), dec!(0.01), Side::Sell, Token::A, OrderType::Fok)]
    );
    assert!(intents[4].is_empty());
    assert!(strategy.pending_reset().is_none());
}

#[test]
fn final_score_favors_winner() {
    let mut final_tick = tick(5, 88, 85, vec![]);
    final_tick.score_board.game_time = "Final".into();

    let (_, intents) = run(&[tick(0, 88, 85, vec![]), final_tick]);

    assert_eq!(
        intents[1].to_place,
        vec![Order::new(dec!(10), dec!(0.46), Side::Buy, Token::A, OrderType::Gtc)]
    );
}
