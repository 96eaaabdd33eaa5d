use std::sync::Arc;
use std::time::Duration;

use courtside::app::shutdown;
use courtside::domain::{Balances, Order, OrderType, Side, Token};
use courtside::exchange::OrderManager;
use courtside::orderbook::OrderBookManager;
use courtside::testkit::exchange::MockGateway;
use rust_decimal_macros::dec;
use tokio::sync::watch;

fn buy(size: rust_decimal::Decimal, token: Token) -> Order {
    Order::new(size, dec!(0.50), Side::Buy, token, OrderType::Gtc)
}

fn manager(gateway: &Arc<MockGateway>) -> OrderBookManager {
    OrderBookManager::new(gateway.clone(), Duration::from_millis(10))
}

#[tokio::test]
async fn snapshot_unavailable_until_first_refresh() {
    let gateway = Arc::new(MockGateway::new(Balances::new(dec!(100), dec!(0), dec!(0))));
    let manager = manager(&gateway);

    assert!(manager.get_order_book().is_none());

    let book = manager.refresh().await.unwrap();
    assert_eq!(book.balances.collateral, dec!(100));
    assert!(!book.orders_being_placed);
    assert_eq!(manager.get_order_book(), Some(book));
}

#[tokio::test]
async fn placed_orders_appear_with_exchange_ids() {
    let gateway = Arc::new(MockGateway::new(Balances::default()));
    let manager = manager(&gateway);
    manager.refresh().await.unwrap();

    manager
        .place_orders(vec![buy(dec!(5), Token::A), buy(dec!(7), Token::B)])
        .wait()
        .await;

    let book = manager.get_order_book().unwrap();
    assert_eq!(book.orders.len(), 2);
    assert!(book.orders.iter().all(|o| o.id.is_some()));
    assert_eq!(gateway.resting().len(), 2);
}

#[tokio::test]
async fn cancelled_orders_leave_the_snapshot() {
    let gateway = Arc::new(MockGateway::new(Balances::default()));
    let manager = manager(&gateway);
    manager.refresh().await.unwrap();
    manager
        .place_orders(vec![buy(dec!(5), Token::A), buy(dec!(7), Token::B)])
        .wait()
        .await;

    let a_orders: Vec<Order> = manager
        .get_order_book()
        .unwrap()
        .orders_for(Token::A)
        .cloned()
        .collect();
    manager.cancel_orders(a_orders).wait().await;

    let book = manager.get_order_book().unwrap();
    assert_eq!(book.orders.len(), 1);
    assert_eq!(book.orders[0].token, Token::B);
    assert_eq!(gateway.resting().len(), 1);
}

#[tokio::test]
async fn placement_batches_never_overlap() {
    let gateway = Arc::new(
        MockGateway::new(Balances::default()).with_place_delay(Duration::from_millis(5)),
    );
    let manager = manager(&gateway);
    manager.refresh().await.unwrap();

    let first = manager.place_orders(vec![buy(dec!(1), Token::A), buy(dec!(2), Token::A)]);
    let second = manager.place_orders(vec![buy(dec!(3), Token::B)]);

    assert!(manager.get_order_book().unwrap().orders_being_placed);

    first.wait().await;
    second.wait().await;

    assert_eq!(gateway.max_concurrent_places(), 1);
    let book = manager.get_order_book().unwrap();
    assert!(!book.orders_being_placed);
    assert_eq!(book.orders.len(), 3);
}

#[tokio::test]
async fn rejected_placements_are_logged_not_raised() {
    let gateway = Arc::new(MockGateway::new(Balances::default()));
    gateway.reject_places(true);
    let manager = manager(&gateway);
    manager.refresh().await.unwrap();

    let report = manager.place_orders(vec![buy(dec!(5), Token::A)]).wait().await;

    assert_eq!(report.succeeded, 0);
    assert_eq!(report.failed, 1);
    assert!(manager.get_order_book().unwrap().orders.is_empty());
}

#[tokio::test]
async fn invalid_orders_never_reach_the_exchange() {
    let gateway = Arc::new(MockGateway::new(Balances::default()));
    let manager = manager(&gateway);
    manager.refresh().await.unwrap();

    let report = manager
        .place_orders(vec![
            buy(dec!(0), Token::A),
            Order::new(dec!(5), dec!(1.5), Side::Buy, Token::B, OrderType::Gtc),
            buy(dec!(5), Token::B),
        ])
        .wait()
        .await;

    assert_eq!(report.succeeded, 1);
    assert_eq!(report.failed, 2);
    assert_eq!(gateway.resting().len(), 1);
}

#[tokio::test]
async fn filled_fok_orders_stay_out_of_the_snapshot() {
    let gateway = Arc::new(MockGateway::new(Balances::default()));
    let manager = manager(&gateway);
    manager.refresh().await.unwrap();

    manager
        .place_orders(vec![
            Order::new(dec!(10), dec!(0.01), Side::Sell, Token::A, OrderType::Fok),
            buy(dec!(10), Token::B),
        ])
        .wait()
        .await;

    let book = manager.get_order_book().unwrap();
    assert_eq!(book.orders.len(), 1);
    assert_eq!(book.orders[0].order_type, OrderType::Gtc);
    assert_eq!(book.orders[0].token, Token::B);
}

#[tokio::test]
async fn cancel_all_clears_everything() {
    let gateway = Arc::new(MockGateway::new(Balances::default()));
    let manager = manager(&gateway);
    manager.refresh().await.unwrap();
    manager.place_orders(vec![buy(dec!(5), Token::A)]).wait().await;

    manager.cancel_all_orders().await.unwrap();

    assert_eq!(gateway.cancel_all_calls(), 1);
    assert!(gateway.resting().is_empty());
    assert!(manager.get_order_book().unwrap().orders.is_empty());
}

#[tokio::test]
async fn cancel_all_waits_for_in_flight_placements() {
    let gateway = Arc::new(
        MockGateway::new(Balances::default()).with_place_delay(Duration::from_millis(50)),
    );
    let manager = manager(&gateway);
    manager.refresh().await.unwrap();

    drop(manager.place_orders(vec![buy(dec!(10), Token::A)]));
    drop(manager.place_orders(vec![buy(dec!(4), Token::B)]));
    manager.cancel_all_orders().await.unwrap();

    assert_eq!(gateway.cancel_all_calls(), 1);
    assert!(gateway.resting().is_empty());
    assert!(manager.get_order_book().unwrap().orders.is_empty());
}

#[tokio::test]
async fn shutdown_leaves_nothing_resting_behind_a_slow_placement() {
    let gateway = Arc::new(
        MockGateway::new(Balances::new(dec!(100), dec!(0), dec!(0)))
            .with_place_delay(Duration::from_millis(50)),
    );
    let manager = manager(&gateway);
    manager.refresh().await.unwrap();

    drop(manager.place_orders(vec![Order::new(
        dec!(10),
        dec!(0.52),
        Side::Buy,
        Token::A,
        OrderType::Gtc,
    )]));
    let flatten = shutdown(&manager, dec!(0.01)).await.unwrap();

    assert_eq!(flatten, None);
    assert!(gateway.resting().is_empty(), "resting: {:?}", gateway.resting());
}

#[tokio::test]
async fn shutdown_reports_rejected_flatten() {
    let gateway = Arc::new(MockGateway::new(Balances::new(dec!(100), dec!(10), dec!(0))));
    gateway.reject_places(true);
    let manager = manager(&gateway);

    let result = shutdown(&manager, dec!(0.01)).await;

    assert!(result.is_err());
    assert!(manager.get_order_book().unwrap().orders.is_empty());
}

#[tokio::test]
async fn poller_tracks_exchange_until_shutdown() {
    let gateway = Arc::new(MockGateway::new(Balances::new(dec!(50), dec!(0), dec!(0))));
    let manager = manager(&gateway);
    let (tx, rx) = watch::channel(false);
    let poller = manager.start(rx);

    tokio::time::sleep(Duration::from_millis(30)).await;
    assert_eq!(manager.get_order_book().unwrap().balances.collateral, dec!(50));

    gateway.set_balances(Balances::new(dec!(40), dec!(20), dec!(0)));
    tokio::time::sleep(Duration::from_millis(30)).await;
    assert_eq!(manager.get_order_book().unwrap().balances.token_a, dec!(20));

    tx.send(true).unwrap();
    tokio::time::timeout(Duration::from_secs(1), poller)
        .await
        .expect("poller stops on shutdown")
        .unwrap();
}
