//! Exit procedure: pull resting orders and sell off directional exposure.

use tracing::{error, info, warn};

use crate::domain::{Order, OrderType, Price, Side};
use crate::error::{Error, ExecutionError, Result};
use crate::exchange::OrderManager;

/// Cancel every resting order, then flatten the token imbalance.
///
/// The flatten is attempted even when the cancel-all fails. Returns the
/// flattening order, or `None` when A and B holdings match. A rejected
/// flatten is an error, and so is a failed cancel-all once the flatten has
/// gone through.
#[allow(clippy::result_large_err)]
pub async fn shutdown(order_manager: &dyn OrderManager, flatten_price: Price) -> Result<Option<Order>> {
    info!("Shutting down, cancelling all orders");
    let cancelled = order_manager.cancel_all_orders().await;
    if let Err(e) = &cancelled {
        error!(error = %e, "Cancel-all failed, flattening anyway");
    }

    let own = match order_manager.refresh().await {
        Ok(own) => own,
        Err(e) => {
            warn!(error = %e, "Balance refresh failed, using last snapshot");
            order_manager
                .get_order_book()
                .ok_or_else(|| Error::DataUnavailable("balances at shutdown".into()))?
        }
    };

    let Some((token, size)) = own.balances.imbalance() else {
        info!("Holdings balanced, nothing to flatten");
        return cancelled.map(|()| None);
    };

    let order = Order::new(size, flatten_price, Side::Sell, token, OrderType::Fok);
    info!(token = %token, size = %size, price = %flatten_price, "Flattening position");
    let report = order_manager.place_orders(vec![order.clone()]).wait().await;
    if !report.is_complete() {
        error!(%order, "Flatten order was not filled, position left open");
        return Err(ExecutionError::SubmissionFailed(format!("flatten {order} was not filled")).into());
    }

    cancelled.map(|()| Some(order))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Balances, Token};
    use crate::testkit::domain::own_book;
    use crate::testkit::exchange::{Dispatch, RecordingOrderManager};
    use rust_decimal_macros::dec;

    #[test]
    fn excess_home_tokens_are_sold() {
        let manager = RecordingOrderManager::new(Some(own_book(
            vec![],
            Balances::new(dec!(0), dec!(2), dec!(9.5)),
        )));

        let order = tokio_test::block_on(shutdown(&manager, dec!(0.02))).unwrap();

        assert_eq!(
            order,
            Some(Order::new(dec!(7.5), dec!(0.02), Side::Sell, Token::B, OrderType::Fok))
        );
    }

    #[test]
    fn failed_cancel_all_still_flattens() {
        let manager = RecordingOrderManager::new(Some(own_book(
            vec![],
            Balances::new(dec!(100), dec!(25), dec!(0)),
        )));
        manager.fail_cancel_all(true);

        let result = tokio_test::block_on(shutdown(&manager, dec!(0.01)));

        assert!(matches!(result, Err(Error::Connection(_))));
        assert_eq!(
            manager.placed(),
            vec![Order::new(dec!(25), dec!(0.01), Side::Sell, Token::A, OrderType::Fok)]
        );
    }

    #[test]
    fn rejected_flatten_is_reported() {
        let manager = RecordingOrderManager::new(Some(own_book(
            vec![],
            Balances::new(dec!(100), dec!(0), dec!(4)),
        )));
        manager.reject_places(true);

        let result = tokio_test::block_on(shutdown(&manager, dec!(0.01)));

        assert!(matches!(
            result,
            Err(Error::Execution(ExecutionError::SubmissionFailed(_)))
        ));
    }

    #[test]
    fn missing_balances_still_cancels_first() {
        let manager = RecordingOrderManager::new(None);

        let result = tokio_test::block_on(shutdown(&manager, dec!(0.01)));

        assert!(matches!(result, Err(Error::DataUnavailable(_))));
        assert_eq!(manager.dispatches()[0], Dispatch::CancelAll);
    }
}
