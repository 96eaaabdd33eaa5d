//! Main application orchestration.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{error, info, warn};

use super::audit::AuditTrail;
use super::manager::{StrategyManager, TickOutcome};
use super::shutdown::shutdown;
use crate::config::Config;
use crate::domain::strategy::build_strategy;
use crate::error::{ConfigError, Result};
use crate::exchange::{MarketData, OrderGateway, OrderManager, ScoreFeed};
use crate::orderbook::OrderBookManager;

/// External collaborators a host supplies.
#[derive(Clone)]
pub struct Collaborators {
    pub market_data: Arc<dyn MarketData>,
    pub score_feed: Arc<dyn ScoreFeed>,
    pub gateway: Arc<dyn OrderGateway>,
}

/// Main application struct.
pub struct App;

impl App {
    /// Run until `shutdown` flips to `true`, then cancel and flatten.
    #[allow(clippy::result_large_err)]
    pub async fn run(
        config: Config,
        collaborators: Collaborators,
        shutdown: watch::Receiver<bool>,
    ) -> Result<()> {
        info!(
            exchange = collaborators.gateway.exchange_name(),
            "Starting order book manager"
        );
        let order_manager = OrderBookManager::new(
            Arc::clone(&collaborators.gateway),
            config.manager.refresh_interval(),
        );
        let poller = order_manager.start(shutdown.clone());

        let result = Self::run_with_manager(
            config,
            collaborators.market_data,
            collaborators.score_feed,
            Arc::new(order_manager),
            shutdown,
        )
        .await;

        if let Err(e) = poller.await {
            warn!(error = %e, "Order book poller task failed");
        }
        result
    }

    /// Run the reconciliation loop against an already running order manager.
    #[allow(clippy::result_large_err)]
    pub async fn run_with_manager(
        config: Config,
        market_data: Arc<dyn MarketData>,
        score_feed: Arc<dyn ScoreFeed>,
        order_manager: Arc<dyn OrderManager>,
        mut shutdown: watch::Receiver<bool>,
    ) -> Result<()> {
        let front_run = config
            .front_run
            .as_ref()
            .ok_or(ConfigError::MissingField { field: "front_run" })?;
        let flatten_price = front_run.flatten_price;
        let strategy = build_strategy(config.manager.strategy, Some(front_run))?;

        let mut manager = StrategyManager::new(
            config.market(),
            market_data,
            score_feed,
            Arc::clone(&order_manager),
            strategy,
        );
        if let Some(path) = &config.audit.path {
            let audit = AuditTrail::open(path)?;
            info!(path = %audit.path().display(), "Audit trail enabled");
            manager = manager.with_audit(audit);
        }

        info!(
            market = %manager.market(),
            strategy = manager.strategy_name(),
            interval_ms = config.manager.sync_interval_ms,
            "Starting strategy manager"
        );

        let startup_delay = config.manager.startup_delay();
        if !startup_delay.is_zero() {
            tokio::select! {
                _ = shutdown_requested(&mut shutdown) => {
                    return finish(order_manager.as_ref(), flatten_price).await;
                }
                () = tokio::time::sleep(startup_delay) => {}
            }
        }

        let mut interval = tokio::time::interval(config.manager.sync_interval());
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = shutdown_requested(&mut shutdown) => break,
                _ = interval.tick() => {
                    match manager.synchronize().await {
                        Ok(TickOutcome::Aborted(reason)) => {
                            info!(reason = %reason, "Tick aborted");
                        }
                        Ok(TickOutcome::Completed { .. }) => {}
                        Err(e) => {
                            error!(error = %e, "Tick failed");
                        }
                    }
                }
            }
        }

        info!(ticks = manager.ticks(), "Strategy manager stopped");
        finish(order_manager.as_ref(), flatten_price).await
    }
}

/// Resolves once shutdown is requested or the sender is gone.
async fn shutdown_requested(shutdown: &mut watch::Receiver<bool>) {
    loop {
        if *shutdown.borrow() {
            info!("Shutdown signal received");
            return;
        }
        if shutdown.changed().await.is_err() {
            info!("Shutdown channel closed");
            return;
        }
    }
}

#[allow(clippy::result_large_err)]
async fn finish(order_manager: &dyn OrderManager, flatten_price: crate::domain::Price) -> Result<()> {
    shutdown(order_manager, flatten_price).await?;
    info!("Shutdown complete");
    Ok(())
}
