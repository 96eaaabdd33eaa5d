//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`exchange`] - Mock collaborators: `MockMarketData`, `ScriptedScoreFeed`,
//!   `RecordingOrderManager`, `MockGateway`.
//! - [`domain`] - Builders for markets, books, scoreboards and tick states.
//! - [`config`] - Canonical test configurations.

pub mod config;
pub mod domain;
pub mod exchange;
