//! Own order book maintenance.

mod manager;

pub use manager::OrderBookManager;
