//! Breakout Core: domain types and the single-day breakout simulator.
//!
//! This crate contains the pure part of the backtester:
//! - Domain types (price bars, trading days, trade outcomes)
//! - Strategy configuration
//! - The per-day state machine: range, entry detection, exit resolution, close-out
//!
//! Nothing here performs I/O. Days are independent, so callers may simulate
//! them in any order or in parallel.

pub mod config;
pub mod domain;
pub mod error;
pub mod simulator;

pub use config::StrategyConfig;
pub use error::SimulationError;
pub use simulator::simulate;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: values handed to worker threads are Send + Sync.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<domain::PriceBar>();
        require_sync::<domain::PriceBar>();
        require_send::<domain::TradingDay>();
        require_sync::<domain::TradingDay>();
        require_send::<domain::TradeOutcome>();
        require_sync::<domain::TradeOutcome>();
        require_send::<StrategyConfig>();
        require_sync::<StrategyConfig>();
        require_send::<SimulationError>();
        require_sync::<SimulationError>();
    }
}
