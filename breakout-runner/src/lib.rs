//! Breakout Runner: data loading, session grouping, aggregation, and export.
//!
//! This crate builds on `breakout-core` to provide:
//! - Minute-bar CSV loading and a seeded synthetic generator
//! - Daylight-saving-aware session filtering and grouping by day
//! - TOML configuration and named instrument presets
//! - Parallel per-day simulation and result aggregation
//! - Run fingerprints and artifact export

pub mod aggregate;
pub mod config;
pub mod data_loader;
pub mod export;
pub mod metrics;
pub mod presets;
pub mod runner;
pub mod session;
pub mod synthetic;

pub use aggregate::{aggregate, AggregateReport, DayResult, MonthResult, TradeStats};
pub use config::{config_hash, BacktestConfig, ConfigError};
pub use data_loader::{load_minute_bars, LoadError, LoadedBars};
pub use runner::{
    run_all, run_bars, run_days, run_from_dir, CombinedSummary, RunError, RunResult,
    TRADING_DAYS_PER_MONTH,
};
pub use session::{group_days, SessionWindow};
pub use synthetic::generate_minute_bars;

#[cfg(test)]
mod send_sync_checks {
    use super::*;

    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    #[test]
    fn run_result_is_send_sync() {
        assert_send::<RunResult>();
        assert_sync::<RunResult>();
    }

    #[test]
    fn report_types_are_send_sync() {
        assert_send::<AggregateReport>();
        assert_sync::<AggregateReport>();
        assert_send::<CombinedSummary>();
        assert_sync::<CombinedSummary>();
    }

    #[test]
    fn config_types_are_send_sync() {
        assert_send::<BacktestConfig>();
        assert_sync::<BacktestConfig>();
        assert_send::<SessionWindow>();
        assert_sync::<SessionWindow>();
    }

    #[test]
    fn errors_are_send_sync() {
        assert_send::<RunError>();
        assert_sync::<RunError>();
    }
}
