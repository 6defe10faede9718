//! Domain types for the breakout backtester

pub mod bar;
pub mod day;
pub mod outcome;

pub use bar::PriceBar;
pub use day::{DayKey, TradingDay, WARMUP_BARS};
pub use outcome::{ExitReason, Side, TradeOutcome};
