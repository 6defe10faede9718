//! TOML backtest configuration.
//!
//! ```toml
//! [strategy]
//! index = "DAX"
//! spread = 0.9
//! margin = 1.0
//! limit = 6.0
//! stop = 9.0
//! stake = 100.0
//! trade_window = 30
//! net_earnings_fraction = 0.75
//! dst_month_change = 3
//! dst_day_change = 26
//! non_dst_hour_trading_start = 8
//! open_minute = 0
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use breakout_core::StrategyConfig;

/// Errors from loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Top-level configuration file: one instrument's strategy parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestConfig {
    pub strategy: StrategyConfig,
}

impl BacktestConfig {
    pub fn new(strategy: StrategyConfig) -> Self {
        Self { strategy }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_strategy(&self.strategy)
    }
}

/// Check parameter ranges the simulator and session filter rely on.
pub fn validate_strategy(s: &StrategyConfig) -> Result<(), ConfigError> {
    let invalid = |msg: String| -> Result<(), ConfigError> { Err(ConfigError::Invalid(msg)) };

    if s.index.trim().is_empty() {
        return invalid("index must not be empty".into());
    }
    for (name, value) in [("spread", s.spread), ("margin", s.margin)] {
        if !value.is_finite() || value < 0.0 {
            return invalid(format!("{name} must be a non-negative number, got {value}"));
        }
    }
    for (name, value) in [("limit", s.limit), ("stop", s.stop), ("stake", s.stake)] {
        if !value.is_finite() || value <= 0.0 {
            return invalid(format!("{name} must be positive, got {value}"));
        }
    }
    if s.trade_window == 0 {
        return invalid("trade_window must be at least 1".into());
    }
    if !(s.net_earnings_fraction > 0.0 && s.net_earnings_fraction <= 1.0) {
        return invalid(format!(
            "net_earnings_fraction must be in (0, 1], got {}",
            s.net_earnings_fraction
        ));
    }
    if !(1..=12).contains(&s.dst_month_change) {
        return invalid(format!("dst_month_change out of range: {}", s.dst_month_change));
    }
    if !(1..=31).contains(&s.dst_day_change) {
        return invalid(format!("dst_day_change out of range: {}", s.dst_day_change));
    }
    if !(1..=23).contains(&s.non_dst_hour_trading_start) {
        return invalid(format!(
            "non_dst_hour_trading_start out of range: {}",
            s.non_dst_hour_trading_start
        ));
    }
    if s.open_minute >= 60 {
        return invalid(format!("open_minute out of range: {}", s.open_minute));
    }
    Ok(())
}

/// Deterministic BLAKE3 hash of a strategy configuration.
///
/// Two runs with identical parameters share the hash.
pub fn config_hash(strategy: &StrategyConfig) -> String {
    // serde_json keeps struct field order, so equal configs give equal JSON.
    let json = serde_json::to_string(strategy).unwrap_or_default();
    blake3::hash(json.as_bytes()).to_hex().to_string()
}
