//! Synthetic minute bars for offline runs.
//!
//! A seeded random walk over weekdays starting 2024-01-02. Each day gets
//! exactly the bars of its session window, so every generated day survives
//! [`group_days`](crate::session::group_days) for any `trade_window <= 60`.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use breakout_core::domain::PriceBar;
use breakout_core::StrategyConfig;

use crate::session::SessionWindow;

const START_PRICE: f64 = 10_000.0;
const BARS_PER_DAY: u32 = 120;

/// Generate `days` weekdays of minute bars for `config`'s session.
///
/// Identical `(config.index, seed)` pairs produce identical bars.
pub fn generate_minute_bars(config: &StrategyConfig, days: usize, seed: u64) -> Vec<PriceBar> {
    let mut hasher = blake3::Hasher::new();
    hasher.update(config.index.as_bytes());
    hasher.update(&seed.to_le_bytes());
    let mut rng = StdRng::from_seed(*hasher.finalize().as_bytes());

    let window = SessionWindow::from_config(config);
    // Minute moves sized so a range break reaches the exit levels within the hour.
    let step = config.limit.max(config.stop) / 6.0;

    let mut bars = Vec::with_capacity(days * BARS_PER_DAY as usize);
    let mut price = START_PRICE;
    let mut date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap_or_default();

    for _ in 0..days {
        while matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            date = next_day(date);
        }

        let open_hour = window.open_hour(date.month(), date.day());
        let first_minute = open_hour.saturating_sub(1) * 60 + window.open_minute;

        // Overnight gap
        price += rng.gen_range(-2.0..2.0) * step;

        for i in 0..BARS_PER_DAY {
            let minute_of_day = first_minute + i;
            let open = price;
            let close = open + rng.gen_range(-1.0..1.0) * step;
            let high = open.max(close) + rng.gen_range(0.0..0.5) * step;
            let low = open.min(close) - rng.gen_range(0.0..0.5) * step;
            bars.push(PriceBar {
                month: date.month(),
                day: date.day(),
                hour: minute_of_day / 60,
                minute: minute_of_day % 60,
                open,
                high,
                low,
                close,
            });
            price = close;
        }

        date = next_day(date);
    }

    bars
}

fn next_day(date: NaiveDate) -> NaiveDate {
    date.checked_add_days(Days::new(1)).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets;
    use crate::session::group_days;

    #[test]
    fn same_seed_same_bars() {
        let config = presets::dax();
        let a = generate_minute_bars(&config, 3, 7);
        let b = generate_minute_bars(&config, 3, 7);
        assert_eq!(a, b);
        assert_ne!(a, generate_minute_bars(&config, 3, 8));
    }

    #[test]
    fn bars_are_sane() {
        let bars = generate_minute_bars(&presets::dji(), 5, 1);
        assert_eq!(bars.len(), 5 * BARS_PER_DAY as usize);
        assert!(bars.iter().all(PriceBar::is_sane));
    }

    #[test]
    fn every_day_survives_grouping() {
        for config in presets::all() {
            let bars = generate_minute_bars(&config, 20, 42);
            let window = SessionWindow::from_config(&config);
            let days = group_days(&bars, &window, config.trade_window);
            assert_eq!(days.len(), 20, "{}", config.index);
            assert!(days.iter().all(|d| d.bars.len() == BARS_PER_DAY as usize));
        }
    }

    #[test]
    fn skips_weekends() {
        // 2024-01-06 and 01-07 are a weekend.
        let bars = generate_minute_bars(&presets::dax(), 5, 0);
        assert!(bars.iter().all(|b| !(b.month == 1 && (b.day == 6 || b.day == 7))));
        assert_eq!(bars.last().map(|b| b.day), Some(8));
    }
}
