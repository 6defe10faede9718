//! Integration tests for the CSV-to-report pipeline.

use std::fmt::Write as _;
use std::path::Path;

use breakout_core::domain::{ExitReason, PriceBar};
use breakout_runner::{
    generate_minute_bars, load_minute_bars, presets, run_all, run_bars, run_from_dir,
};

fn write_minute_csv(dir: &Path, index: &str, bars: &[PriceBar]) {
    let mut text = String::from("timestamp,datetime,open,high,low,close\n");
    for (i, b) in bars.iter().enumerate() {
        writeln!(
            text,
            "{},2024-{:02}-{:02}T{:02}:{:02}:00Z,{},{},{},{}",
            1_700_000_000 + i * 60,
            b.month,
            b.day,
            b.hour,
            b.minute,
            b.open,
            b.high,
            b.low,
            b.close
        )
        .unwrap();
    }
    std::fs::write(dir.join(format!("{index}.minute.csv")), text).unwrap();
}

fn bar(hour: u32, minute: u32, open: f64, high: f64, low: f64, close: f64) -> PriceBar {
    PriceBar {
        month: 1,
        day: 15,
        hour,
        minute,
        open,
        high,
        low,
        close,
    }
}

/// A DAX day: quiet warm-up hour, breakout above the range, then the limit.
fn dax_limit_day() -> Vec<PriceBar> {
    let mut bars: Vec<PriceBar> = (0..60).map(|m| bar(7, m, 100.0, 100.5, 99.5, 100.0)).collect();
    bars.push(bar(8, 0, 100.0, 101.0, 99.8, 100.5));
    // Range is [98.5, 101.5] with margin 1: long at 101.5 + 0.45
    bars.push(bar(8, 1, 100.5, 102.0, 100.4, 101.8));
    // Limit at 101.95 + 6 + 0.45 = 108.4
    bars.push(bar(8, 2, 102.0, 109.0, 101.9, 108.0));
    bars.extend((3..60).map(|m| bar(8, m, 100.0, 100.5, 99.5, 100.0)));
    bars
}

#[test]
fn csv_day_hits_limit() {
    let dir = tempfile::tempdir().unwrap();
    write_minute_csv(dir.path(), "DAX", &dax_limit_day());

    let result = run_from_dir(&presets::dax(), dir.path()).unwrap();
    let report = &result.report;

    assert_eq!(report.num_total_days, 1);
    assert_eq!(report.num_total, 1);
    assert_eq!(report.results[0].pnl, 6.0);
    assert_eq!(report.results[0].qualifier, '+');

    let stats = report.stats.as_ref().unwrap();
    assert_eq!(stats.pnl, 600.0);
    assert_eq!(stats.percent_trading_days, 1.0);
    assert_eq!(stats.pnl_net_per_day, 450.0);
}

#[test]
fn simulated_exit_is_limit() {
    let config = presets::dax();
    let bars = dax_limit_day();
    let days = breakout_runner::group_days(
        &bars,
        &breakout_runner::SessionWindow::from_config(&config),
        config.trade_window,
    );
    let outcome = breakout_core::simulate(&config, &days[0]).unwrap().unwrap();
    assert_eq!(outcome.exit, ExitReason::Limit);
}

#[test]
fn csv_roundtrip_matches_in_memory_run() {
    let dir = tempfile::tempdir().unwrap();
    let config = presets::dji();
    let bars = generate_minute_bars(&config, 10, 5);
    write_minute_csv(dir.path(), "DJI", &bars);

    let loaded = load_minute_bars(dir.path(), "DJI").unwrap();
    assert_eq!(loaded.bars, bars);

    let from_disk = run_from_dir(&config, dir.path()).unwrap();
    let in_memory = run_bars(&config, &bars).unwrap();
    assert_eq!(from_disk.dataset_hash, loaded.dataset_hash);
    assert_eq!(from_disk.report, in_memory.report);
}

#[test]
fn run_all_sums_net_per_day() {
    let dir = tempfile::tempdir().unwrap();
    let configs = [presets::dax(), presets::dji()];
    for config in &configs {
        write_minute_csv(dir.path(), &config.index, &generate_minute_bars(config, 20, 1));
    }

    let summary = run_all(&configs, dir.path()).unwrap();
    assert_eq!(summary.runs.len(), 2);

    let expected: f64 = summary.runs.iter().filter_map(|r| r.net_per_day()).sum();
    assert_eq!(summary.net_per_day, expected);
    assert_eq!(summary.net_per_month, expected * 20.0);
}

#[test]
fn run_all_presets_counts_dji_once() {
    let dir = tempfile::tempdir().unwrap();
    // dji and dji-wide read the same DJI.minute.csv
    write_minute_csv(dir.path(), "DAX", &generate_minute_bars(&presets::dax(), 40, 0));
    write_minute_csv(dir.path(), "DJI", &generate_minute_bars(&presets::dji(), 40, 0));

    let summary = run_all(&presets::all(), dir.path()).unwrap();
    assert_eq!(summary.runs.len(), 3);

    let dax = summary.runs[0].net_per_day().unwrap_or(0.0);
    let dji = summary.runs[1].net_per_day().unwrap_or(0.0);
    assert_eq!(summary.net_per_day, dax + dji);
}

#[test]
fn run_all_fails_on_missing_instrument() {
    let dir = tempfile::tempdir().unwrap();
    write_minute_csv(dir.path(), "DAX", &dax_limit_day());
    assert!(run_all(&presets::all(), dir.path()).is_err());
}
