//! Criterion benchmarks for the day simulator.
//!
//! Benchmarks:
//! 1. A quiet day that never breaks out (full entry-window scan)
//! 2. A day that enters early and is held to the close (full session scan)

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use breakout_core::domain::{DayKey, PriceBar, TradingDay, WARMUP_BARS};
use breakout_core::{simulate, StrategyConfig};

// ── Helpers ──────────────────────────────────────────────────────────

fn config(trade_window: usize) -> StrategyConfig {
    StrategyConfig {
        index: "BENCH".into(),
        spread: 1.5,
        margin: 1.0,
        limit: 30.0,
        stop: 30.0,
        stake: 10.0,
        trade_window,
        net_earnings_fraction: 0.75,
        dst_month_change: 3,
        dst_day_change: 12,
        non_dst_hour_trading_start: 14,
        open_minute: 30,
    }
}

fn make_day(session_len: usize, amplitude: f64) -> TradingDay {
    let bars = (0..WARMUP_BARS + session_len)
        .map(|i| {
            let close = 100.0 + (i as f64 * 0.1).sin() * amplitude;
            PriceBar {
                month: 3,
                day: 20,
                hour: 13 + (30 + i as u32) / 60,
                minute: (30 + i as u32) % 60,
                open: close - 0.2,
                high: close + 0.5,
                low: close - 0.5,
                close,
            }
        })
        .collect();
    TradingDay::new(DayKey::new(3, 20), bars)
}

// ── Benchmarks ───────────────────────────────────────────────────────

fn bench_quiet_day(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulate_quiet_day");
    for window in [30usize, 60] {
        let day = make_day(60, 1.0);
        let cfg = config(window);
        group.bench_with_input(BenchmarkId::from_parameter(window), &day, |b, day| {
            b.iter(|| simulate(black_box(&cfg), black_box(day)))
        });
    }
    group.finish();
}

fn bench_held_to_close(c: &mut Criterion) {
    // Wide swing after warm-up breaks the range; limit/stop of 30 are never reached.
    let mut day = make_day(600, 1.0);
    for bar in day.bars.iter_mut().skip(WARMUP_BARS) {
        bar.open += 5.0;
        bar.high += 5.0;
        bar.low += 5.0;
        bar.close += 5.0;
    }
    let cfg = config(30);
    c.bench_function("simulate_held_to_close", |b| {
        b.iter(|| simulate(black_box(&cfg), black_box(&day)))
    });
}

criterion_group!(benches, bench_quiet_day, bench_held_to_close);
criterion_main!(benches);
