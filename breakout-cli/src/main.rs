//! Breakout CLI: run opening-range breakout backtests.
//!
//! Commands:
//! - `run`: backtest one instrument from a named preset or a TOML config file
//! - `all`: backtest every preset and report the combined net earnings
//! - `presets`: list the built-in presets

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use breakout_core::StrategyConfig;
use breakout_runner::export::save_artifacts;
use breakout_runner::presets::{self, PRESET_NAMES};
use breakout_runner::{
    generate_minute_bars, run_all, run_bars, run_from_dir, BacktestConfig, CombinedSummary,
    RunResult,
};

#[derive(Parser)]
#[command(name = "breakout", about = "Breakout CLI: intraday opening-range backtester")]
struct Cli {
    /// Log level when RUST_LOG is unset (error, warn, info, debug, trace).
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Backtest one instrument.
    Run {
        /// Named preset: dax, dji, dji-wide.
        #[arg(long)]
        preset: Option<String>,

        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Directory holding `<INDEX>.minute.csv` files.
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,

        /// Use this many days of synthetic bars instead of reading data.
        #[arg(long)]
        synthetic: Option<usize>,

        /// Seed for synthetic bars.
        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// Save report.json, days.csv and config.toml under this directory.
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Backtest every preset and sum their net earnings per day.
    All {
        /// Directory holding `<INDEX>.minute.csv` files.
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,

        /// Use this many days of synthetic bars instead of reading data.
        #[arg(long)]
        synthetic: Option<usize>,

        /// Seed for synthetic bars.
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
    /// List the built-in presets.
    Presets,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    match cli.command {
        Commands::Run {
            preset,
            config,
            data_dir,
            synthetic,
            seed,
            output_dir,
        } => run_cmd(preset, config, &data_dir, synthetic, seed, output_dir.as_deref()),
        Commands::All {
            data_dir,
            synthetic,
            seed,
        } => all_cmd(&data_dir, synthetic, seed),
        Commands::Presets => {
            list_presets();
            Ok(())
        }
    }
}

fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to init logging: {e}"))
}

fn run_cmd(
    preset_name: Option<String>,
    config_path: Option<PathBuf>,
    data_dir: &Path,
    synthetic: Option<usize>,
    seed: u64,
    output_dir: Option<&Path>,
) -> Result<()> {
    let config = match (preset_name, config_path) {
        (Some(_), Some(_)) => bail!("--config and --preset are mutually exclusive"),
        (None, None) => bail!("one of --config or --preset is required"),
        (Some(name), None) => match presets::by_name(&name) {
            Some(config) => config,
            None => bail!("unknown preset '{name}'. Valid: {}", PRESET_NAMES.join(", ")),
        },
        (None, Some(path)) => BacktestConfig::from_file(&path)?.strategy,
    };

    let result = run_one(&config, data_dir, synthetic, seed)?;
    print_summary(&result);

    if let Some(dir) = output_dir {
        let run_dir = save_artifacts(&result, dir)?;
        println!("Artifacts saved to: {}", run_dir.display());
    }
    Ok(())
}

fn all_cmd(data_dir: &Path, synthetic: Option<usize>, seed: u64) -> Result<()> {
    let configs = presets::all();
    let summary = match synthetic {
        None => run_all(&configs, data_dir)?,
        Some(days) => {
            let runs = configs
                .iter()
                .map(|c| run_bars(c, &generate_minute_bars(c, days, seed)))
                .collect::<Result<Vec<_>, _>>()?;
            CombinedSummary::from_runs(runs)
        }
    };

    for run in &summary.runs {
        print_summary(run);
    }
    println!();
    println!("=== Combined ===");
    println!("Net per day:    {:.2}", summary.net_per_day);
    println!("Net per month:  {:.2}", summary.net_per_month);
    Ok(())
}

fn run_one(
    config: &StrategyConfig,
    data_dir: &Path,
    synthetic: Option<usize>,
    seed: u64,
) -> Result<RunResult> {
    match synthetic {
        Some(days) => {
            info!(index = %config.index, days, seed, "using synthetic bars");
            Ok(run_bars(config, &generate_minute_bars(config, days, seed))?)
        }
        None => Ok(run_from_dir(config, data_dir)?),
    }
}

fn list_presets() {
    println!(
        "{:<10} {:<6} {:>6} {:>6} {:>6} {:>6}  {:<6} {:>5}",
        "name", "index", "spread", "limit", "stop", "stake", "dst", "open"
    );
    for (name, c) in PRESET_NAMES.iter().zip(presets::all()) {
        println!(
            "{:<10} {:<6} {:>6} {:>6} {:>6} {:>6}  {:<6} {:>2}:{:02}",
            name,
            c.index,
            c.spread,
            c.limit,
            c.stop,
            c.stake,
            format!("{}/{}", c.dst_month_change, c.dst_day_change),
            c.non_dst_hour_trading_start,
            c.open_minute
        );
    }
}

fn print_summary(result: &RunResult) {
    let report = &result.report;
    println!();
    println!("=== {} ===", result.index());
    for day in &report.results {
        println!("{:<6} {:>8.2} {}", day.day.to_string(), day.pnl, day.qualifier);
    }
    if !report.by_month.is_empty() {
        println!();
        println!("--- By month ---");
        for m in &report.by_month {
            println!("{:<6} {:>8.2}", m.month, m.pnl);
        }
    }
    println!();
    println!("Days:           {}", report.num_total_days);
    println!(
        "Trades:         {} ({} up, {} down, {} uncertain)",
        report.num_total,
        report.num_positive,
        report.num_negative,
        report.uncertain_count()
    );
    let Some(stats) = &report.stats else {
        println!("No trades.");
        return;
    };
    println!("Win rate:       {:.2}", stats.percent_win);
    println!("Loss rate:      {:.2}", stats.percent_loss);
    println!("Trading days:   {:.2}", stats.percent_trading_days);
    println!("Max drawdown:   {:.2}", stats.max_drawdown);
    println!("P&L:            {:.2}", stats.pnl);
    println!("P&L per trade:  {:.2}", stats.pnl_per_trade);
    println!("P&L per day:    {:.2}", stats.pnl_per_day);
    println!("Net per day:    {:.2}", stats.pnl_net_per_day);
    println!("Config hash:    {}", &result.config_hash[..16.min(result.config_hash.len())]);
}
