//! SimLab CLI — generate, run, and batch commands.
//!
//! Commands:
//! - `generate` — simulate a price path and write it as CSV
//! - `run` — execute one backtest scenario from a TOML config file
//! - `batch` — run many seeds of one scenario and summarize the spread

mod export;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use simlab_core::batch::{run_batch, BatchResult, MetricDistribution};
use simlab_core::scenario::{run_scenario, ScenarioConfig, ScenarioResult};

use crate::export::{export_prices_csv, save_artifacts};

#[derive(Parser)]
#[command(
    name = "simlab",
    about = "SimLab CLI — synthetic path simulation and backtesting"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a price path from a scenario config and write it as CSV.
    Generate {
        /// Path to a TOML scenario config file.
        #[arg(long)]
        config: PathBuf,

        /// Override the config's seed.
        #[arg(long)]
        seed: Option<u64>,

        /// Override the config's horizon (number of steps).
        #[arg(long)]
        horizon: Option<usize>,

        /// Output CSV file.
        #[arg(long, default_value = "prices.csv")]
        out: PathBuf,
    },
    /// Execute one backtest scenario from a TOML config file.
    Run {
        /// Path to a TOML scenario config file.
        #[arg(long)]
        config: PathBuf,

        /// Override the config's seed.
        #[arg(long)]
        seed: Option<u64>,

        /// Output directory for artifacts (prices.csv, equity.csv,
        /// trades.csv, metrics.json). No artifacts without this flag.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Run many seeds of one scenario and summarize the metric spread.
    Batch {
        /// Path to a TOML scenario config file.
        #[arg(long)]
        config: PathBuf,

        /// Number of independent trials.
        #[arg(long, default_value_t = 100)]
        trials: usize,

        /// Override the config's master seed.
        #[arg(long)]
        seed: Option<u64>,

        /// Run trials sequentially instead of across rayon workers.
        #[arg(long, default_value_t = false)]
        sequential: bool,

        /// Write the full batch result as JSON to this file.
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            config,
            seed,
            horizon,
            out,
        } => run_generate(&config, seed, horizon, &out),
        Commands::Run { config, seed, out } => run_scenario_cmd(&config, seed, out.as_deref()),
        Commands::Batch {
            config,
            trials,
            seed,
            sequential,
            out,
        } => run_batch_cmd(&config, trials, seed, sequential, out.as_deref()),
    }
}

fn load_config(path: &Path) -> Result<ScenarioConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("failed to parse config: {}", path.display()))
}

fn run_generate(
    config_path: &Path,
    seed: Option<u64>,
    horizon: Option<usize>,
    out: &Path,
) -> Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(seed) = seed {
        config.seed = seed;
    }
    if let Some(horizon) = horizon {
        config.horizon_steps = horizon;
    }

    let (prices, regimes) = config
        .process
        .generate(config.horizon_steps, config.dt, config.seed)?;
    let csv = export_prices_csv(&prices, regimes.as_ref())?;
    std::fs::write(out, &csv)
        .with_context(|| format!("failed to write {}", out.display()))?;

    println!(
        "Wrote {} steps of {} to {}",
        prices.len(),
        config.process.name(),
        out.display()
    );
    Ok(())
}

fn run_scenario_cmd(config_path: &Path, seed: Option<u64>, out: Option<&Path>) -> Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(seed) = seed {
        config.seed = seed;
    }

    let result = run_scenario(&config)?;
    print_summary(&config, &result);

    if let Some(out) = out {
        save_artifacts(&result, out)?;
        println!("Artifacts saved to: {}", out.display());
    }
    Ok(())
}

fn run_batch_cmd(
    config_path: &Path,
    trials: usize,
    seed: Option<u64>,
    sequential: bool,
    out: Option<&Path>,
) -> Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(seed) = seed {
        config.seed = seed;
    }

    let result = run_batch(&config, trials, !sequential)?;
    print_batch_summary(&config, &result);

    if let Some(out) = out {
        let json = serde_json::to_string_pretty(&result)
            .context("failed to serialize batch result to JSON")?;
        std::fs::write(out, &json)
            .with_context(|| format!("failed to write {}", out.display()))?;
        println!("Batch result saved to: {}", out.display());
    }
    Ok(())
}

fn print_summary(config: &ScenarioConfig, result: &ScenarioResult) {
    let m = &result.metrics;
    println!();
    println!("=== Scenario Result ===");
    println!("Process:        {}", config.process.name());
    println!("Strategy:       {}", config.strategy.name());
    println!("Steps:          {}", result.prices.len());
    println!("Seed:           {}", config.seed);
    println!("Trades:         {}", m.trade_count);
    println!();
    println!("--- Performance ---");
    println!("Total Return:   {:.2}%", m.total_return * 100.0);
    println!("Ann. Return:    {:.2}%", m.annualized_return * 100.0);
    println!("Ann. Vol:       {:.2}%", m.annualized_volatility * 100.0);
    println!("Sharpe:         {:.3}", m.sharpe);
    println!("Calmar:         {:.3}", m.calmar);
    println!("Max Drawdown:   {:.2}%", m.max_drawdown * 100.0);
    println!("Win Rate:       {:.1}%", m.win_rate * 100.0);
    println!("Avg Duration:   {:.1} steps", m.avg_trade_duration);
    println!();
}

fn print_batch_summary(config: &ScenarioConfig, result: &BatchResult) {
    println!();
    println!("=== Batch Result ===");
    println!("Process:        {}", config.process.name());
    println!("Strategy:       {}", config.strategy.name());
    println!("Trials:         {}", result.trials);
    println!("Master Seed:    {}", result.master_seed);
    println!();
    println!(
        "{:<20} {:>9} {:>9} {:>9} {:>9} {:>9}",
        "Metric", "Mean", "Median", "Std", "Min", "Max"
    );
    println!("{}", "-".repeat(70));
    print_distribution(&result.sharpe);
    print_distribution(&result.annualized_return);
    print_distribution(&result.max_drawdown);
    println!();
}

fn print_distribution(dist: &MetricDistribution) {
    println!(
        "{:<20} {:>9.3} {:>9.3} {:>9.3} {:>9.3} {:>9.3}",
        dist.metric, dist.mean, dist.median, dist.std, dist.min, dist.max
    );
}
