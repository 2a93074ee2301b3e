//! Scenario configuration — one simulated run, end to end.
//!
//! A scenario names a process, a strategy, a cost model, and the run
//! horizon/seed. The CLI deserializes these from TOML; the batch runner
//! reuses them with derived sub-seeds.

use serde::{Deserialize, Serialize};

use crate::domain::{EquityCurve, PriceSeries, RegimeSeries, SignalSeries, TradeRecord};
use crate::engine::{run_backtest, CostModel};
use crate::error::Result;
use crate::metrics::{PerformanceMetrics, DEFAULT_PERIODS_PER_YEAR};
use crate::signals::StrategyKind;
use crate::sims::ProcessConfig;

fn default_horizon() -> usize {
    252 * 4
}

fn default_dt() -> f64 {
    1.0 / 252.0
}

fn default_seed() -> u64 {
    42
}

fn default_periods_per_year() -> f64 {
    DEFAULT_PERIODS_PER_YEAR
}

/// Full configuration for one backtest run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub process: ProcessConfig,
    pub strategy: StrategyKind,
    #[serde(default)]
    pub costs: CostModel,
    #[serde(default = "default_horizon")]
    pub horizon_steps: usize,
    #[serde(default = "default_dt")]
    pub dt: f64,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default = "default_periods_per_year")]
    pub periods_per_year: f64,
}

/// Everything one scenario run produces, as immutable tabular data for
/// downstream plotting/reporting.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioResult {
    pub prices: PriceSeries,
    pub regimes: Option<RegimeSeries>,
    pub signals: SignalSeries,
    pub equity_curve: EquityCurve,
    pub trades: Vec<TradeRecord>,
    pub metrics: PerformanceMetrics,
}

/// Run one scenario: generate → signal → replay → summarize.
///
/// Pure function of the config: identical configs produce identical
/// results. Fails fast on invalid parameters before any randomness is
/// consumed.
pub fn run_scenario(config: &ScenarioConfig) -> Result<ScenarioResult> {
    run_scenario_with_seed(config, config.seed)
}

/// Run one scenario with an explicit seed (the batch runner derives one
/// sub-seed per trial).
pub fn run_scenario_with_seed(config: &ScenarioConfig, seed: u64) -> Result<ScenarioResult> {
    let generator = config.strategy.build()?;
    config.costs.validate()?;

    let (prices, regimes) = config
        .process
        .generate(config.horizon_steps, config.dt, seed)?;
    let signals = generator.produce_signal(&prices);
    let run = run_backtest(&prices, &signals, &config.costs)?;
    let metrics =
        PerformanceMetrics::compute(&run.equity_curve, &run.trades, config.periods_per_year);

    Ok(ScenarioResult {
        prices,
        regimes,
        signals,
        equity_curve: run.equity_curve,
        trades: run.trades,
        metrics,
    })
}
