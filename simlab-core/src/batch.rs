//! Monte Carlo batch runner — many independent seeds, zero coordination.
//!
//! Each trial derives its own sub-seed from the scenario's master seed and
//! owns its series end to end, so trials run in parallel with no shared
//! state and the aggregate is identical regardless of thread count.
//! The batch varies seeds only; parameter search is out of scope.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};
use crate::metrics::PerformanceMetrics;
use crate::rng::SeedHierarchy;
use crate::scenario::{run_scenario_with_seed, ScenarioConfig};

/// Summary statistics of one metric across trials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricDistribution {
    pub metric: String,
    pub mean: f64,
    pub median: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

impl MetricDistribution {
    pub fn from_values(metric: &str, values: &[f64]) -> Self {
        let n = values.len();
        assert!(n > 0, "distribution needs at least one value");

        let mut sorted: Vec<f64> = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let mean = values.iter().sum::<f64>() / n as f64;
        let var = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n as f64;
        let median = if n % 2 == 1 {
            sorted[n / 2]
        } else {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        };

        Self {
            metric: metric.to_string(),
            mean,
            median,
            std: var.sqrt(),
            min: sorted[0],
            max: sorted[n - 1],
        }
    }
}

/// Aggregate result of a seed batch.
#[derive(Debug, Clone, Serialize)]
pub struct BatchResult {
    pub trials: usize,
    pub master_seed: u64,
    pub per_trial: Vec<PerformanceMetrics>,
    pub sharpe: MetricDistribution,
    pub annualized_return: MetricDistribution,
    pub max_drawdown: MetricDistribution,
}

/// Run `trials` independent copies of a scenario, one sub-seed per trial.
///
/// `config.seed` is the master seed; trial i runs with
/// `SeedHierarchy::sub_seed(i)`. Results are ordered by trial index
/// regardless of execution order.
pub fn run_batch(config: &ScenarioConfig, trials: usize, parallel: bool) -> Result<BatchResult> {
    if trials == 0 {
        return Err(SimError::invalid("trials", 0.0, "must be > 0"));
    }
    // Validate once, before spawning any work.
    config.strategy.build()?;
    config.costs.validate()?;

    let hierarchy = SeedHierarchy::new(config.seed);
    let run_trial = |trial: u64| -> Result<PerformanceMetrics> {
        let result = run_scenario_with_seed(config, hierarchy.sub_seed(trial))?;
        Ok(result.metrics)
    };

    let per_trial: Vec<PerformanceMetrics> = if parallel {
        (0..trials as u64)
            .into_par_iter()
            .map(run_trial)
            .collect::<Result<Vec<_>>>()?
    } else {
        (0..trials as u64)
            .map(run_trial)
            .collect::<Result<Vec<_>>>()?
    };

    let sharpes: Vec<f64> = per_trial.iter().map(|m| m.sharpe).collect();
    let returns: Vec<f64> = per_trial.iter().map(|m| m.annualized_return).collect();
    let drawdowns: Vec<f64> = per_trial.iter().map(|m| m.max_drawdown).collect();

    Ok(BatchResult {
        trials,
        master_seed: config.seed,
        sharpe: MetricDistribution::from_values("sharpe", &sharpes),
        annualized_return: MetricDistribution::from_values("annualized_return", &returns),
        max_drawdown: MetricDistribution::from_values("max_drawdown", &drawdowns),
        per_trial,
    })
}
