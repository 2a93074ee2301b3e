//! Stochastic path simulators — the synthetic data the engine backtests.
//!
//! Three processes: trending diffusion (GBM), mean-reverting diffusion (OU),
//! and a two-state Markov regime switch composing both. Every simulator
//! validates its parameters before the first random draw and seeds its own
//! `StdRng`, so identical seeds produce bit-identical series.

pub mod gbm;
pub mod ou;
pub mod regime;

pub use gbm::{simulate_gbm, GbmParams};
pub use ou::{simulate_ou, OuParams};
pub use regime::{simulate_regime_switching, RegimeParams};

use serde::{Deserialize, Serialize};

use crate::domain::{PriceSeries, RegimeSeries};
use crate::error::{Result, SimError};

/// Process selector for config files and the batch runner.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ProcessConfig {
    TrendingDiffusion(GbmParams),
    MeanRevertingDiffusion(OuParams),
    RegimeSwitching(RegimeParams),
}

impl ProcessConfig {
    /// Generate a price path (and regime labels where the process has them).
    pub fn generate(
        &self,
        horizon_steps: usize,
        dt: f64,
        seed: u64,
    ) -> Result<(PriceSeries, Option<RegimeSeries>)> {
        match self {
            Self::TrendingDiffusion(params) => {
                Ok((simulate_gbm(params, horizon_steps, dt, seed)?, None))
            }
            Self::MeanRevertingDiffusion(params) => {
                Ok((simulate_ou(params, horizon_steps, dt, seed)?, None))
            }
            Self::RegimeSwitching(params) => {
                let (prices, regimes) = simulate_regime_switching(params, horizon_steps, dt, seed)?;
                Ok((prices, Some(regimes)))
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::TrendingDiffusion(_) => "trending-diffusion",
            Self::MeanRevertingDiffusion(_) => "mean-reverting-diffusion",
            Self::RegimeSwitching(_) => "regime-switching",
        }
    }
}

/// Shared validation for the (horizon, dt) pair. Runs before any draw.
pub(crate) fn validate_horizon(horizon_steps: usize, dt: f64) -> Result<()> {
    if horizon_steps == 0 {
        return Err(SimError::invalid(
            "horizon_steps",
            horizon_steps as f64,
            "must be > 0",
        ));
    }
    if !(dt > 0.0) {
        return Err(SimError::invalid("dt", dt, "must be > 0"));
    }
    Ok(())
}

pub(crate) fn validate_sigma(sigma: f64) -> Result<()> {
    if !(sigma >= 0.0) {
        return Err(SimError::invalid("sigma", sigma, "must be >= 0"));
    }
    Ok(())
}

pub(crate) fn validate_start_price(start_price: f64) -> Result<()> {
    if !(start_price > 0.0) {
        return Err(SimError::invalid(
            "start_price",
            start_price,
            "must be > 0",
        ));
    }
    Ok(())
}
