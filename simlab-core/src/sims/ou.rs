//! Mean-reverting diffusion — Ornstein-Uhlenbeck on the log price.
//!
//! `X[t+1] = X[t] + theta * (mean_level - X[t]) * dt + sigma * sqrt(dt) * Z`
//! with `X = log S`, so the emitted price `exp(X)` reverts geometrically
//! toward `exp(mean_level)` and stays strictly positive.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, StandardNormal};
use serde::{Deserialize, Serialize};

use super::{validate_horizon, validate_sigma};
use crate::domain::PriceSeries;
use crate::error::{Result, SimError};

/// Parameters for the mean-reverting diffusion.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OuParams {
    /// Mean-reversion speed. Must be > 0.
    pub theta: f64,
    /// Noise amplitude.
    pub sigma: f64,
    /// Long-run mean of the log price (e.g., `ln(100)` ≈ 4.605).
    pub mean_level: f64,
}

impl Default for OuParams {
    fn default() -> Self {
        Self {
            theta: 0.10,
            sigma: 0.10,
            mean_level: 4.605,
        }
    }
}

impl OuParams {
    pub(crate) fn validate(&self) -> Result<()> {
        if !(self.theta > 0.0) {
            return Err(SimError::invalid("theta", self.theta, "must be > 0"));
        }
        validate_sigma(self.sigma)
    }

    /// Mean-reversion half-life, `ln(2) / theta`, in the units of `1/dt`
    /// steps. Derived diagnostic, not an input.
    pub fn half_life(&self) -> f64 {
        std::f64::consts::LN_2 / self.theta
    }
}

/// Simulate a mean-reverting price path. The process starts at its long-run
/// mean. Fails with `InvalidParameter` before any random draw.
pub fn simulate_ou(
    params: &OuParams,
    horizon_steps: usize,
    dt: f64,
    seed: u64,
) -> Result<PriceSeries> {
    validate_horizon(horizon_steps, dt)?;
    params.validate()?;

    let mut rng = StdRng::seed_from_u64(seed);
    let sqrt_dt = dt.sqrt();

    let mut x = params.mean_level;
    let mut prices = Vec::with_capacity(horizon_steps);
    for _ in 0..horizon_steps {
        let z: f64 = StandardNormal.sample(&mut rng);
        x += params.theta * (params.mean_level - x) * dt + params.sigma * sqrt_dt * z;
        prices.push(x.exp());
    }

    Ok(PriceSeries::new(prices))
}
