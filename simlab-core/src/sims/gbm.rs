//! Trending diffusion — geometric Brownian motion.
//!
//! `dS = mu * S * dt + sigma * S * dW`, discretized in log space:
//! `log S[t+1] = log S[t] + mu * dt + sigma * sqrt(dt) * Z`.
//!
//! Evolving the log price (rather than the additive form on S) keeps every
//! price strictly positive, so the additive discretization's negative-price
//! boundary cannot occur and nothing is ever clipped.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, StandardNormal};
use serde::{Deserialize, Serialize};

use super::{validate_horizon, validate_sigma, validate_start_price};
use crate::domain::PriceSeries;
use crate::error::Result;

/// Parameters for the trending diffusion, per unit of time (with the usual
/// `dt = 1/252` convention, per year).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GbmParams {
    /// Drift.
    pub mu: f64,
    /// Volatility.
    pub sigma: f64,
    /// Initial price.
    pub start_price: f64,
}

impl Default for GbmParams {
    fn default() -> Self {
        Self {
            mu: 0.05,
            sigma: 0.20,
            start_price: 100.0,
        }
    }
}

impl GbmParams {
    pub(crate) fn validate(&self) -> Result<()> {
        validate_sigma(self.sigma)?;
        validate_start_price(self.start_price)
    }
}

/// Simulate a trending-diffusion price path.
///
/// Identical `(params, horizon_steps, dt, seed)` produce bit-identical
/// series. Fails with `InvalidParameter` before any random draw.
pub fn simulate_gbm(
    params: &GbmParams,
    horizon_steps: usize,
    dt: f64,
    seed: u64,
) -> Result<PriceSeries> {
    validate_horizon(horizon_steps, dt)?;
    params.validate()?;

    let mut rng = StdRng::seed_from_u64(seed);
    let sqrt_dt = dt.sqrt();
    let drift = params.mu * dt;

    let mut log_price = params.start_price.ln();
    let mut prices = Vec::with_capacity(horizon_steps);
    for _ in 0..horizon_steps {
        let z: f64 = StandardNormal.sample(&mut rng);
        log_price += drift + params.sigma * sqrt_dt * z;
        prices.push(log_price.exp());
    }

    Ok(PriceSeries::new(prices))
}
