//! Regime-switching composite — a two-state Markov chain over
//! {Trending, MeanReverting}.
//!
//! Each step the active regime's sub-process produces the log-price
//! increment, then the chain draws its transition; a switch takes effect at
//! the next step boundary, never retroactively. The mean-reverting regime
//! anchors its long-run mean to the prevailing log price and re-anchors
//! every `reanchor_every` steps so the two regimes do not drift apart over
//! long horizons.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};
use serde::{Deserialize, Serialize};

use super::{validate_horizon, validate_sigma, validate_start_price};
use crate::domain::{PriceSeries, Regime, RegimeSeries};
use crate::error::{Result, SimError};

/// Parameters for the regime-switching composite.
///
/// Persistence probabilities are the chance of *staying* in the current
/// regime for another step. Each must lie in `(0, 1]`; 1.0 expresses a
/// degenerate chain that never leaves its initial regime. By convention
/// both are > 0.5 so regimes persist, but that is not enforced.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct RegimeParams {
    /// Drift of the trending sub-process.
    pub trend_mu: f64,
    /// Volatility of the trending sub-process.
    pub trend_sigma: f64,
    /// Mean-reversion speed of the mean-reverting sub-process. Must be > 0.
    pub revert_theta: f64,
    /// Noise amplitude of the mean-reverting sub-process.
    pub revert_sigma: f64,
    /// P(stay in Trending | Trending).
    pub p_stay_trend: f64,
    /// P(stay in MeanReverting | MeanReverting).
    pub p_stay_revert: f64,
    /// Initial price.
    pub start_price: f64,
    /// Regime the chain starts in.
    pub initial_regime: Regime,
    /// Steps between re-anchoring the mean-reverting target to the current
    /// log price. Must be >= 1.
    pub reanchor_every: usize,
}

impl Default for RegimeParams {
    fn default() -> Self {
        Self {
            trend_mu: 0.06,
            trend_sigma: 0.18,
            revert_theta: 0.08,
            revert_sigma: 0.12,
            p_stay_trend: 0.97,
            p_stay_revert: 0.95,
            start_price: 100.0,
            initial_regime: Regime::Trending,
            reanchor_every: 50,
        }
    }
}

impl RegimeParams {
    pub(crate) fn validate(&self) -> Result<()> {
        validate_sigma(self.trend_sigma)?;
        validate_sigma(self.revert_sigma)?;
        validate_start_price(self.start_price)?;
        if !(self.revert_theta > 0.0) {
            return Err(SimError::invalid(
                "revert_theta",
                self.revert_theta,
                "must be > 0",
            ));
        }
        validate_persistence("p_stay_trend", self.p_stay_trend)?;
        validate_persistence("p_stay_revert", self.p_stay_revert)?;
        if self.reanchor_every == 0 {
            return Err(SimError::invalid(
                "reanchor_every",
                0.0,
                "must be >= 1",
            ));
        }
        Ok(())
    }

    fn p_stay(&self, regime: Regime) -> f64 {
        match regime {
            Regime::Trending => self.p_stay_trend,
            Regime::MeanReverting => self.p_stay_revert,
        }
    }
}

fn validate_persistence(name: &'static str, p: f64) -> Result<()> {
    if !(p > 0.0 && p <= 1.0) {
        return Err(SimError::invalid(name, p, "must be in (0, 1]"));
    }
    Ok(())
}

/// Simulate a regime-switching price path with its regime labels.
///
/// The labels annotate which regime produced each step's increment; they are
/// a post-hoc diagnostic and must never feed back into strategies. Fails
/// with `InvalidParameter` before any random draw.
pub fn simulate_regime_switching(
    params: &RegimeParams,
    horizon_steps: usize,
    dt: f64,
    seed: u64,
) -> Result<(PriceSeries, RegimeSeries)> {
    validate_horizon(horizon_steps, dt)?;
    params.validate()?;

    let mut rng = StdRng::seed_from_u64(seed);
    let sqrt_dt = dt.sqrt();

    let mut log_price = params.start_price.ln();
    let mut anchor = log_price;
    let mut regime = params.initial_regime;

    let mut prices = Vec::with_capacity(horizon_steps);
    let mut regimes = Vec::with_capacity(horizon_steps);

    for t in 0..horizon_steps {
        regimes.push(regime);
        let z: f64 = StandardNormal.sample(&mut rng);

        match regime {
            Regime::Trending => {
                log_price += params.trend_mu * dt + params.trend_sigma * sqrt_dt * z;
            }
            Regime::MeanReverting => {
                if t % params.reanchor_every == 0 {
                    anchor = log_price;
                }
                log_price +=
                    params.revert_theta * (anchor - log_price) * dt
                        + params.revert_sigma * sqrt_dt * z;
            }
        }
        prices.push(log_price.exp());

        // Transition draw happens every step, even for a degenerate chain,
        // so the random stream is identical across persistence settings.
        let u: f64 = rng.gen();
        if u >= params.p_stay(regime) {
            regime = regime.flip();
        }
    }

    Ok((PriceSeries::new(prices), RegimeSeries { regimes }))
}
