//! Performance metrics — pure functions that compute run statistics.
//!
//! Every metric is a pure function: equity curve and/or trade list in,
//! scalar out.
//!
//! # Zero-denominator policy
//!
//! Sharpe and Calmar divide by volatility and |max drawdown| respectively.
//! When the denominator is zero and the annualized return is also zero (no
//! trades taken), the ratio is 0.0. When the denominator is zero but the
//! return is nonzero, the ratio is `f64::INFINITY` with the sign of the
//! return — an explicit sentinel, never a silent NaN.

use serde::{Deserialize, Serialize};

use crate::domain::{EquityCurve, TradeRecord};

/// Step counts per year for daily bars.
pub const DEFAULT_PERIODS_PER_YEAR: f64 = 252.0;

const EPS: f64 = 1e-12;

/// Aggregate performance metrics for a single backtest run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub total_return: f64,
    pub annualized_return: f64,
    pub annualized_volatility: f64,
    pub sharpe: f64,
    pub calmar: f64,
    pub max_drawdown: f64,
    pub win_rate: f64,
    pub avg_trade_duration: f64,
    pub trade_count: usize,
}

impl PerformanceMetrics {
    /// Compute all metrics from an equity curve and trade list.
    pub fn compute(
        equity_curve: &EquityCurve,
        trades: &[TradeRecord],
        periods_per_year: f64,
    ) -> Self {
        let ann_return = annualized_return(equity_curve, periods_per_year);
        let ann_vol = annualized_volatility(equity_curve, periods_per_year);
        let max_dd = max_drawdown(equity_curve);
        Self {
            total_return: total_return(equity_curve),
            annualized_return: ann_return,
            annualized_volatility: ann_vol,
            sharpe: ratio_or_sentinel(ann_return, ann_vol),
            calmar: ratio_or_sentinel(ann_return, max_dd.abs()),
            max_drawdown: max_dd,
            win_rate: win_rate(trades),
            avg_trade_duration: avg_trade_duration(trades),
            trade_count: trades.len(),
        }
    }
}

/// The documented zero-denominator policy for Sharpe and Calmar.
fn ratio_or_sentinel(numerator: f64, denominator: f64) -> f64 {
    if denominator.abs() < EPS {
        if numerator.abs() < EPS {
            0.0
        } else {
            f64::INFINITY.copysign(numerator)
        }
    } else {
        numerator / denominator
    }
}

/// Total return as a fraction: (final - initial) / initial.
pub fn total_return(equity_curve: &EquityCurve) -> f64 {
    if equity_curve.len() < 2 {
        return 0.0;
    }
    let initial = equity_curve.equity[0];
    if initial <= 0.0 {
        return 0.0;
    }
    (equity_curve.final_equity() - initial) / initial
}

/// Compound growth rate scaled to `periods_per_year`.
///
/// Growth is compounded over `len - 1` steps. Returns 0.0 for curves
/// shorter than two steps.
pub fn annualized_return(equity_curve: &EquityCurve, periods_per_year: f64) -> f64 {
    let n = equity_curve.len();
    if n < 2 {
        return 0.0;
    }
    let initial = equity_curve.equity[0];
    let final_eq = equity_curve.final_equity();
    if initial <= 0.0 || final_eq <= 0.0 {
        return 0.0;
    }
    let steps = (n - 1) as f64;
    (final_eq / initial).powf(periods_per_year / steps) - 1.0
}

/// Sample standard deviation of per-step simple returns, scaled by
/// sqrt(periods_per_year).
pub fn annualized_volatility(equity_curve: &EquityCurve, periods_per_year: f64) -> f64 {
    let returns = equity_curve.step_returns();
    if returns.len() < 2 {
        return 0.0;
    }
    let mean = returns.iter().sum::<f64>() / returns.len() as f64;
    let var = returns.iter().map(|r| (r - mean) * (r - mean)).sum::<f64>()
        / (returns.len() - 1) as f64;
    var.sqrt() * periods_per_year.sqrt()
}

/// Annualized Sharpe ratio (risk-free rate assumed zero).
pub fn sharpe_ratio(equity_curve: &EquityCurve, periods_per_year: f64) -> f64 {
    ratio_or_sentinel(
        annualized_return(equity_curve, periods_per_year),
        annualized_volatility(equity_curve, periods_per_year),
    )
}

/// Calmar ratio: annualized return / |max drawdown|.
pub fn calmar_ratio(equity_curve: &EquityCurve, periods_per_year: f64) -> f64 {
    ratio_or_sentinel(
        annualized_return(equity_curve, periods_per_year),
        max_drawdown(equity_curve).abs(),
    )
}

/// Maximum drawdown as a negative fraction (e.g., -0.15 = 15% drawdown).
///
/// Always <= 0; exactly 0 only for a monotonically non-decreasing curve.
pub fn max_drawdown(equity_curve: &EquityCurve) -> f64 {
    let mut peak = f64::NEG_INFINITY;
    let mut max_dd = 0.0_f64;
    for &eq in &equity_curve.equity {
        if eq > peak {
            peak = eq;
        }
        if peak > 0.0 {
            let dd = (eq - peak) / peak;
            if dd < max_dd {
                max_dd = dd;
            }
        }
    }
    max_dd
}

/// Fraction of trades with positive net return. Forced end-of-series
/// closures count like any other trade.
pub fn win_rate(trades: &[TradeRecord]) -> f64 {
    if trades.is_empty() {
        return 0.0;
    }
    let winners = trades.iter().filter(|t| t.is_winner()).count();
    winners as f64 / trades.len() as f64
}

/// Mean of (exit step - entry step) over all trades; 0.0 with no trades.
pub fn avg_trade_duration(trades: &[TradeRecord]) -> f64 {
    if trades.is_empty() {
        return 0.0;
    }
    let total: usize = trades.iter().map(|t| t.steps_held()).sum();
    total as f64 / trades.len() as f64
}
