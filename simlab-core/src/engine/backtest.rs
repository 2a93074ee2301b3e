//! Step-by-step replay — signals into fills, fills into equity.
//!
//! State machine per run: {Flat, Long}, starting Flat. A desired-position
//! change observed at step t fills at step t+1's price (one-step execution
//! lag, so no signal ever trades on the price that produced it). A position
//! still open at the final step is force-closed at the final price with
//! full exit costs, so every run yields a closed trade set.

use crate::domain::{EquityCurve, ExitKind, Position, PriceSeries, SignalSeries, TradeRecord};
use crate::error::{Result, SimError};

use super::cost_model::CostModel;

/// Everything one backtest run produces. Owned by the caller; the engine
/// keeps no state across runs.
#[derive(Debug, Clone)]
pub struct RunResult {
    pub equity_curve: EquityCurve,
    pub trades: Vec<TradeRecord>,
}

/// An open long position mid-replay.
struct OpenPosition {
    entry_step: usize,
    /// Slipped entry fill price.
    entry_fill: f64,
    /// Equity at the signal step, before entry commission.
    equity_before: f64,
    /// Position size in price units: equity after commission / entry fill.
    units: f64,
}

/// Replay a signal series against its price series.
///
/// Fails with `MisalignedSeries` before any step is replayed if the two
/// series do not share an index. Equity starts at `EquityCurve::BASE`;
/// while Flat it is unchanged (no cash yield), while Long it tracks
/// `price[t] / price[t-1]`, and each side of a trade debits commission and
/// slippage per the cost model.
pub fn run_backtest(
    prices: &PriceSeries,
    signals: &SignalSeries,
    costs: &CostModel,
) -> Result<RunResult> {
    if prices.len() != signals.len() {
        return Err(SimError::MisalignedSeries {
            price_len: prices.len(),
            signal_len: signals.len(),
        });
    }
    costs.validate()?;

    let n = prices.len();
    let mut equity = vec![EquityCurve::BASE; n];
    let mut trades = Vec::new();

    let mut cash = EquityCurve::BASE;
    let mut open: Option<OpenPosition> = None;
    let mut pending: Option<Position> = None;

    for t in 0..n {
        let price = prices.prices[t];

        // Fill the transition signaled at t-1.
        if let Some(target) = pending.take() {
            match (open.take(), target) {
                (None, Position::Long) => {
                    let entry_fill = costs.entry_fill(price);
                    let after_commission = cash * costs.commission_factor();
                    open = Some(OpenPosition {
                        entry_step: t,
                        entry_fill,
                        equity_before: cash,
                        units: after_commission / entry_fill,
                    });
                }
                (Some(position), Position::Flat) => {
                    cash = close_position(&mut trades, position, t, price, costs, ExitKind::Signal);
                }
                // Redundant transitions (already at the target) are no-ops.
                (existing, _) => open = existing,
            }
        }

        // Mark to market.
        equity[t] = match &open {
            Some(position) => position.units * price,
            None => cash,
        };

        // Observe the signal; act on it at t+1. A transition signaled at
        // the final step has no next price to fill at and is dropped.
        let desired = signals.positions[t];
        let held = if open.is_some() {
            Position::Long
        } else {
            Position::Flat
        };
        if desired != held && t + 1 < n {
            pending = Some(desired);
        }
    }

    // Force-close an open position at the final price.
    if let Some(position) = open.take() {
        let last = n - 1;
        cash = close_position(
            &mut trades,
            position,
            last,
            prices.prices[last],
            costs,
            ExitKind::EndOfSeries,
        );
        equity[last] = cash;
    }

    Ok(RunResult {
        equity_curve: EquityCurve { equity },
        trades,
    })
}

fn close_position(
    trades: &mut Vec<TradeRecord>,
    position: OpenPosition,
    exit_step: usize,
    raw_price: f64,
    costs: &CostModel,
    exit_kind: ExitKind,
) -> f64 {
    let exit_fill = costs.exit_fill(raw_price);
    let proceeds = position.units * exit_fill * costs.commission_factor();
    trades.push(TradeRecord {
        side: Position::Long,
        entry_step: position.entry_step,
        entry_price: position.entry_fill,
        exit_step,
        exit_price: exit_fill,
        net_return: proceeds / position.equity_before - 1.0,
        exit_kind,
    });
    proceeds
}
