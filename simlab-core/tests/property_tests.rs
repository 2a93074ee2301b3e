//! Property tests for the simulators, engine, and metrics.

use proptest::prelude::*;

use simlab_core::domain::{EquityCurve, Position, PriceSeries, SignalSeries};
use simlab_core::engine::{run_backtest, CostModel};
use simlab_core::indicators::z_score;
use simlab_core::metrics::max_drawdown;
use simlab_core::signals::{MeanReversion, Momentum, SignalGenerator};
use simlab_core::sims::{GbmParams, OuParams, ProcessConfig, RegimeParams};

const DT: f64 = 1.0 / 252.0;

fn arb_process() -> impl Strategy<Value = ProcessConfig> {
    prop_oneof![
        (-0.5f64..0.5, 0.01f64..0.8, 10.0f64..500.0).prop_map(|(mu, sigma, start_price)| {
            ProcessConfig::TrendingDiffusion(GbmParams {
                mu,
                sigma,
                start_price,
            })
        }),
        (0.01f64..1.0, 0.01f64..0.5, 1.0f64..6.0).prop_map(|(theta, sigma, mean_level)| {
            ProcessConfig::MeanRevertingDiffusion(OuParams {
                theta,
                sigma,
                mean_level,
            })
        }),
        (0.5f64..1.0, 0.5f64..1.0).prop_map(|(p_stay_trend, p_stay_revert)| {
            ProcessConfig::RegimeSwitching(RegimeParams {
                p_stay_trend,
                p_stay_revert,
                ..RegimeParams::default()
            })
        }),
    ]
}

fn arb_prices(len: std::ops::Range<usize>) -> impl Strategy<Value = PriceSeries> {
    prop::collection::vec(1.0f64..1000.0, len).prop_map(PriceSeries::new)
}

fn arb_signals(len: usize) -> impl Strategy<Value = SignalSeries> {
    prop::collection::vec(prop::bool::ANY, len).prop_map(|flags| {
        SignalSeries::new(
            flags
                .into_iter()
                .map(|long| if long { Position::Long } else { Position::Flat })
                .collect(),
        )
    })
}

fn arb_prices_with_signals() -> impl Strategy<Value = (PriceSeries, SignalSeries)> {
    (2usize..200).prop_flat_map(|n| (arb_prices(n..n + 1), arb_signals(n)))
}

proptest! {
    /// Same seed, same path; every price strictly positive and finite.
    #[test]
    fn generators_are_deterministic_and_positive(
        process in arb_process(),
        seed in any::<u64>(),
        horizon in 2usize..400,
    ) {
        let (a, _) = process.generate(horizon, DT, seed).unwrap();
        let (b, _) = process.generate(horizon, DT, seed).unwrap();
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(a.len(), horizon);
        for &p in &a.prices {
            prop_assert!(p.is_finite() && p > 0.0);
        }
    }

    /// Drawdown is never positive, and is exactly zero for a sorted curve.
    #[test]
    fn max_drawdown_is_non_positive(
        values in prop::collection::vec(0.1f64..10.0, 2..200),
    ) {
        let curve = EquityCurve { equity: values.clone() };
        prop_assert!(max_drawdown(&curve) <= 0.0);

        let mut sorted = values;
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
        let rising = EquityCurve { equity: sorted };
        prop_assert_eq!(max_drawdown(&rising), 0.0);
    }

    /// Every trade the engine emits is closed, ordered, and within bounds;
    /// equity stays strictly positive throughout.
    #[test]
    fn engine_trades_are_well_formed(
        (prices, signals) in arb_prices_with_signals(),
    ) {
        let n = prices.len();
        let costs = CostModel::new(0.001, 0.0005);
        let result = run_backtest(&prices, &signals, &costs).unwrap();

        prop_assert_eq!(result.equity_curve.len(), n);
        for &eq in &result.equity_curve.equity {
            prop_assert!(eq.is_finite() && eq > 0.0);
        }
        let mut prev_exit = 0usize;
        for trade in &result.trades {
            prop_assert!(trade.entry_step <= trade.exit_step);
            prop_assert!(trade.exit_step < n);
            prop_assert!(trade.entry_step >= prev_exit);
            prev_exit = trade.exit_step;
        }
    }

    /// Frictionless accounting identity: final equity is the product of
    /// (1 + net_return) over all trades.
    #[test]
    fn frictionless_equity_is_product_of_trade_returns(
        (prices, signals) in arb_prices_with_signals(),
    ) {
        let result = run_backtest(&prices, &signals, &CostModel::frictionless()).unwrap();
        let product: f64 = result.trades.iter().map(|t| 1.0 + t.net_return).product();
        let final_eq = result.equity_curve.final_equity();
        prop_assert!((final_eq - product).abs() < 1e-9 * product.abs().max(1.0));
    }

    /// Strategies stay flat through their warmup window.
    #[test]
    fn strategies_stay_flat_during_warmup(
        prices in arb_prices(60..200),
    ) {
        let momentum = Momentum::default();
        let signals = momentum.produce_signal(&prices);
        for t in 0..momentum.warmup_steps().min(prices.len()) {
            prop_assert_eq!(signals.positions[t], Position::Flat);
        }

        let mr = MeanReversion::default();
        let signals = mr.produce_signal(&prices);
        for t in 0..mr.warmup_steps().min(prices.len()) {
            prop_assert_eq!(signals.positions[t], Position::Flat);
        }
    }

    /// Every Flat→Long edge the mean-reversion generator emits coincides
    /// with a band breach at that step.
    #[test]
    fn mean_reversion_entries_coincide_with_band_breaches(
        prices in arb_prices(10..120),
    ) {
        let strategy = MeanReversion {
            window: 5,
            entry_z: 1.0,
            exit_z: 0.5,
            stop_z: 1.5,
        };
        let signals = strategy.produce_signal(&prices);
        prop_assert_eq!(signals.len(), prices.len());

        let z = z_score(&prices.prices, strategy.window);
        for t in 1..signals.len() {
            let entered = signals.positions[t - 1] == Position::Flat
                && signals.positions[t] == Position::Long;
            if entered {
                prop_assert!(z[t].abs() > strategy.entry_z);
            }
        }
    }
}
