//! Criterion benchmarks for SimLab hot paths.
//!
//! Benchmarks:
//! 1. Path simulation (GBM, OU, regime-switching)
//! 2. Rolling indicators (mean, std, z-score)
//! 3. Signal generation (mean reversion, momentum)
//! 4. Backtest replay (full signal → equity pass)
//! 5. End-to-end scenario and seed batch

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use simlab_core::batch::run_batch;
use simlab_core::domain::PriceSeries;
use simlab_core::engine::{run_backtest, CostModel};
use simlab_core::indicators::{rolling_mean, rolling_std, z_score};
use simlab_core::scenario::{run_scenario, ScenarioConfig};
use simlab_core::signals::{MeanReversion, Momentum, SignalGenerator, StrategyKind};
use simlab_core::sims::{GbmParams, OuParams, ProcessConfig, RegimeParams};

const DT: f64 = 1.0 / 252.0;

// ── Helpers ──────────────────────────────────────────────────────────

fn gbm_prices(horizon: usize) -> PriceSeries {
    let process = ProcessConfig::TrendingDiffusion(GbmParams::default());
    let (prices, _) = process.generate(horizon, DT, 42).unwrap();
    prices
}

fn base_scenario(horizon: usize) -> ScenarioConfig {
    ScenarioConfig {
        process: ProcessConfig::MeanRevertingDiffusion(OuParams::default()),
        strategy: StrategyKind::MeanReversion(MeanReversion::default()),
        costs: CostModel::default(),
        horizon_steps: horizon,
        dt: DT,
        seed: 42,
        periods_per_year: 252.0,
    }
}

// ── 1. Path Simulation ───────────────────────────────────────────────

fn bench_simulators(c: &mut Criterion) {
    let mut group = c.benchmark_group("path_simulation");

    for &horizon in &[252, 1260, 2520] {
        let gbm = ProcessConfig::TrendingDiffusion(GbmParams::default());
        group.bench_with_input(BenchmarkId::new("gbm", horizon), &horizon, |b, &h| {
            b.iter(|| gbm.generate(black_box(h), DT, 42).unwrap());
        });

        let ou = ProcessConfig::MeanRevertingDiffusion(OuParams::default());
        group.bench_with_input(BenchmarkId::new("ou", horizon), &horizon, |b, &h| {
            b.iter(|| ou.generate(black_box(h), DT, 42).unwrap());
        });

        let regime = ProcessConfig::RegimeSwitching(RegimeParams::default());
        group.bench_with_input(BenchmarkId::new("regime", horizon), &horizon, |b, &h| {
            b.iter(|| regime.generate(black_box(h), DT, 42).unwrap());
        });
    }

    group.finish();
}

// ── 2. Rolling Indicators ────────────────────────────────────────────

fn bench_indicators(c: &mut Criterion) {
    let mut group = c.benchmark_group("indicators");

    for &horizon in &[1260, 2520] {
        let prices = gbm_prices(horizon);
        group.bench_with_input(
            BenchmarkId::new("rolling_mean_20", horizon),
            &horizon,
            |b, _| {
                b.iter(|| rolling_mean(black_box(&prices.prices), 20));
            },
        );
        group.bench_with_input(
            BenchmarkId::new("rolling_std_20", horizon),
            &horizon,
            |b, _| {
                b.iter(|| rolling_std(black_box(&prices.prices), 20));
            },
        );
        group.bench_with_input(
            BenchmarkId::new("z_score_20", horizon),
            &horizon,
            |b, _| {
                b.iter(|| z_score(black_box(&prices.prices), 20));
            },
        );
    }

    group.finish();
}

// ── 3. Signal Generation ─────────────────────────────────────────────

fn bench_signals(c: &mut Criterion) {
    let mut group = c.benchmark_group("signal_generation");

    let prices = gbm_prices(1260);
    let mean_reversion = MeanReversion::default();
    group.bench_function("mean_reversion_1260", |b| {
        b.iter(|| mean_reversion.produce_signal(black_box(&prices)));
    });

    let momentum = Momentum::default();
    group.bench_function("momentum_1260", |b| {
        b.iter(|| momentum.produce_signal(black_box(&prices)));
    });

    group.finish();
}

// ── 4. Backtest Replay ───────────────────────────────────────────────

fn bench_replay(c: &mut Criterion) {
    let mut group = c.benchmark_group("backtest_replay");

    for &horizon in &[252, 1260, 2520] {
        let prices = gbm_prices(horizon);
        let signals = Momentum::default().produce_signal(&prices);
        let costs = CostModel::default();
        group.bench_with_input(
            BenchmarkId::new("momentum_signals", horizon),
            &horizon,
            |b, _| {
                b.iter(|| {
                    run_backtest(black_box(&prices), black_box(&signals), &costs).unwrap()
                });
            },
        );
    }

    group.finish();
}

// ── 5. Scenario + Batch ──────────────────────────────────────────────

fn bench_scenario(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenario");

    let config = base_scenario(1260);
    group.bench_function("single_run_1260", |b| {
        b.iter(|| run_scenario(black_box(&config)).unwrap());
    });

    let short = base_scenario(252);
    group.bench_function("batch_32_trials_sequential", |b| {
        b.iter(|| run_batch(black_box(&short), 32, false).unwrap());
    });
    group.bench_function("batch_32_trials_parallel", |b| {
        b.iter(|| run_batch(black_box(&short), 32, true).unwrap());
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_simulators,
    bench_indicators,
    bench_signals,
    bench_replay,
    bench_scenario,
);
criterion_main!(benches);
