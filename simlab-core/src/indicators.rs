//! Rolling indicators — pure functions over a price slice.
//!
//! Each function returns a vector aligned 1:1 with the input, with NaN while
//! the lookback window is incomplete (first valid value at index
//! `window - 1`). Signal generators treat NaN as "no opinion".

/// Rolling mean over `window` values, NaN until the window fills.
pub fn rolling_mean(prices: &[f64], window: usize) -> Vec<f64> {
    assert!(window >= 1, "rolling_mean window must be >= 1");
    let n = prices.len();
    let mut result = vec![f64::NAN; n];
    if n < window {
        return result;
    }

    let mut sum: f64 = prices[..window].iter().sum();
    result[window - 1] = sum / window as f64;
    for i in window..n {
        sum += prices[i] - prices[i - window];
        result[i] = sum / window as f64;
    }
    result
}

/// Rolling sample standard deviation (ddof = 1), NaN until the window fills.
pub fn rolling_std(prices: &[f64], window: usize) -> Vec<f64> {
    assert!(window >= 2, "rolling_std window must be >= 2");
    let n = prices.len();
    let mut result = vec![f64::NAN; n];
    if n < window {
        return result;
    }

    for i in (window - 1)..n {
        let slice = &prices[i + 1 - window..=i];
        let mean = slice.iter().sum::<f64>() / window as f64;
        let ss: f64 = slice.iter().map(|p| (p - mean) * (p - mean)).sum();
        result[i] = (ss / (window - 1) as f64).sqrt();
    }
    result
}

/// Rolling z-score: `(price - rolling_mean) / rolling_std`.
///
/// NaN while the window is incomplete and wherever the rolling std is zero
/// (a flat window has no meaningful deviation).
pub fn z_score(prices: &[f64], window: usize) -> Vec<f64> {
    let mean = rolling_mean(prices, window);
    let std = rolling_std(prices, window);
    prices
        .iter()
        .zip(mean.iter().zip(std.iter()))
        .map(|(&p, (&m, &s))| {
            if s.is_nan() || s == 0.0 {
                f64::NAN
            } else {
                (p - m) / s
            }
        })
        .collect()
}
