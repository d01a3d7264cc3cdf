//! Trailing simple moving average over an arbitrary series.
//!
//! Used to smooth the raw regression slope. A window containing NaN yields NaN.
//! Lookback: width - 1 past the first valid input.

/// Rolling mean of `values` over a trailing window of `width` values.
pub fn rolling_mean(values: &[f64], width: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];

    if width == 0 || n < width {
        return result;
    }

    // Each window is summed on its own: a window of zeros is exactly zero,
    // whatever came before it.
    for i in (width - 1)..n {
        let window = &values[i + 1 - width..=i];
        if window.iter().any(|v| v.is_nan()) {
            continue;
        }
        result[i] = window.iter().sum::<f64>() / width as f64;
    }

    result
}
