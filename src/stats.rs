//! Scalar statistics and numeric integration over sampled series.
//!
//! All spread measures use population conventions (`ddof = 0`, unscaled MAD),
//! matching the baseline statistics of the extraction pipeline.

use crate::error::AnalysisError;
use ndarray::ArrayView1;

/// Arithmetic mean. NaN for an empty view.
pub fn mean(x: ArrayView1<f64>) -> f64 {
    x.sum() / x.len() as f64
}

/// Population standard deviation (divides by n, not n − 1).
pub fn std(x: ArrayView1<f64>) -> f64 {
    let m = mean(x);
    let var = x.iter().map(|&v| (v - m) * (v - m)).sum::<f64>() / x.len() as f64;
    var.sqrt()
}

/// Median. NaN for an empty view.
pub fn median(x: ArrayView1<f64>) -> f64 {
    if x.is_empty() {
        return f64::NAN;
    }
    let mut v = x.to_vec();
    v.sort_unstable_by(f64::total_cmp);
    let n = v.len();
    if n % 2 == 1 {
        v[n / 2]
    } else {
        (v[n / 2 - 1] + v[n / 2]) / 2.0
    }
}

/// Median absolute deviation, unscaled: `median(|x − median(x)|)`.
pub fn median_abs_deviation(x: ArrayView1<f64>) -> f64 {
    let med = median(x);
    let dev: Vec<f64> = x.iter().map(|&v| (v - med).abs()).collect();
    median(ndarray::ArrayView1::from(dev.as_slice()))
}

/// Sampling rate of a time axis: reciprocal of the mean sample spacing.
///
/// `mean(diff(t))` telescopes to `(t_last − t_first) / (n − 1)`.
pub fn sampling_rate(time: ArrayView1<f64>) -> f64 {
    let n = time.len();
    (n - 1) as f64 / (time[n - 1] - time[0])
}

/// Area under `y(x)` by the trapezoid rule.
pub fn trapezoid(y: ArrayView1<f64>, x: ArrayView1<f64>) -> f64 {
    debug_assert_eq!(y.len(), x.len());
    let mut area = 0.0;
    for i in 1..y.len() {
        area += (x[i] - x[i - 1]) * (y[i] + y[i - 1]) / 2.0;
    }
    area
}

/// Area under `y(x)` by the composite Simpson rule on a possibly
/// non-uniform grid (Cartwright formulation).
///
/// An even interval count pairs up exactly; with an odd count the final
/// interval is closed with a trapezoid step.
///
/// # Errors
///
/// [`AnalysisError::InsufficientSamples`] when fewer than 3 points are given.
pub fn simpson(y: ArrayView1<f64>, x: ArrayView1<f64>) -> Result<f64, AnalysisError> {
    debug_assert_eq!(y.len(), x.len());
    let n = y.len();
    if n < 3 {
        return Err(AnalysisError::InsufficientSamples { len: n, needed: 3 });
    }

    let n_intervals = n - 1;
    let mut area = 0.0;
    let mut i = 0;
    while i + 2 < n {
        let h0 = x[i + 1] - x[i];
        let h1 = x[i + 2] - x[i + 1];
        area += (h0 + h1) / 6.0
            * ((2.0 - h1 / h0) * y[i]
                + (h0 + h1) * (h0 + h1) / (h0 * h1) * y[i + 1]
                + (2.0 - h0 / h1) * y[i + 2]);
        i += 2;
    }
    if n_intervals % 2 == 1 {
        // Odd interval count: one interval left over after pairing.
        area += (x[n - 1] - x[n - 2]) * (y[n - 1] + y[n - 2]) / 2.0;
    }
    Ok(area)
}
