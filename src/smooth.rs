//! Low-pass smoothing for derived series.
//!
//! Two methods behind one entry point: a Savitzky–Golay filter (local
//! least-squares polynomial fit, length-preserving, polynomial edge
//! extrapolation) and a trailing moving average (output shortened by
//! `window − 1`, paired with the moving-average-shifted time axis).
//!
//! Window length can be given in samples or as a duration; durations convert
//! via `ceil(seconds × sampling_rate)`. The default resolves to
//! `ceil(sampling_rate / 4)`, about 250 ms of signal.

use std::str::FromStr;

use ndarray::{Array1, ArrayView1};

use crate::error::AnalysisError;

/// Default polynomial order for the Savitzky–Golay method.
pub const DEFAULT_POLYORDER: usize = 3;

/// Smoothing method selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SmoothMethod {
    /// Savitzky–Golay local polynomial regression.
    #[default]
    SavitzkyGolay,
    /// Trailing-window arithmetic mean.
    MovingAverage,
}

impl FromStr for SmoothMethod {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "savgol" => Ok(Self::SavitzkyGolay),
            "rolling" => Ok(Self::MovingAverage),
            _ => Err(AnalysisError::UnknownSmoother { given: s.to_owned() }),
        }
    }
}

/// Smoothing window length, in samples or time.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SmoothWindow {
    /// `ceil(sampling_rate / 4)` samples (≈ 250 ms).
    #[default]
    Default,
    /// Explicit sample count.
    Samples(usize),
    /// Duration in seconds, converted via `ceil(secs × sampling_rate)`.
    Duration(f64),
}

impl SmoothWindow {
    /// Resolve to a sample count at the given sampling rate.
    pub fn resolve(self, sampling_rate: f64) -> usize {
        match self {
            Self::Default => (sampling_rate / 4.0).ceil() as usize,
            Self::Samples(n) => n,
            Self::Duration(secs) => (secs * sampling_rate).ceil() as usize,
        }
    }
}

impl FromStr for SmoothWindow {
    type Err = AnalysisError;

    /// Accepts `"default"`, a bare sample count (`"15"`), or a duration with
    /// unit suffix (`"250ms"`, `"2s"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "default" {
            return Ok(Self::Default);
        }
        if let Some(ms) = s.strip_suffix("ms") {
            if let Ok(v) = ms.parse::<f64>() {
                return Ok(Self::Duration(v / 1000.0));
            }
        } else if let Some(secs) = s.strip_suffix('s') {
            if let Ok(v) = secs.parse::<f64>() {
                return Ok(Self::Duration(v));
            }
        } else if let Ok(n) = s.parse::<usize>() {
            return Ok(Self::Samples(n));
        }
        Err(AnalysisError::UnknownWindowSpec { given: s.to_owned() })
    }
}

/// A smoothed series with its paired time axis.
#[derive(Debug, Clone)]
pub struct Smoothed {
    pub time: Array1<f64>,
    pub values: Array1<f64>,
}

/// Smooth `values` over `time` with the given method and window.
///
/// Savitzky–Golay output has the input length and the input time axis;
/// moving-average output is `len − window + 1` long and its time axis is the
/// moving average of the input time axis over the same window.
///
/// # Errors
///
/// [`AnalysisError::InsufficientSamples`] when the resolved window does not
/// fit the data (or, for Savitzky–Golay, does not exceed `polyorder`).
pub fn smooth(
    time: ArrayView1<f64>,
    values: ArrayView1<f64>,
    method: SmoothMethod,
    window: SmoothWindow,
    polyorder: usize,
    sampling_rate: f64,
) -> Result<Smoothed, AnalysisError> {
    let w = window.resolve(sampling_rate);
    match method {
        SmoothMethod::SavitzkyGolay => Ok(Smoothed {
            time: time.to_owned(),
            values: savgol_filter(values, w, polyorder)?,
        }),
        SmoothMethod::MovingAverage => Ok(Smoothed {
            time: moving_average(time, w)?,
            values: moving_average(values, w)?,
        }),
    }
}

/// Savitzky–Golay filter: fit a degree-`polyorder` polynomial over a sliding
/// window and evaluate it at the window centre.
///
/// The filter requires an odd span, so an even `window` is incremented by
/// one. Output length equals input length; the first and last half-window
/// values come from polynomial fits over the edge windows.
///
/// # Errors
///
/// [`AnalysisError::InsufficientSamples`] when the (odd-forced) window
/// exceeds the data length or does not exceed `polyorder`.
pub fn savgol_filter(
    values: ArrayView1<f64>,
    window: usize,
    polyorder: usize,
) -> Result<Array1<f64>, AnalysisError> {
    let w = if window % 2 == 0 { window + 1 } else { window };
    let n = values.len();
    if w <= polyorder {
        return Err(AnalysisError::InsufficientSamples { len: w, needed: polyorder + 1 });
    }
    if w > n {
        return Err(AnalysisError::InsufficientSamples { len: n, needed: w });
    }

    let half = w / 2;
    let coeffs = savgol_coeffs(w, polyorder);

    let mut out = Array1::zeros(n);
    for i in half..n - half {
        let mut acc = 0.0;
        for (m, &c) in coeffs.iter().enumerate() {
            acc += c * values[i + m - half];
        }
        out[i] = acc;
    }

    // Edge handling: fit one polynomial to each edge window and evaluate it
    // at the positions the convolution cannot reach.
    let head: Vec<f64> = values.iter().take(w).copied().collect();
    let head_eval: Vec<f64> = (0..half).map(|i| i as f64).collect();
    for (i, v) in polyfit_eval(&head, polyorder, &head_eval).into_iter().enumerate() {
        out[i] = v;
    }

    let tail: Vec<f64> = values.iter().skip(n - w).copied().collect();
    let tail_eval: Vec<f64> = (w - half..w).map(|i| i as f64).collect();
    for (k, v) in polyfit_eval(&tail, polyorder, &tail_eval).into_iter().enumerate() {
        out[n - half + k] = v;
    }

    Ok(out)
}

/// Trailing moving average; output is `len − window + 1` values.
///
/// # Errors
///
/// [`AnalysisError::InsufficientSamples`] when `window` is zero or exceeds
/// the data length.
pub fn moving_average(
    values: ArrayView1<f64>,
    window: usize,
) -> Result<Array1<f64>, AnalysisError> {
    let n = values.len();
    if window == 0 || window > n {
        return Err(AnalysisError::InsufficientSamples { len: n, needed: window.max(1) });
    }
    let inv = 1.0 / window as f64;
    let mut sum: f64 = values.iter().take(window).sum();
    let mut out = Array1::zeros(n - window + 1);
    out[0] = sum * inv;
    for i in window..n {
        sum += values[i] - values[i - window];
        out[i - window + 1] = sum * inv;
    }
    Ok(out)
}

// ── Polynomial least squares ─────────────────────────────────────────────────

/// Convolution weights that evaluate the window's least-squares polynomial
/// at its centre. `window` must be odd and greater than `polyorder`.
fn savgol_coeffs(window: usize, polyorder: usize) -> Vec<f64> {
    let half = (window / 2) as i64;
    let order = polyorder + 1;

    // Gram matrix G[j][k] = Σ_m m^(j+k) over centred positions m = −h..h.
    let mut g = vec![vec![0.0; order]; order];
    for (j, row) in g.iter_mut().enumerate() {
        for (k, cell) in row.iter_mut().enumerate() {
            *cell = (-half..=half).map(|m| (m as f64).powi((j + k) as i32)).sum();
        }
    }
    // First row of G⁻¹ gives the evaluation-at-zero functional.
    let mut e0 = vec![0.0; order];
    e0[0] = 1.0;
    let u = solve_linear(g, e0);

    (-half..=half)
        .map(|m| {
            let x = m as f64;
            u.iter()
                .enumerate()
                .map(|(k, &uk)| uk * x.powi(k as i32))
                .sum()
        })
        .collect()
}

/// Fit a degree-`order` polynomial to `y` at positions `0..y.len()` and
/// evaluate it at `eval_at`. Positions are centred internally to keep the
/// normal equations well conditioned.
fn polyfit_eval(y: &[f64], order: usize, eval_at: &[f64]) -> Vec<f64> {
    let n = y.len();
    let mid = (n - 1) as f64 / 2.0;
    let dim = order + 1;

    let mut g = vec![vec![0.0; dim]; dim];
    let mut rhs = vec![0.0; dim];
    for (i, &yi) in y.iter().enumerate() {
        let x = i as f64 - mid;
        let mut p = 1.0;
        let mut powers = Vec::with_capacity(dim);
        for _ in 0..dim {
            powers.push(p);
            p *= x;
        }
        for j in 0..dim {
            rhs[j] += powers[j] * yi;
            for k in 0..dim {
                g[j][k] += powers[j] * powers[k];
            }
        }
    }
    let beta = solve_linear(g, rhs);

    eval_at
        .iter()
        .map(|&t| {
            let x = t - mid;
            beta.iter()
                .enumerate()
                .map(|(k, &b)| b * x.powi(k as i32))
                .sum()
        })
        .collect()
}

/// Solve `a · x = b` by Gaussian elimination with partial pivoting.
/// The systems here are small (≤ polyorder + 1) and symmetric positive
/// definite, so no singularity handling is needed.
fn solve_linear(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> Vec<f64> {
    let n = b.len();
    for col in 0..n {
        let mut pivot = col;
        for row in col + 1..n {
            if a[row][col].abs() > a[pivot][col].abs() {
                pivot = row;
            }
        }
        a.swap(col, pivot);
        b.swap(col, pivot);

        let diag = a[col][col];
        for row in col + 1..n {
            let factor = a[row][col] / diag;
            for k in col..n {
                let upper = a[col][k];
                a[row][k] -= factor * upper;
            }
            b[row] -= factor * b[col];
        }
    }
    let mut x = vec![0.0; n];
    for row in (0..n).rev() {
        let mut acc = b[row];
        for k in row + 1..n {
            acc -= a[row][k] * x[k];
        }
        x[row] = acc / a[row][row];
    }
    x
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array1;

    #[test]
    fn method_selector_parses() {
        assert_eq!("savgol".parse::<SmoothMethod>().unwrap(), SmoothMethod::SavitzkyGolay);
        assert_eq!("rolling".parse::<SmoothMethod>().unwrap(), SmoothMethod::MovingAverage);
        assert!(matches!(
            "lowess".parse::<SmoothMethod>(),
            Err(AnalysisError::UnknownSmoother { .. })
        ));
    }

    #[test]
    fn window_spec_parses_samples_and_durations() {
        assert_eq!("15".parse::<SmoothWindow>().unwrap(), SmoothWindow::Samples(15));
        assert_eq!("250ms".parse::<SmoothWindow>().unwrap(), SmoothWindow::Duration(0.25));
        assert_eq!("2s".parse::<SmoothWindow>().unwrap(), SmoothWindow::Duration(2.0));
        assert_eq!("default".parse::<SmoothWindow>().unwrap(), SmoothWindow::Default);
        assert!(matches!(
            "soon".parse::<SmoothWindow>(),
            Err(AnalysisError::UnknownWindowSpec { .. })
        ));
    }

    #[test]
    fn default_window_is_quarter_second() {
        assert_eq!(SmoothWindow::Default.resolve(1000.0), 250);
        assert_eq!(SmoothWindow::Duration(0.25).resolve(1017.3), 255);
    }

    #[test]
    fn savgol_preserves_length() {
        let y = Array1::from_shape_fn(200, |i| (i as f64 * 0.1).sin());
        let s = savgol_filter(y.view(), 11, 3).unwrap();
        assert_eq!(s.len(), y.len());
    }

    #[test]
    fn savgol_even_window_equals_next_odd() {
        let y = Array1::from_shape_fn(100, |i| (i as f64 * 0.3).cos() + 0.01 * i as f64);
        let even = savgol_filter(y.view(), 10, 3).unwrap();
        let odd = savgol_filter(y.view(), 11, 3).unwrap();
        for (&a, &b) in even.iter().zip(odd.iter()) {
            approx::assert_abs_diff_eq!(a, b, epsilon = 0.0);
        }
    }

    #[test]
    fn savgol_reproduces_cubic_exactly() {
        // A degree-3 fit passes through degree-≤3 data everywhere,
        // edges included.
        let y = Array1::from_shape_fn(30, |i| {
            let t = i as f64;
            0.5 * t * t * t - 2.0 * t * t + t - 7.0
        });
        let s = savgol_filter(y.view(), 7, 3).unwrap();
        for (&a, &b) in s.iter().zip(y.iter()) {
            approx::assert_relative_eq!(a, b, max_relative = 1e-9, epsilon = 1e-7);
        }
    }

    #[test]
    fn savgol_window_must_exceed_polyorder() {
        let y = Array1::from_elem(50, 1.0);
        assert_eq!(
            savgol_filter(y.view(), 3, 3).unwrap_err(),
            AnalysisError::InsufficientSamples { len: 3, needed: 4 }
        );
    }

    #[test]
    fn savgol_window_must_fit_data() {
        let y = Array1::from_elem(5, 1.0);
        assert_eq!(
            savgol_filter(y.view(), 9, 3).unwrap_err(),
            AnalysisError::InsufficientSamples { len: 5, needed: 9 }
        );
    }

    #[test]
    fn moving_average_known_values() {
        let y = Array1::from(vec![1.0, 2.0, 3.0, 4.0]);
        let m = moving_average(y.view(), 2).unwrap();
        assert_eq!(m.to_vec(), vec![1.5, 2.5, 3.5]);
    }

    #[test]
    fn moving_average_output_length() {
        let y = Array1::from_elem(100, 1.0);
        assert_eq!(moving_average(y.view(), 7).unwrap().len(), 94);
    }

    #[test]
    fn moving_average_window_too_large() {
        let y = Array1::from_elem(3, 1.0);
        assert!(matches!(
            moving_average(y.view(), 4),
            Err(AnalysisError::InsufficientSamples { len: 3, needed: 4 })
        ));
    }

    #[test]
    fn smooth_moving_average_shifts_time_axis() {
        let t = Array1::from(vec![0.0, 1.0, 2.0, 3.0, 4.0]);
        let y = Array1::from(vec![0.0, 2.0, 4.0, 6.0, 8.0]);
        let out = smooth(
            t.view(),
            y.view(),
            SmoothMethod::MovingAverage,
            SmoothWindow::Samples(3),
            DEFAULT_POLYORDER,
            1.0,
        )
        .unwrap();
        // Uniform spacing: rolled time axis sits one full sample in.
        assert_eq!(out.time.to_vec(), vec![1.0, 2.0, 3.0]);
        assert_eq!(out.values.to_vec(), vec![2.0, 4.0, 6.0]);
    }

    #[test]
    fn smooth_savgol_keeps_time_axis() {
        let t = Array1::linspace(0.0, 1.0, 50);
        let y = Array1::from_shape_fn(50, |i| (i as f64).sqrt());
        let out = smooth(
            t.view(),
            y.view(),
            SmoothMethod::SavitzkyGolay,
            SmoothWindow::Samples(7),
            DEFAULT_POLYORDER,
            49.0,
        )
        .unwrap();
        assert_eq!(out.time.len(), 50);
        assert_eq!(out.values.len(), 50);
        approx::assert_abs_diff_eq!(out.time[0], t[0]);
    }
}
