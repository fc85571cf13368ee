//! Signal normalization.
//!
//! Three whole-recording representations selected by [`Normalization`]:
//! raw passthrough, ΔF/F against the fitted control channel, and a
//! whole-recording z-score of the signal channel. The baseline-relative
//! z-scores used by the perievent statistics are separate transforms
//! ([`baseline_zscore`], [`baseline_robust_zscore`]) that normalize a full
//! window with statistics drawn from its pre-event segment only.

use std::fmt;
use std::str::FromStr;

use ndarray::{Array1, ArrayView1};

use crate::error::AnalysisError;
use crate::stats;

/// Whole-recording signal representation selector.
///
/// Parsed from the legacy one-letter selectors at the API boundary; inside
/// the pipeline only this closed enum is dispatched on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Normalization {
    /// Signal channel unchanged.
    Raw,
    /// `(signal − fit) / fit`, fit being the control channel.
    #[default]
    DeltaFOverF,
    /// `(signal − mean) / std` over the whole recording. Display variant;
    /// distinct from the pre-event-baseline z-score the pipeline always
    /// computes.
    ZScore,
}

impl FromStr for Normalization {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "raw" => Ok(Self::Raw),
            "F" | "dff" => Ok(Self::DeltaFOverF),
            "Z" | "zscore" => Ok(Self::ZScore),
            _ => Err(AnalysisError::UnknownNormalization { given: s.to_owned() }),
        }
    }
}

impl fmt::Display for Normalization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raw => write!(f, "raw"),
            Self::DeltaFOverF => write!(f, "delta F/F"),
            Self::ZScore => write!(f, "Z-scores"),
        }
    }
}

/// ΔF/F: fractional change of `signal` relative to the fitted baseline.
pub fn delta_f_over_f(signal: ArrayView1<f64>, fit: ArrayView1<f64>) -> Array1<f64> {
    let mut out = Array1::zeros(signal.len());
    for (o, (&s, &f)) in out.iter_mut().zip(signal.iter().zip(fit.iter())) {
        *o = (s - f) / f;
    }
    out
}

/// Z-score of `x` against its own mean and population std.
///
/// # Errors
///
/// [`AnalysisError::ConstantBaseline`] when `x` has zero variance.
pub fn whole_zscore(x: ArrayView1<f64>) -> Result<Array1<f64>, AnalysisError> {
    let m = stats::mean(x);
    let s = stats::std(x);
    if s == 0.0 {
        return Err(AnalysisError::ConstantBaseline { representation: "recording signal" });
    }
    Ok(x.mapv(|v| (v - m) / s))
}

/// Baseline z-score: the whole `window` normalized by the mean and
/// population std of `baseline` (the pre-event segment).
///
/// The pre-event portion of the output therefore has mean ≈ 0 and std ≈ 1
/// by construction; the post-event portion is baseline-relative, not
/// self-normalized.
///
/// # Errors
///
/// [`AnalysisError::ConstantBaseline`] when the baseline has zero variance.
pub fn baseline_zscore(
    window: ArrayView1<f64>,
    baseline: ArrayView1<f64>,
) -> Result<Array1<f64>, AnalysisError> {
    let m = stats::mean(baseline);
    let s = stats::std(baseline);
    if s == 0.0 {
        return Err(AnalysisError::ConstantBaseline { representation: "z-score baseline" });
    }
    Ok(window.mapv(|v| (v - m) / s))
}

/// Robust baseline z-score: median / MAD analogue of [`baseline_zscore`].
///
/// # Errors
///
/// [`AnalysisError::ConstantBaseline`] when the baseline MAD is zero.
pub fn baseline_robust_zscore(
    window: ArrayView1<f64>,
    baseline: ArrayView1<f64>,
) -> Result<Array1<f64>, AnalysisError> {
    let med = stats::median(baseline);
    let mad = stats::median_abs_deviation(baseline);
    if mad == 0.0 {
        return Err(AnalysisError::ConstantBaseline { representation: "robust z-score baseline" });
    }
    Ok(window.mapv(|v| (v - med) / mad))
}
