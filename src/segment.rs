//! Window segmentation at the event sample.
//!
//! Every representation sliced from the same window splits at the same
//! offset; the event sample itself belongs to the post-event segment.

use ndarray::{s, Array1, ArrayView1};

use crate::error::AnalysisError;
use crate::stats;

/// A value computed once for the pre-event and once for the post-event
/// segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrePost<T> {
    pub pre: T,
    pub post: T,
}

/// Scalar summary of one segment of one representation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentStats {
    /// Arithmetic mean of the segment.
    pub mean: f64,
    /// Area under the segment over its time sub-array (composite Simpson).
    pub auc: f64,
}

/// Split `values` at the in-window event offset.
///
/// Pre-event = samples before `offset`; post-event = samples from `offset`
/// onward (the event sample is in the post segment).
pub fn split_at(values: ArrayView1<f64>, offset: usize) -> PrePost<Array1<f64>> {
    PrePost {
        pre: values.slice(s![..offset]).to_owned(),
        post: values.slice(s![offset..]).to_owned(),
    }
}

/// Mean and AUC of one segment against its time sub-array.
///
/// # Errors
///
/// [`AnalysisError::InsufficientSamples`] when the segment has fewer than 3
/// points (Simpson's rule minimum).
pub fn segment_stats(
    values: ArrayView1<f64>,
    time: ArrayView1<f64>,
) -> Result<SegmentStats, AnalysisError> {
    let auc = stats::simpson(values, time)?;
    Ok(SegmentStats { mean: stats::mean(values), auc })
}

/// Per-segment statistics for a whole representation split at `offset`.
pub fn split_stats(
    values: ArrayView1<f64>,
    time: ArrayView1<f64>,
    offset: usize,
) -> Result<PrePost<SegmentStats>, AnalysisError> {
    Ok(PrePost {
        pre: segment_stats(values.slice(s![..offset]), time.slice(s![..offset]))?,
        post: segment_stats(values.slice(s![offset..]), time.slice(s![offset..]))?,
    })
}
