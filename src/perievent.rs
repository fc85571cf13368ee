//! Perievent extraction: event timestamp → windowed, normalized result.
//!
//! [`extract`] chains the full pipeline: locate the recording containing the
//! event, normalize the whole recording, slice the perievent window, split it
//! at the event sample, and summarize every representation per segment.
//! The outcome is an immutable [`PerieventResult`] with fixed, typed fields.

use ndarray::{s, Array1, ArrayView1};

use crate::config::Window;
use crate::error::AnalysisError;
use crate::normalize::{self, Normalization};
use crate::recording::FiberRecords;
use crate::sampler;
use crate::segment::{self, PrePost, SegmentStats};
use crate::smooth::{self, SmoothMethod, SmoothWindow, Smoothed};
use crate::stats;

/// One normalized view of the perievent window, with its event-split
/// sub-arrays and per-segment summary statistics.
#[derive(Debug, Clone)]
pub struct Representation {
    /// Values over the full window.
    pub full: Array1<f64>,
    /// Samples before the event.
    pub pre: Array1<f64>,
    /// Samples from the event onward.
    pub post: Array1<f64>,
    /// Mean and AUC per segment.
    pub stats: PrePost<SegmentStats>,
}

/// Derived artifact of one (recording, event, window) triple.
///
/// The baseline z-score and robust z-score are normalized with statistics
/// from the pre-event segment only, applied across the whole window; the
/// pre-event z-scores therefore have mean ≈ 0 and std ≈ 1 by construction.
#[derive(Debug, Clone)]
pub struct PerieventResult {
    /// Timestamp the window is centred on.
    pub event_time: f64,
    /// Index of the recording segment containing the event.
    pub rec_index: usize,
    /// Window actually used (session default or per-call override).
    pub window: Window,
    /// Selected display normalization of [`PerieventResult::signal`].
    pub normalization: Normalization,
    /// Reciprocal of the mean time delta within the sliced window.
    pub sampling_rate: f64,

    /// Time axis of the window.
    pub time: Array1<f64>,
    /// Time axis before the event.
    pub pre_time: Array1<f64>,
    /// Time axis from the event onward.
    pub post_time: Array1<f64>,

    /// The window in the selected normalization.
    pub signal: Array1<f64>,
    /// Raw control channel over the window.
    pub control: Array1<f64>,

    /// Raw signal channel.
    pub raw: Representation,
    /// ΔF/F against the fitted control, always computed regardless of the
    /// display selector.
    pub dff: Representation,
    /// Pre-event-baseline z-score of the selected signal.
    pub zscore: Representation,
    /// Pre-event-baseline robust z-score (median / MAD) of the selected
    /// signal.
    pub robust_zscore: Representation,
}

/// Names accepted by [`PerieventResult::series`].
pub const SERIES_NAMES: &[&str] = &[
    "time",
    "signal",
    "raw_signal",
    "raw_control",
    "dff",
    "zscore",
    "robust_zscore",
];

impl PerieventResult {
    /// Look up a full-window series by name.
    ///
    /// # Errors
    ///
    /// [`AnalysisError::SeriesNotFound`] for names outside [`SERIES_NAMES`].
    pub fn series(&self, name: &str) -> Result<ArrayView1<'_, f64>, AnalysisError> {
        match name {
            "time" => Ok(self.time.view()),
            "signal" => Ok(self.signal.view()),
            "raw_signal" => Ok(self.raw.full.view()),
            "raw_control" => Ok(self.control.view()),
            "dff" => Ok(self.dff.full.view()),
            "zscore" => Ok(self.zscore.full.view()),
            "robust_zscore" => Ok(self.robust_zscore.full.view()),
            _ => Err(AnalysisError::SeriesNotFound { name: name.to_owned() }),
        }
    }

    /// Smooth a named series with this result's own sampling rate.
    pub fn smooth(
        &self,
        series: &str,
        method: SmoothMethod,
        window: SmoothWindow,
        polyorder: usize,
    ) -> Result<Smoothed, AnalysisError> {
        let values = self.series(series)?;
        smooth::smooth(
            self.time.view(),
            values,
            method,
            window,
            polyorder,
            self.sampling_rate,
        )
    }
}

/// Run the perievent pipeline for one event.
///
/// # Errors
///
/// * [`AnalysisError::RecordingNotFound`] — no recording spans `event_time`.
/// * [`AnalysisError::InsufficientSamples`] — a segment is shorter than the
///   3 samples Simpson integration needs.
/// * [`AnalysisError::ConstantBaseline`] — the pre-event segment has zero
///   variance (or zero MAD), so baseline scores are undefined.
pub fn extract(
    fiber: &FiberRecords,
    event_time: f64,
    window: Window,
    norm: Normalization,
) -> Result<PerieventResult, AnalysisError> {
    let rec_index = fiber.find_recording(event_time)?;
    let normalized = fiber.normalize(rec_index, norm)?;
    let recording = fiber.get(rec_index);

    let (start, event, end) = sampler::window_indices(normalized.time.view(), event_time, window);
    let offset = event - start;

    let time = normalized.time.slice(s![start..=end]).to_owned();
    let signal = normalized.values.slice(s![start..=end]).to_owned();
    let raw_signal = recording.signal().slice(s![start..=end]).to_owned();
    let control = recording.control().slice(s![start..=end]).to_owned();

    // Both segments must carry enough samples for the integration rule
    // before any baseline statistics are attempted.
    let post_len = time.len() - offset;
    if offset < 3 {
        return Err(AnalysisError::InsufficientSamples { len: offset, needed: 3 });
    }
    if post_len < 3 {
        return Err(AnalysisError::InsufficientSamples { len: post_len, needed: 3 });
    }

    let sampling_rate = stats::sampling_rate(time.view());

    let dff_values = normalize::delta_f_over_f(raw_signal.view(), control.view());
    let baseline = signal.slice(s![..offset]);
    let z_values = normalize::baseline_zscore(signal.view(), baseline)?;
    let rz_values = normalize::baseline_robust_zscore(signal.view(), baseline)?;

    let time_parts = segment::split_at(time.view(), offset);

    Ok(PerieventResult {
        event_time,
        rec_index,
        window,
        normalization: norm,
        sampling_rate,
        pre_time: time_parts.pre,
        post_time: time_parts.post,
        raw: representation(raw_signal, time.view(), offset)?,
        dff: representation(dff_values, time.view(), offset)?,
        zscore: representation(z_values, time.view(), offset)?,
        robust_zscore: representation(rz_values, time.view(), offset)?,
        signal,
        control,
        time,
    })
}

fn representation(
    full: Array1<f64>,
    time: ArrayView1<f64>,
    offset: usize,
) -> Result<Representation, AnalysisError> {
    let stats = segment::split_stats(full.view(), time, offset)?;
    let parts = segment::split_at(full.view(), offset);
    Ok(Representation { full, pre: parts.pre, post: parts.post, stats })
}
