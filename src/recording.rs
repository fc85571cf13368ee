//! Fiber recording storage and lookup.
//!
//! A session's photometry data arrives as one or more continuous
//! [`Recording`] segments, each a (time, signal, control) triple already
//! materialized in memory by the file-format collaborator. [`FiberRecords`]
//! owns the segments, answers "which recording contains this timestamp", and
//! produces whole-recording normalized traces.

use ndarray::{Array1, ArrayView1};

use crate::error::{AnalysisError, RecordingError};
use crate::normalize::{self, Normalization};

/// One continuous recording segment: three equal-length channels with a
/// strictly increasing time axis.
#[derive(Debug, Clone)]
pub struct Recording {
    time: Array1<f64>,
    signal: Array1<f64>,
    control: Array1<f64>,
}

impl Recording {
    /// Validate and take ownership of the three channels.
    ///
    /// # Errors
    ///
    /// [`RecordingError::ChannelMismatch`] on differing lengths,
    /// [`RecordingError::TooShort`] below two samples,
    /// [`RecordingError::NonMonotonicTime`] when time does not strictly
    /// increase.
    pub fn new(
        time: Vec<f64>,
        signal: Vec<f64>,
        control: Vec<f64>,
    ) -> Result<Self, RecordingError> {
        if time.len() != signal.len() || time.len() != control.len() {
            return Err(RecordingError::ChannelMismatch {
                time: time.len(),
                signal: signal.len(),
                control: control.len(),
            });
        }
        if time.len() < 2 {
            return Err(RecordingError::TooShort { len: time.len() });
        }
        if let Some(index) = (1..time.len()).find(|&i| time[i] <= time[i - 1]) {
            return Err(RecordingError::NonMonotonicTime { index });
        }
        Ok(Self {
            time: Array1::from(time),
            signal: Array1::from(signal),
            control: Array1::from(control),
        })
    }

    /// Number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// Always `false`: construction requires at least two samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// First and last timestamp of this segment.
    #[inline]
    pub fn span(&self) -> (f64, f64) {
        (self.time[0], self.time[self.len() - 1])
    }

    /// Whether `t` falls inside this segment's time span (inclusive).
    pub fn contains(&self, t: f64) -> bool {
        let (first, last) = self.span();
        first <= t && t <= last
    }

    /// Total duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        let (first, last) = self.span();
        last - first
    }

    pub fn time(&self) -> ArrayView1<'_, f64> {
        self.time.view()
    }

    pub fn signal(&self) -> ArrayView1<'_, f64> {
        self.signal.view()
    }

    pub fn control(&self) -> ArrayView1<'_, f64> {
        self.control.view()
    }
}

/// A normalized whole-recording trace: the time axis, the selected signal
/// representation, and the raw control channel passed through for reference.
#[derive(Debug, Clone)]
pub struct NormalizedTrace {
    pub time: Array1<f64>,
    pub values: Array1<f64>,
    pub control: Array1<f64>,
}

/// All fiber recordings of one session, ordered by acquisition time.
#[derive(Debug, Clone, Default)]
pub struct FiberRecords {
    recordings: Vec<Recording>,
}

impl FiberRecords {
    pub fn new(recordings: Vec<Recording>) -> Self {
        Self { recordings }
    }

    /// Number of recording segments.
    pub fn len(&self) -> usize {
        self.recordings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recordings.is_empty()
    }

    /// Borrow a recording segment by index.
    pub fn get(&self, rec: usize) -> &Recording {
        &self.recordings[rec]
    }

    /// Index of the recording whose time span contains `t`.
    ///
    /// # Errors
    ///
    /// [`AnalysisError::RecordingNotFound`] when no segment spans `t` —
    /// never a default index.
    pub fn find_recording(&self, t: f64) -> Result<usize, AnalysisError> {
        self.recordings
            .iter()
            .position(|r| r.contains(t))
            .ok_or(AnalysisError::RecordingNotFound { time: t })
    }

    /// Whole-recording normalized trace for segment `rec`.
    ///
    /// # Errors
    ///
    /// [`AnalysisError::ConstantBaseline`] for [`Normalization::ZScore`] on a
    /// constant signal channel.
    pub fn normalize(
        &self,
        rec: usize,
        method: Normalization,
    ) -> Result<NormalizedTrace, AnalysisError> {
        let r = &self.recordings[rec];
        let values = match method {
            Normalization::Raw => r.signal.clone(),
            Normalization::DeltaFOverF => normalize::delta_f_over_f(r.signal(), r.control()),
            Normalization::ZScore => normalize::whole_zscore(r.signal())?,
        };
        Ok(NormalizedTrace {
            time: r.time.clone(),
            values,
            control: r.control.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(t0: f64, t1: f64, n: usize) -> Recording {
        let time: Vec<f64> = (0..n)
            .map(|i| t0 + (t1 - t0) * i as f64 / (n - 1) as f64)
            .collect();
        let signal: Vec<f64> = time.iter().map(|&t| 2.0 + t).collect();
        let control = vec![1.0; n];
        Recording::new(time, signal, control).unwrap()
    }

    #[test]
    fn rejects_mismatched_channels() {
        let err = Recording::new(vec![0.0, 1.0], vec![0.0], vec![0.0, 0.0]).unwrap_err();
        assert_eq!(
            err,
            RecordingError::ChannelMismatch { time: 2, signal: 1, control: 2 }
        );
    }

    #[test]
    fn rejects_single_sample() {
        let err = Recording::new(vec![0.0], vec![1.0], vec![1.0]).unwrap_err();
        assert_eq!(err, RecordingError::TooShort { len: 1 });
    }

    #[test]
    fn rejects_non_monotonic_time() {
        let err =
            Recording::new(vec![0.0, 1.0, 1.0], vec![0.0; 3], vec![0.0; 3]).unwrap_err();
        assert_eq!(err, RecordingError::NonMonotonicTime { index: 2 });
    }

    #[test]
    fn find_recording_picks_containing_segment() {
        let recs = FiberRecords::new(vec![ramp(0.0, 100.0, 1001), ramp(200.0, 300.0, 1001)]);
        assert_eq!(recs.find_recording(50.0).unwrap(), 0);
        assert_eq!(recs.find_recording(250.0).unwrap(), 1);
    }

    #[test]
    fn find_recording_gap_is_an_error() {
        let recs = FiberRecords::new(vec![ramp(0.0, 100.0, 1001), ramp(200.0, 300.0, 1001)]);
        let err = recs.find_recording(150.0).unwrap_err();
        assert_eq!(err, AnalysisError::RecordingNotFound { time: 150.0 });
    }

    #[test]
    fn normalize_raw_is_passthrough() {
        let recs = FiberRecords::new(vec![ramp(0.0, 10.0, 101)]);
        let trace = recs.normalize(0, Normalization::Raw).unwrap();
        approx::assert_abs_diff_eq!(trace.values[0], 2.0, epsilon = 1e-12);
        approx::assert_abs_diff_eq!(trace.values[100], 12.0, epsilon = 1e-12);
    }

    #[test]
    fn normalize_dff_against_unit_control() {
        let recs = FiberRecords::new(vec![ramp(0.0, 10.0, 101)]);
        let trace = recs.normalize(0, Normalization::DeltaFOverF).unwrap();
        // control ≡ 1 → ΔF/F = signal − 1.
        approx::assert_abs_diff_eq!(trace.values[0], 1.0, epsilon = 1e-12);
        approx::assert_abs_diff_eq!(trace.values[100], 11.0, epsilon = 1e-12);
    }
}
