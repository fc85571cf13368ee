//! Error types for the perievent analysis pipeline.

/// Errors from recording construction and validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecordingError {
    /// Returned when the three channels of a recording differ in length.
    #[error("channel lengths differ: time={time}, signal={signal}, control={control}")]
    ChannelMismatch {
        time: usize,
        signal: usize,
        control: usize,
    },

    /// Returned when a recording has fewer than two samples.
    #[error("recording must contain at least two samples, got {len}")]
    TooShort { len: usize },

    /// Returned when the time channel is not strictly increasing.
    #[error("time must be strictly increasing (violated at index {index})")]
    NonMonotonicTime {
        /// Index of the first sample whose time is ≤ its predecessor's.
        index: usize,
    },
}

/// Errors from perievent extraction, statistics, and smoothing.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnalysisError {
    /// No recording in the session spans the requested timestamp.
    #[error("no fiber recording spans t = {time} s")]
    RecordingNotFound { time: f64 },

    /// Unrecognized normalization selector at the parsing boundary.
    #[error("unknown normalization '{given}' (expected 'raw', 'F' or 'Z')")]
    UnknownNormalization { given: String },

    /// Unrecognized smoothing method selector at the parsing boundary.
    #[error("unknown smoothing method '{given}' (expected 'savgol' or 'rolling')")]
    UnknownSmoother { given: String },

    /// A smoothing window string that is neither a sample count nor a duration.
    #[error("cannot parse smoothing window '{given}' (expected e.g. '15', '250ms' or '2s')")]
    UnknownWindowSpec { given: String },

    /// A segment or window is too short for the requested operation.
    #[error("{len} samples available, {needed} required")]
    InsufficientSamples { len: usize, needed: usize },

    /// The pre-event baseline has zero spread, so baseline-relative scores
    /// are undefined. Raised instead of propagating NaN.
    #[error("pre-event baseline of {representation} is constant; scores are undefined")]
    ConstantBaseline { representation: &'static str },

    /// Requested derived series name does not exist on a result object.
    #[error("result has no series named '{name}'")]
    SeriesNotFound { name: String },
}
