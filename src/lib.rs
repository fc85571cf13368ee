//! # fiphot — perievent analysis for fiber photometry in pure Rust
//!
//! `fiphot` aligns a continuous fluorescence recording with asynchronously
//! timestamped behavioral events and derives, per event, a windowed,
//! normalized response segment together with summary statistics
//! (baseline-relative z-scores, robust z-scores, and area-under-curve
//! integrals).
//!
//! ## Pipeline overview
//!
//! ```text
//! event timestamp + window (pre s, post s)
//!   │
//!   ├─ recording::find_recording()  which segment spans the event
//!   ├─ recording::normalize()       raw | ΔF/F | Z over the whole segment
//!   ├─ sampler::window_indices()    binary-search start/event/end indices
//!   ├─ slice [start ..= end]        raw + normalized window arrays
//!   ├─ segment::split_at()          pre-event | post-event at the event sample
//!   ├─ baseline z / robust z        pre-segment stats applied to the window
//!   └─ segment::split_stats()       mean + Simpson AUC per representation
//!        │
//!        └─→ PerieventResult        (smooth() any named series afterward)
//! ```
//!
//! ## Quick start
//!
//! ```no_run
//! use fiphot::{BehaviorEvents, FiberRecords, Recording, Session, Window};
//!
//! // Channels come from the acquisition-file collaborators, already parsed.
//! let rec = Recording::new(
//!     vec![0.0, 0.1, 0.2, 0.3],
//!     vec![2.0, 2.1, 2.4, 2.2],
//!     vec![1.0, 1.0, 1.0, 1.0],
//! ).unwrap();
//!
//! let mut session = Session::new(
//!     FiberRecords::new(vec![rec]),
//!     BehaviorEvents::new(),
//! );
//!
//! let res = session.analyze_perievent(0.2, Some(Window::new(0.1, 0.1)), None)?;
//! println!("post-event ΔF/F mean: {}", res.dff.stats.post.mean);
//! # Ok::<(), fiphot::AnalysisError>(())
//! ```
//!
//! ## Running individual steps
//!
//! Each pipeline stage is also exposed as a standalone function:
//!
//! ```
//! use fiphot::sampler::{locate, Boundary};
//! use fiphot::smooth::{savgol_filter, moving_average};
//! use fiphot::stats::simpson;
//! use ndarray::Array1;
//!
//! let t: Array1<f64> = Array1::linspace(0.0, 10.0, 101);
//! let y = t.mapv(|v| v * v);
//!
//! let idx = locate(t.view(), 5.03, Boundary::Start);
//! let area = simpson(y.view(), t.view()).unwrap();
//! let smoothed = savgol_filter(y.view(), 11, 3).unwrap();
//! let coarse = moving_average(y.view(), 5).unwrap();
//! # let _ = (idx, area, smoothed, coarse);
//! ```

pub mod behavior;
pub mod config;
pub mod error;
pub mod normalize;
pub mod perievent;
pub mod recording;
pub mod sampler;
pub mod segment;
pub mod session;
pub mod smooth;
pub mod stats;

// ── Crate-root re-exports ─────────────────────────────────────────────────
//
// Everything a downstream user is likely to need is available directly as
// `fiphot::Foo` without having to know the internal module layout.

// behavior
pub use behavior::BehaviorEvents;

// config
pub use config::{AnalysisConfig, Window};

// error
pub use error::{AnalysisError, RecordingError};

// normalize
pub use normalize::{
    baseline_robust_zscore, baseline_zscore, delta_f_over_f, whole_zscore, Normalization,
};

// perievent
pub use perievent::{extract, PerieventResult, Representation, SERIES_NAMES};

// recording
pub use recording::{FiberRecords, NormalizedTrace, Recording};

// sampler
pub use sampler::{locate, window_indices, Boundary};

// segment
pub use segment::{segment_stats, split_at, split_stats, PrePost, SegmentStats};

// session
pub use session::{AnalysisKey, Session};

// smooth
pub use smooth::{
    moving_average, savgol_filter, smooth, SmoothMethod, SmoothWindow, Smoothed,
    DEFAULT_POLYORDER,
};
