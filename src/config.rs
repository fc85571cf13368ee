//! Analysis configuration.
//!
//! [`Window`] is the perievent time span; [`AnalysisConfig`] holds the
//! session-level defaults applied when a call does not override them.

use crate::normalize::Normalization;

/// Perievent window: seconds kept before and after an event timestamp.
///
/// Both durations are non-negative; a zero `pre` means the window starts at
/// the event sample itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Window {
    /// Seconds of signal kept before the event.
    pub pre: f64,
    /// Seconds of signal kept after the event.
    pub post: f64,
}

impl Window {
    pub fn new(pre: f64, post: f64) -> Self {
        Self { pre, post }
    }

    /// Window extending the same duration on both sides of the event.
    pub fn symmetric(half: f64) -> Self {
        Self { pre: half, post: half }
    }
}

impl Default for Window {
    /// 5 s on each side of the event.
    fn default() -> Self {
        Self { pre: 5.0, post: 5.0 }
    }
}

/// Session-level analysis defaults.
///
/// All fields are `pub` so you can construct one with struct-update syntax:
///
/// ```
/// use fiphot::{AnalysisConfig, Window};
///
/// let cfg = AnalysisConfig {
///     window: Window::new(2.0, 8.0),   // short baseline, long response
///     ..AnalysisConfig::default()
/// };
/// ```
#[derive(Debug, Clone, Default)]
pub struct AnalysisConfig {
    /// Window used when `analyze_perievent` is called without one.
    pub window: Window,

    /// Normalization used when `analyze_perievent` is called without one.
    ///
    /// Default: ΔF/F.
    pub normalization: Normalization,
}
