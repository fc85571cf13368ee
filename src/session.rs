//! Session glue: fiber recordings + behavioral events + analysis cache.
//!
//! The session carries the mutable default window and normalization, and
//! memoizes every successful perievent analysis keyed by
//! (recording index, event time, window). The cache is written on every
//! successful call — it is not consulted before computing — and a failed
//! call never inserts anything.

use std::collections::HashMap;

use crate::behavior::BehaviorEvents;
use crate::config::{AnalysisConfig, Window};
use crate::error::AnalysisError;
use crate::normalize::Normalization;
use crate::perievent::{self, PerieventResult};
use crate::recording::FiberRecords;

/// Composite cache key for one analysis.
///
/// Times are keyed by their bit patterns, so keys are exact: two calls hit
/// the same entry only when event time and window match bit for bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnalysisKey {
    rec_index: usize,
    event_bits: u64,
    pre_bits: u64,
    post_bits: u64,
}

impl AnalysisKey {
    pub fn new(rec_index: usize, event_time: f64, window: Window) -> Self {
        Self {
            rec_index,
            event_bits: event_time.to_bits(),
            pre_bits: window.pre.to_bits(),
            post_bits: window.post.to_bits(),
        }
    }
}

/// Fiber recordings and behavioral files from a single session.
#[derive(Debug, Clone, Default)]
pub struct Session {
    fiber: FiberRecords,
    behavior: BehaviorEvents,
    config: AnalysisConfig,
    analyses: HashMap<AnalysisKey, PerieventResult>,
}

impl Session {
    pub fn new(fiber: FiberRecords, behavior: BehaviorEvents) -> Self {
        Self::with_config(fiber, behavior, AnalysisConfig::default())
    }

    pub fn with_config(
        fiber: FiberRecords,
        behavior: BehaviorEvents,
        config: AnalysisConfig,
    ) -> Self {
        Self { fiber, behavior, config, analyses: HashMap::new() }
    }

    pub fn fiber(&self) -> &FiberRecords {
        &self.fiber
    }

    pub fn behavior(&self) -> &BehaviorEvents {
        &self.behavior
    }

    pub fn default_window(&self) -> Window {
        self.config.window
    }

    /// Change the default perievent window for subsequent calls.
    pub fn set_default_window(&mut self, window: Window) {
        self.config.window = window;
    }

    /// Run the perievent pipeline for one event, using session defaults for
    /// any argument not given. On success the result is cached under
    /// (recording index, event time, window); failures leave the cache
    /// untouched.
    pub fn analyze_perievent(
        &mut self,
        event_time: f64,
        window: Option<Window>,
        norm: Option<Normalization>,
    ) -> Result<PerieventResult, AnalysisError> {
        let window = window.unwrap_or(self.config.window);
        let norm = norm.unwrap_or(self.config.normalization);
        let res = perievent::extract(&self.fiber, event_time, window, norm)?;
        let key = AnalysisKey::new(res.rec_index, event_time, window);
        self.analyses.insert(key, res.clone());
        Ok(res)
    }

    /// Explicit cache lookup; [`Session::analyze_perievent`] never reads
    /// this itself.
    pub fn cached(
        &self,
        rec_index: usize,
        event_time: f64,
        window: Window,
    ) -> Option<&PerieventResult> {
        self.analyses.get(&AnalysisKey::new(rec_index, event_time, window))
    }

    /// Number of memoized analyses.
    pub fn analysis_count(&self) -> usize {
        self.analyses.len()
    }

    /// Event timestamps whose full perievent window (at the current default)
    /// lies inside some recording span, by label.
    pub fn analyzable_events(&self) -> HashMap<String, Vec<f64>> {
        let w = self.config.window;
        self.behavior
            .events()
            .iter()
            .map(|(label, times)| {
                let kept: Vec<f64> = times
                    .iter()
                    .copied()
                    .filter(|&t| self.window_is_recorded(t, w))
                    .collect();
                (label.clone(), kept)
            })
            .collect()
    }

    /// Intervals lying fully inside some recording span, by label.
    pub fn recorded_intervals(&self) -> HashMap<String, Vec<(f64, f64)>> {
        self.behavior
            .intervals()
            .iter()
            .map(|(label, spans)| {
                let kept: Vec<(f64, f64)> = spans
                    .iter()
                    .copied()
                    .filter(|&(s, e)| self.span_is_recorded(s, e))
                    .collect();
                (label.clone(), kept)
            })
            .collect()
    }

    fn window_is_recorded(&self, t: f64, w: Window) -> bool {
        self.span_is_recorded(t - w.pre, t + w.post)
    }

    fn span_is_recorded(&self, start: f64, end: f64) -> bool {
        (0..self.fiber.len()).any(|i| {
            let r = self.fiber.get(i);
            r.contains(start) && r.contains(end)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::Recording;

    fn two_segment_session() -> Session {
        let make = |t0: f64| {
            let n = 2001;
            let time: Vec<f64> = (0..n).map(|i| t0 + i as f64 / 20.0).collect(); // 20 Hz, 100 s
            let signal: Vec<f64> = time.iter().map(|&t| 2.0 + (0.3 * t).sin()).collect();
            let control = vec![1.0; n];
            Recording::new(time, signal, control).unwrap()
        };
        let fiber = FiberRecords::new(vec![make(0.0), make(500.0)]);
        let mut behavior = BehaviorEvents::new();
        behavior.insert_events("lick", vec![50.0, 150.0, 580.0]);
        behavior.insert_intervals("dark", vec![(10.0, 20.0), (90.0, 110.0)]);
        Session::new(fiber, behavior)
    }

    #[test]
    fn successful_analysis_is_cached() {
        let mut s = two_segment_session();
        let res = s.analyze_perievent(50.0, None, None).unwrap();
        assert_eq!(s.analysis_count(), 1);
        let hit = s.cached(res.rec_index, 50.0, s.default_window()).unwrap();
        approx::assert_abs_diff_eq!(hit.event_time, 50.0);
    }

    #[test]
    fn failed_analysis_never_inserts() {
        let mut s = two_segment_session();
        assert!(s.analyze_perievent(150.0, None, None).is_err());
        assert_eq!(s.analysis_count(), 0);
    }

    #[test]
    fn repeated_call_overwrites_same_key() {
        let mut s = two_segment_session();
        s.analyze_perievent(50.0, None, None).unwrap();
        s.analyze_perievent(50.0, None, None).unwrap();
        assert_eq!(s.analysis_count(), 1);
    }

    #[test]
    fn per_call_window_is_a_distinct_key() {
        let mut s = two_segment_session();
        s.analyze_perievent(50.0, None, None).unwrap();
        s.analyze_perievent(50.0, Some(Window::new(2.0, 2.0)), None).unwrap();
        assert_eq!(s.analysis_count(), 2);
    }

    #[test]
    fn analyzable_events_respects_recording_gaps() {
        let s = two_segment_session();
        let events = s.analyzable_events();
        // 150 s falls in the gap between segments; 50 s and 580 s fit.
        assert_eq!(events["lick"], vec![50.0, 580.0]);
    }

    #[test]
    fn analyzable_events_respects_window_margins() {
        let mut s = two_segment_session();
        s.set_default_window(Window::new(60.0, 0.0));
        let events = s.analyzable_events();
        // 50 − 60 < 0 is outside the first segment now; 580 − 60 still fits.
        assert_eq!(events["lick"], vec![580.0]);
    }

    #[test]
    fn recorded_intervals_must_fit_inside_a_segment() {
        let s = two_segment_session();
        let spans = s.recorded_intervals();
        assert_eq!(spans["dark"], vec![(10.0, 20.0)]);
    }
}
