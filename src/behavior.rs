//! Behavioral event markers.
//!
//! Timestamps and intervals arrive already parsed by the behavioral-file
//! collaborator, keyed by event-type label. This module only stores them;
//! restriction to recorded time spans lives on the session, which knows the
//! fiber recordings.

use std::collections::HashMap;

/// Label-keyed behavioral timestamps and intervals for one session.
#[derive(Debug, Clone, Default)]
pub struct BehaviorEvents {
    events: HashMap<String, Vec<f64>>,
    intervals: HashMap<String, Vec<(f64, f64)>>,
}

impl BehaviorEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the timestamps of one event type. Replaces any previous
    /// entry for the label.
    pub fn insert_events(&mut self, label: impl Into<String>, times: Vec<f64>) {
        self.events.insert(label.into(), times);
    }

    /// Register the (start, end) intervals of one interval type.
    pub fn insert_intervals(&mut self, label: impl Into<String>, spans: Vec<(f64, f64)>) {
        self.intervals.insert(label.into(), spans);
    }

    /// All event timestamps by label.
    pub fn events(&self) -> &HashMap<String, Vec<f64>> {
        &self.events
    }

    /// All intervals by label.
    pub fn intervals(&self) -> &HashMap<String, Vec<(f64, f64)>> {
        &self.intervals
    }

    /// Timestamps of one event type, empty if the label is unknown.
    pub fn events_named(&self, label: &str) -> &[f64] {
        self.events.get(label).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Intervals of one interval type, empty if the label is unknown.
    pub fn intervals_named(&self, label: &str) -> &[(f64, f64)] {
        self.intervals.get(label).map(Vec::as_slice).unwrap_or(&[])
    }
}
