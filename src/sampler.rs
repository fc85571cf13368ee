//! Event-centred window sampling.
//!
//! Maps a target timestamp and a perievent [`Window`] onto indices of a
//! strictly increasing time axis. Lookup is a binary search followed by a
//! nearest-neighbour comparison; an exact midpoint tie resolves toward the
//! earlier sample at a window start and toward the later sample at a window
//! end, so tie-breaking can never shrink the window.

use crate::config::Window;
use ndarray::ArrayView1;

/// Which edge of a window an index lookup serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// Start of a window (and the event itself): ties go to the earlier index.
    Start,
    /// End of a window: ties go to the later index.
    End,
}

/// Index of the sample whose time is nearest `target`.
///
/// `time` must be non-empty and strictly increasing. Targets outside the
/// spanned range clamp to the first or last index.
pub fn locate(time: ArrayView1<f64>, target: f64, boundary: Boundary) -> usize {
    let n = time.len();
    // First index with time[i] >= target.
    let mut lo = 0usize;
    let mut hi = n;
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if time[mid] < target {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    if lo == 0 {
        return 0;
    }
    if lo == n {
        return n - 1;
    }

    let below = target - time[lo - 1];
    let above = time[lo] - target;
    if below < above {
        lo - 1
    } else if above < below {
        lo
    } else {
        match boundary {
            Boundary::Start => lo - 1,
            Boundary::End => lo,
        }
    }
}

/// Indices `(start_idx, event_idx, end_idx)` of the perievent window around
/// `event_time`.
///
/// The three lookups are independent, so `start_idx ≤ event_idx ≤ end_idx`
/// holds for any non-negative window.
pub fn window_indices(
    time: ArrayView1<f64>,
    event_time: f64,
    window: Window,
) -> (usize, usize, usize) {
    let start = event_time - window.pre;
    let end = event_time + window.post;
    let start_idx = locate(time, start, Boundary::Start);
    let event_idx = locate(time, event_time, Boundary::Start);
    let end_idx = locate(time, end, Boundary::End);
    (start_idx, event_idx, end_idx)
}
