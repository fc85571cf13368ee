/// Shared helpers for building synthetic photometry sessions.
use fiphot::{BehaviorEvents, FiberRecords, Recording, Session};

/// Uniform time axis starting at `t0`.
#[allow(unused)]
pub fn uniform_time(t0: f64, rate: f64, n: usize) -> Vec<f64> {
    (0..n).map(|i| t0 + i as f64 / rate).collect()
}

/// Constant channels: control 1.0, signal 2.0.
#[allow(unused)]
pub fn constant_recording(duration: f64, rate: f64) -> Recording {
    let n = (duration * rate) as usize + 1;
    let time = uniform_time(0.0, rate, n);
    Recording::new(time, vec![2.0; n], vec![1.0; n]).unwrap()
}

/// Linear ramp: signal = slope · t, control 1.0.
#[allow(unused)]
pub fn ramp_recording(duration: f64, rate: f64, slope: f64) -> Recording {
    let n = (duration * rate) as usize + 1;
    let time = uniform_time(0.0, rate, n);
    let signal: Vec<f64> = time.iter().map(|&t| slope * t).collect();
    Recording::new(time, signal, vec![1.0; n]).unwrap()
}

/// Slow sine around 2.0 with an exponentially decaying transient that
/// starts at `event`, control 1.0. The pre-event baseline stays clean.
#[allow(unused)]
pub fn transient_recording(duration: f64, rate: f64, event: f64) -> Recording {
    let n = (duration * rate) as usize + 1;
    let time = uniform_time(0.0, rate, n);
    let signal: Vec<f64> = time
        .iter()
        .map(|&t| {
            let d = t - event;
            let transient = if d >= 0.0 { (-d / 2.0).exp() } else { 0.0 };
            2.0 + 0.1 * (0.7 * t).sin() + transient
        })
        .collect();
    Recording::new(time, signal, vec![1.0; n]).unwrap()
}

/// Session holding a single recording and no behavioral data.
#[allow(unused)]
pub fn single_session(rec: Recording) -> Session {
    Session::new(FiberRecords::new(vec![rec]), BehaviorEvents::new())
}
