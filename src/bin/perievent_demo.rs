/// perievent_demo: synthesize a photometry session, run the perievent
/// pipeline around one event, and print per-representation statistics.
///
/// The synthetic signal is a slow sine around 2.0 with a Gaussian transient
/// at the event timestamp; the control channel is a constant fitted baseline
/// of 1.0, so ΔF/F sits around 1.0 outside the transient.
use anyhow::Result;
use clap::Parser;

use fiphot::{
    BehaviorEvents, FiberRecords, Normalization, Recording, Session, SmoothMethod, SmoothWindow,
    Window, DEFAULT_POLYORDER,
};

#[derive(Parser, Debug)]
#[command(name = "perievent_demo")]
struct Args {
    /// Recording duration (s).
    #[arg(long, default_value_t = 60.0)]
    duration: f64,

    /// Sampling rate (Hz).
    #[arg(long, default_value_t = 1000.0)]
    rate: f64,

    /// Event timestamp (s).
    #[arg(long, default_value_t = 30.0)]
    event: f64,

    /// Seconds of window before the event.
    #[arg(long, default_value_t = 5.0)]
    pre: f64,

    /// Seconds of window after the event.
    #[arg(long, default_value_t = 5.0)]
    post: f64,

    /// Normalization selector: raw, F (ΔF/F) or Z.
    #[arg(long, default_value = "F")]
    norm: String,

    /// Smoothing method: savgol or rolling.
    #[arg(long, default_value = "savgol")]
    smooth: String,

    /// Smoothing window: sample count, '250ms', '2s' or 'default'.
    #[arg(long, default_value = "default")]
    smooth_window: String,

    /// Peak ΔF/F amplitude of the transient added at the event.
    #[arg(long, default_value_t = 0.5)]
    amplitude: f64,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let norm: Normalization = args.norm.parse()?;
    let method: SmoothMethod = args.smooth.parse()?;
    let smooth_window: SmoothWindow = args.smooth_window.parse()?;

    // ── 1. Synthesize one recording ────────────────────────────────────────
    let n = (args.duration * args.rate) as usize + 1;
    let time: Vec<f64> = (0..n).map(|i| i as f64 / args.rate).collect();
    let signal: Vec<f64> = time
        .iter()
        .map(|&t| {
            let d = t - args.event;
            2.0 + 0.05 * (0.5 * t).sin() + args.amplitude * (-d * d / 0.5).exp()
        })
        .collect();
    let control = vec![1.0; n];
    let fiber = FiberRecords::new(vec![Recording::new(time, signal, control)?]);

    // ── 2. Perievent analysis ──────────────────────────────────────────────
    let mut session = Session::new(fiber, BehaviorEvents::new());
    let window = Window::new(args.pre, args.post);
    let res = session.analyze_perievent(args.event, Some(window), Some(norm))?;

    println!(
        "recording {} · event {:.3} s · window −{:.1}/+{:.1} s · {} · fs {:.1} Hz",
        res.rec_index, res.event_time, window.pre, window.post, norm, res.sampling_rate
    );
    println!(
        "{:<14} {:>12} {:>14} {:>12} {:>14}",
        "", "pre mean", "pre AUC", "post mean", "post AUC"
    );
    for (name, rep) in [
        ("raw", &res.raw),
        ("delta F/F", &res.dff),
        ("z-score", &res.zscore),
        ("robust z", &res.robust_zscore),
    ] {
        println!(
            "{:<14} {:>12.4} {:>14.4} {:>12.4} {:>14.4}",
            name, rep.stats.pre.mean, rep.stats.pre.auc, rep.stats.post.mean, rep.stats.post.auc
        );
    }

    // ── 3. Smooth the display signal ───────────────────────────────────────
    let sm = res.smooth("signal", method, smooth_window, DEFAULT_POLYORDER)?;
    println!(
        "smoothed 'signal': {} samples over [{:.3}, {:.3}] s",
        sm.values.len(),
        sm.time[0],
        sm.time[sm.time.len() - 1]
    );

    Ok(())
}
