//! Preview camera convergence for a held gesture.

use handorbit_common::config::AppConfig;
use handorbit_control_core::camera_preview::{simulate_held_gesture, ticks_to_settle};
use handorbit_gesture_model::gesture::GestureSignal;

const SETTLE_TOLERANCE: f64 = 0.01;

pub fn run(
    config: &AppConfig,
    x: f64,
    y: f64,
    pinch: Option<f64>,
    ticks: u64,
) -> anyhow::Result<()> {
    if !(0.0..=1.0).contains(&x) || !(0.0..=1.0).contains(&y) {
        anyhow::bail!("pointing position must be within [0, 1], got ({x}, {y})");
    }

    let rate = config.sync.tick_rate_hz;
    let signal = GestureSignal::new(x, y, pinch);
    let frames = simulate_held_gesture(&config.control, Some(signal), ticks, rate)
        .map_err(|e| anyhow::anyhow!("Invalid control config: {e}"))?;

    println!("Gesture: x={x} y={y} pinch={pinch:?}");
    println!("  Ticks: {ticks} @ {rate}Hz");
    println!();

    // Roughly twenty lines regardless of length.
    let stride = (ticks / 20).max(1);
    for frame in frames.iter().filter(|f| f.tick % stride == 0) {
        println!("  {}", frame.summary());
    }
    if let Some(last) = frames.last() {
        if last.tick % stride != 0 {
            println!("  {}", last.summary());
        }
    }

    println!();
    match ticks_to_settle(&frames, SETTLE_TOLERANCE) {
        Some(tick) => println!(
            "Settled within {SETTLE_TOLERANCE} after {tick} ticks ({:.2}s)",
            tick as f64 / f64::from(rate.max(1))
        ),
        None => println!("Not settled within {SETTLE_TOLERANCE} after {ticks} ticks"),
    }

    Ok(())
}
