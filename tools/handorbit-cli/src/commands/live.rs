//! Run the real-time poll loop against a recording.

use std::path::PathBuf;
use std::time::Duration;

use handorbit_common::clock::{RateController, SessionClock};
use handorbit_common::config::AppConfig;
use handorbit_frame_sync::backends::{load_recording, replay};
use handorbit_frame_sync::{GestureSession, PollLoop};

/// Status lines per second while the loop runs.
const STATUS_HZ: u32 = 4;

pub async fn run(config: &AppConfig, file: PathBuf, seconds: Option<f64>) -> anyhow::Result<()> {
    let recording =
        load_recording(&file).map_err(|e| anyhow::anyhow!("Failed to load recording: {e}"))?;

    let run_secs = seconds
        .unwrap_or_else(|| SessionClock::ns_to_secs(recording.duration_ns()) + 0.5)
        .max(0.0);

    let clock = SessionClock::start();
    let (source, detector) = replay(&recording, clock.clone());
    let session = GestureSession::new(source, detector, config.control.clone())
        .map_err(|e| anyhow::anyhow!("Invalid control config: {e}"))?;

    println!("Live session: {}", file.display());
    println!("  Started: {}", clock.epoch_wall());
    println!("  Tick rate: {}Hz", config.sync.tick_rate_hz);
    println!("  Duration: {run_secs:.1}s");
    println!("Press Ctrl+C to stop...");
    println!();

    let poll = PollLoop::start(session, config.sync.tick_rate_hz);
    let mut reports = poll.subscribe();
    let mut status_rate = RateController::new(STATUS_HZ);
    let mut hand_present = false;

    let deadline = tokio::time::sleep(Duration::from_secs_f64(run_secs));
    tokio::pin!(deadline);

    loop {
        tokio::select! {
            _ = &mut deadline => break,
            result = tokio::signal::ctrl_c() => {
                result?;
                println!();
                break;
            }
            changed = reports.changed() => {
                if changed.is_err() {
                    break;
                }
                let Some(report) = *reports.borrow_and_update() else {
                    continue;
                };
                if report.hand_present != hand_present {
                    hand_present = report.hand_present;
                    tracing::info!(tick = report.tick, hand_present, "Hand presence changed");
                }
                if status_rate.should_tick(clock.elapsed_ns()) {
                    println!(
                        "  {:>6.2}s hand={:<5} az={:+.4} polar={:.4} r={:.4}",
                        clock.elapsed_secs(),
                        report.hand_present,
                        report.camera.azimuth,
                        report.camera.polar_angle,
                        report.camera.radius
                    );
                }
            }
        }
    }

    let session = poll
        .stop()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to stop poll loop: {e}"))?;

    let stats = session.sync_stats();
    println!();
    println!("Stopped after {:.2}s", clock.elapsed_secs());
    println!("  Status: {}", session.status());
    println!("  Ticks: {}", session.controller().ticks());
    println!("  Detector calls: {}", stats.detector_calls);
    println!("  Duplicates skipped: {}", stats.duplicates);

    Ok(())
}
