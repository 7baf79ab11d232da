//! Replay a recording on a virtual clock.

use std::path::PathBuf;

use handorbit_common::clock::TickClock;
use handorbit_common::config::AppConfig;
use handorbit_frame_sync::backends::{load_recording, replay};
use handorbit_frame_sync::{GestureSession, PollKind};
use handorbit_gesture_model::camera::CameraState;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ReplaySummary {
    ticks: u64,
    frames_processed: u64,
    duplicates_skipped: u64,
    detector_calls: u64,
    detection_errors: u64,
    final_camera: CameraState,
}

pub fn run(config: &AppConfig, file: PathBuf, ticks: Option<u64>, json: bool) -> anyhow::Result<()> {
    let recording =
        load_recording(&file).map_err(|e| anyhow::anyhow!("Failed to load recording: {e}"))?;

    let clock = TickClock::new(config.sync.tick_rate_hz);
    // Enough ticks to reach the last frame, plus one to show it.
    let ticks = ticks.unwrap_or(recording.duration_ns() / clock.interval_ns() + 2);

    let (source, detector) = replay(&recording, clock.clone());
    let mut session = GestureSession::new(source, detector, config.control.clone())
        .map_err(|e| anyhow::anyhow!("Invalid control config: {e}"))?;

    if !json {
        println!("Replaying: {}", file.display());
        println!(
            "  Frames: {} ({} distinct)",
            recording.frames.len(),
            recording.distinct_frames()
        );
        println!(
            "  Ticks: {ticks} @ {}Hz",
            config.sync.tick_rate_hz
        );
        println!();
    }

    let mut processed = 0u64;
    for _ in 0..ticks {
        let report = session.tick();
        if json {
            println!("{}", serde_json::to_string(&report)?);
        } else if let PollKind::Processed { hand } = report.poll {
            println!(
                "  tick {:>5} hand={:<5} az={:+.4} polar={:.4} r={:.4}",
                report.tick,
                hand,
                report.camera.azimuth,
                report.camera.polar_angle,
                report.camera.radius
            );
        }
        if matches!(report.poll, PollKind::Processed { .. }) {
            processed += 1;
        }
        clock.advance();
    }

    let stats = session.sync_stats();
    let summary = ReplaySummary {
        ticks,
        frames_processed: processed,
        duplicates_skipped: stats.duplicates,
        detector_calls: session.detector().calls(),
        detection_errors: stats.detection_errors,
        final_camera: session.camera_state(),
    };

    if json {
        println!("{}", serde_json::json!({ "summary": summary }));
    } else {
        println!();
        println!("Summary:");
        println!("  Frames processed: {}", summary.frames_processed);
        println!("  Duplicates skipped: {}", summary.duplicates_skipped);
        println!("  Detector calls: {}", summary.detector_calls);
        println!("  Detection errors: {}", summary.detection_errors);
        println!(
            "  Final camera: az={:+.4} polar={:.4} r={:.4}",
            summary.final_camera.azimuth,
            summary.final_camera.polar_angle,
            summary.final_camera.radius
        );
    }

    Ok(())
}
