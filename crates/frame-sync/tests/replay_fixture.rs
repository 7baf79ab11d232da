use std::path::PathBuf;

use handorbit_common::clock::TickClock;
use handorbit_common::config::ControlConfig;
use handorbit_frame_sync::backends::{load_recording, replay};
use handorbit_frame_sync::{GestureSession, PollKind, SessionStatus};
use handorbit_gesture_model::recording::Recording;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("fixtures")
        .join("sample-session")
        .join("frames.jsonl")
}

fn load_fixture() -> Recording {
    load_recording(fixture_path()).expect("fixture recording should load")
}

#[test]
fn fixture_header_and_shape() {
    let recording = load_fixture();
    let header = recording.header.as_ref().expect("fixture has a header");
    assert_eq!(header.fps, 30);
    assert_eq!(recording.distinct_frames(), 60);
    assert!(recording.frames.len() > recording.distinct_frames());
    assert!(recording.frames.iter().any(|f| f.hand.is_none()));
}

#[test]
fn replay_runs_detector_once_per_distinct_frame() {
    let recording = load_fixture();
    let clock = TickClock::new(60);
    let (source, detector) = replay(&recording, clock.clone());
    let mut session = GestureSession::new(source, detector, ControlConfig::default()).unwrap();

    let ticks = recording.duration_ns() / clock.interval_ns() + 10;
    let mut processed = 0;
    for _ in 0..ticks {
        let report = session.tick();
        if matches!(report.poll, PollKind::Processed { .. }) {
            processed += 1;
        }
        clock.advance();
    }

    let stats = session.sync_stats();
    assert_eq!(processed, recording.distinct_frames());
    assert_eq!(session.detector().calls(), recording.distinct_frames() as u64);
    assert_eq!(stats.detector_calls, session.detector().calls());
    assert!(stats.duplicates > 0);
    assert_eq!(stats.detection_errors, 0);
    assert!(session.source().is_finished());
}

#[test]
fn replay_final_camera_is_finite_and_in_range() {
    let recording = load_fixture();
    let config = ControlConfig::default();
    let clock = TickClock::new(60);
    let (source, detector) = replay(&recording, clock.clone());
    let mut session = GestureSession::new(source, detector, config.clone()).unwrap();

    let ticks = recording.duration_ns() / clock.interval_ns() + 10;
    let mut last = None;
    for _ in 0..ticks {
        last = Some(session.tick());
        clock.advance();
    }
    let report = last.expect("at least one tick");
    let camera = report.camera;

    assert!(camera.azimuth.is_finite());
    assert!(camera.polar_angle >= config.polar_epsilon);
    assert!(camera.polar_angle <= std::f64::consts::PI - config.polar_epsilon);
    assert!(camera.radius >= config.min_radius() && camera.radius <= config.max_radius());
    assert_ne!(camera.azimuth, config.initial_azimuth);

    // The fixture ends with a hand in view.
    assert!(report.hand_present);
    assert_eq!(session.status(), SessionStatus::Tracking);
    assert_eq!(session.controller().guarded_updates(), 0);
}
