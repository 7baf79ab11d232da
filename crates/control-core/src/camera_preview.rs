//! Camera motion preview helpers.
//!
//! Simulates the controller against a held gesture so tuning changes can be
//! inspected without running the renderer or a detector.

use handorbit_common::config::ControlConfig;
use handorbit_common::error::HandOrbitResult;
use handorbit_gesture_model::camera::{CameraState, Vec3};
use handorbit_gesture_model::gesture::GestureSignal;

use crate::smoothing::SmoothingController;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraMotionFrame {
    pub tick: u64,
    pub time_secs: f64,
    pub state: CameraState,
    pub position: Vec3,
    /// Distance of the smoothed azimuth from the gesture's target.
    pub azimuth_error: f64,
    /// Distance of the radius from the pinch target (zero without a pinch).
    pub radius_error: f64,
}

impl CameraMotionFrame {
    pub fn summary(&self) -> String {
        format!(
            "tick {:>4} t={:.3}s az={:+.4} polar={:.4} r={:.4} pos=({:+.3}, {:+.3}, {:+.3})",
            self.tick,
            self.time_secs,
            self.state.azimuth,
            self.state.polar_angle,
            self.state.radius,
            self.position.x,
            self.position.y,
            self.position.z
        )
    }
}

/// Run a fresh controller for `ticks` ticks with the same gesture each tick.
///
/// Frame 0 is the starting state before any tick. Fails if `config` does
/// not validate.
pub fn simulate_held_gesture(
    config: &ControlConfig,
    signal: Option<GestureSignal>,
    ticks: u64,
    tick_rate_hz: u32,
) -> HandOrbitResult<Vec<CameraMotionFrame>> {
    let step_secs = 1.0 / f64::from(tick_rate_hz.max(1));
    let mut controller = SmoothingController::new(config.clone())?;

    let target_azimuth = signal.map(|s| controller.desired_orientation(&s).0);
    let target_radius = signal
        .and_then(|s| s.pinch_distance)
        .and_then(|d| controller.pinch_to_zoom(d));

    let frame_for = |tick: u64, state: CameraState| CameraMotionFrame {
        tick,
        time_secs: tick as f64 * step_secs,
        state,
        position: state.position(),
        azimuth_error: target_azimuth
            .map(|t| (t - state.azimuth).abs())
            .unwrap_or(0.0),
        radius_error: target_radius
            .map(|t| (t - state.radius).abs())
            .unwrap_or(0.0),
    };

    let mut frames = Vec::with_capacity(ticks as usize + 1);
    frames.push(frame_for(0, controller.camera_state()));
    for tick in 1..=ticks {
        let state = controller.tick(signal.as_ref());
        frames.push(frame_for(tick, state));
    }
    Ok(frames)
}

/// First tick at which both azimuth and radius are within `tolerance`.
pub fn ticks_to_settle(frames: &[CameraMotionFrame], tolerance: f64) -> Option<u64> {
    frames
        .iter()
        .find(|f| f.azimuth_error <= tolerance && f.radius_error <= tolerance)
        .map(|f| f.tick)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_generates_frames() {
        let config = ControlConfig::default();
        let signal = GestureSignal::new(0.9, 0.5, Some(0.15));
        let frames = simulate_held_gesture(&config, Some(signal), 120, 60).unwrap();

        assert_eq!(frames.len(), 121);
        assert_eq!(frames[0].state.radius, 5.0);
        assert!((frames[60].time_secs - 1.0).abs() < 1e-9);
        assert!(frames.last().unwrap().azimuth_error < frames[0].azimuth_error);
        assert!(frames.last().unwrap().radius_error < 1e-3);
    }

    #[test]
    fn preview_without_gesture_is_static() {
        let config = ControlConfig::default();
        let frames = simulate_held_gesture(&config, None, 30, 60).unwrap();
        assert!(frames.iter().all(|f| f.state == frames[0].state));
        assert_eq!(ticks_to_settle(&frames, 0.0), Some(0));
    }

    #[test]
    fn settle_tick_matches_geometric_decay() {
        let config = ControlConfig::default();
        // Target azimuth 3.0 from 0.0; error after n ticks is 3.0 * 0.95^n.
        let frames =
            simulate_held_gesture(&config, Some(GestureSignal::new(1.0, 0.5, None)), 200, 60)
                .unwrap();
        let settled = ticks_to_settle(&frames, 0.01).unwrap();
        let expected = ((0.01f64 / 3.0).ln() / 0.95f64.ln()).ceil() as u64;
        assert!(settled.abs_diff(expected) <= 1);
    }

    #[test]
    fn summary_string_is_stable() {
        let frame = CameraMotionFrame {
            tick: 3,
            time_secs: 0.05,
            state: CameraState::new(0.5, 1.0, 5.0),
            position: Vec3::new(1.0, -2.0, 0.25),
            azimuth_error: 0.0,
            radius_error: 0.0,
        };
        let text = frame.summary();
        assert!(text.contains("az=+0.5000"));
        assert!(text.contains("pos=(+1.000, -2.000, +0.250)"));
    }
}
