//! Orbital camera smoothing.
//!
//! The controller owns a persistent [`OrbitState`] and nudges it towards the
//! pose implied by the latest gesture once per animation tick:
//!
//! 1. **Orientation:** pointing position maps affinely to a desired azimuth
//!    and polar angle, approached with a one-pole low-pass filter.
//! 2. **Zoom:** pinch distance maps through a clamped linear range to a
//!    desired orbit radius, approached with a faster filter.
//! 3. **Hold:** without a gesture nothing moves; without a pinch the zoom
//!    holds.
//!
//! The filter advances a fixed fraction per tick and is not normalized by
//! frame time. The default factors assume a 60 Hz tick; running the loop at
//! a different rate changes how the camera feels.
//!
//! The polar clamp is applied only to the reported [`CameraState`]. The
//! smoothed polar angle itself stays unclamped so it can travel back from
//! beyond a pole margin without sticking to it.

use std::f64::consts::{FRAC_PI_2, PI};

use handorbit_common::config::ControlConfig;
use handorbit_common::error::HandOrbitResult;
use handorbit_gesture_model::camera::{CameraPose, CameraState};
use handorbit_gesture_model::gesture::GestureSignal;
use serde::{Deserialize, Serialize};

/// Smoothed orbit parameters carried from tick to tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitState {
    pub azimuth: f64,
    /// Smoothed polar angle before the pole clamp.
    pub polar: f64,
    pub radius: f64,
}

/// Gesture-driven orbit controller.
#[derive(Debug, Clone)]
pub struct SmoothingController {
    config: ControlConfig,
    orbit: OrbitState,
    ticks: u64,
    guarded_updates: u64,
}

impl SmoothingController {
    /// Create a controller at the configured starting orbit.
    ///
    /// The config is validated first: a non-finite starting orbit or a pole
    /// margin outside `[0, pi/2)` would otherwise reach the reported state.
    pub fn new(config: ControlConfig) -> HandOrbitResult<Self> {
        config.validate()?;
        Ok(Self::from_validated(config))
    }

    /// Create a controller with default tuning.
    pub fn with_defaults() -> Self {
        Self::from_validated(ControlConfig::default())
    }

    fn from_validated(config: ControlConfig) -> Self {
        let orbit = OrbitState {
            azimuth: config.initial_azimuth,
            polar: config.initial_polar,
            radius: config
                .initial_radius
                .clamp(config.min_radius(), config.max_radius()),
        };
        Self {
            config,
            orbit,
            ticks: 0,
            guarded_updates: 0,
        }
    }

    pub fn config(&self) -> &ControlConfig {
        &self.config
    }

    /// The raw smoothed orbit (polar angle unclamped).
    pub fn orbit(&self) -> OrbitState {
        self.orbit
    }

    /// Number of ticks run so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Number of component updates dropped because they were not finite.
    pub fn guarded_updates(&self) -> u64 {
        self.guarded_updates
    }

    /// Advance one animation tick using the latest gesture, if any.
    pub fn tick(&mut self, signal: Option<&GestureSignal>) -> CameraState {
        self.ticks += 1;

        let Some(signal) = signal else {
            return self.camera_state();
        };

        let (desired_azimuth, desired_polar) = self.desired_orientation(signal);
        let alpha = self.config.rotation_smoothing;
        self.orbit.azimuth = self.step("azimuth", self.orbit.azimuth, desired_azimuth, alpha);
        self.orbit.polar = self.step("polar", self.orbit.polar, desired_polar, alpha);

        if let Some(distance) = signal.pinch_distance {
            match self.pinch_to_zoom(distance) {
                Some(desired_radius) => {
                    let radius = self.step(
                        "radius",
                        self.orbit.radius,
                        desired_radius,
                        self.config.zoom_smoothing,
                    );
                    self.orbit.radius =
                        radius.clamp(self.config.min_radius(), self.config.max_radius());
                }
                None => {
                    self.guarded_updates += 1;
                    tracing::debug!(distance, "Pinch distance not mappable, holding zoom");
                }
            }
        }

        self.camera_state()
    }

    /// Camera state for the renderer, with the polar angle kept off the poles.
    pub fn camera_state(&self) -> CameraState {
        CameraState {
            azimuth: self.orbit.azimuth,
            polar_angle: self.clamped_polar(),
            radius: self.orbit.radius,
        }
    }

    /// Cartesian camera placement looking at the origin.
    pub fn pose(&self) -> CameraPose {
        self.camera_state().pose()
    }

    /// Azimuth and polar angle the gesture is pointing at.
    pub fn desired_orientation(&self, signal: &GestureSignal) -> (f64, f64) {
        let x_offset = signal.point_x * 2.0 - 1.0;
        let y_offset = signal.point_y * 2.0 - 1.0;
        (
            x_offset * self.config.azimuth_gain,
            FRAC_PI_2 + y_offset * self.config.polar_gain,
        )
    }

    /// Orbit radius a pinch distance asks for.
    ///
    /// Returns `None` when the configured pinch range is empty or the
    /// distance cannot be mapped to a finite value.
    pub fn pinch_to_zoom(&self, distance: f64) -> Option<f64> {
        let span = self.config.pinch_max - self.config.pinch_min;
        if !(span > 0.0) || !span.is_finite() {
            return None;
        }
        let t = ((distance - self.config.pinch_min) / span).clamp(0.0, 1.0);
        if !t.is_finite() {
            return None;
        }
        let zoom = self.config.zoom_near + t * (self.config.zoom_far - self.config.zoom_near);
        zoom.is_finite().then_some(zoom)
    }

    fn clamped_polar(&self) -> f64 {
        let eps = self.config.polar_epsilon;
        self.orbit.polar.clamp(eps, PI - eps)
    }

    /// One low-pass step, holding `current` if the result is not finite.
    fn step(&mut self, component: &'static str, current: f64, desired: f64, alpha: f64) -> f64 {
        let next = current + (desired - current) * alpha;
        if next.is_finite() {
            next
        } else {
            self.guarded_updates += 1;
            tracing::debug!(component, current, desired, "Non-finite update dropped");
            current
        }
    }
}
