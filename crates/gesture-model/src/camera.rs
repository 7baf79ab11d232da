//! Orbital camera state and its Cartesian pose.
//!
//! The camera always orbits the origin. [`CameraState`] is the record the
//! rendering surface reads each tick; [`CameraPose`] is the same placement
//! in world coordinates.

use serde::{Deserialize, Serialize};

/// A 3D vector in world space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn sub(&self, other: &Vec3) -> Vec3 {
        Vec3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    /// Unit vector in the same direction, or `None` for a zero vector.
    pub fn normalized(&self) -> Option<Vec3> {
        let len = self.length();
        if len < 1e-12 || !len.is_finite() {
            return None;
        }
        Some(Vec3::new(self.x / len, self.y / len, self.z / len))
    }
}

/// Orbit parameters published to the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraState {
    /// Rotation around the vertical axis (radians).
    pub azimuth: f64,

    /// Angle from the +Y pole (radians), kept away from both poles.
    pub polar_angle: f64,

    /// Distance from the origin.
    pub radius: f64,
}

impl CameraState {
    pub fn new(azimuth: f64, polar_angle: f64, radius: f64) -> Self {
        Self {
            azimuth,
            polar_angle,
            radius,
        }
    }

    /// Spherical to Cartesian, Y up, azimuth measured from +Z towards +X.
    pub fn position(&self) -> Vec3 {
        let sin_polar = self.polar_angle.sin();
        Vec3 {
            x: self.radius * sin_polar * self.azimuth.sin(),
            y: self.radius * self.polar_angle.cos(),
            z: self.radius * sin_polar * self.azimuth.cos(),
        }
    }

    /// Camera placement looking at the origin.
    pub fn pose(&self) -> CameraPose {
        CameraPose {
            position: self.position(),
            target: Vec3::ZERO,
        }
    }
}

/// World-space camera placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub position: Vec3,
    pub target: Vec3,
}

impl CameraPose {
    /// Unit look direction from the camera towards its target.
    pub fn forward(&self) -> Option<Vec3> {
        self.target.sub(&self.position).normalized()
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use super::*;

    #[test]
    fn test_equator_front_position() {
        let state = CameraState::new(0.0, FRAC_PI_2, 5.0);
        let p = state.position();
        assert!(p.x.abs() < 1e-9);
        assert!(p.y.abs() < 1e-9);
        assert!((p.z - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_azimuth_quarter_turn_moves_to_x() {
        let state = CameraState::new(FRAC_PI_2, FRAC_PI_2, 2.0);
        let p = state.position();
        assert!((p.x - 2.0).abs() < 1e-9);
        assert!(p.z.abs() < 1e-9);
    }

    #[test]
    fn test_position_keeps_radius() {
        let state = CameraState::new(1.3, 0.7, 7.5);
        assert!((state.position().length() - 7.5).abs() < 1e-9);
    }

    #[test]
    fn test_pose_looks_at_origin() {
        let state = CameraState::new(0.4, PI / 3.0, 5.0);
        let pose = state.pose();
        assert_eq!(pose.target, Vec3::ZERO);

        let forward = pose.forward().unwrap();
        let back = state.position().normalized().unwrap();
        assert!((forward.x + back.x).abs() < 1e-9);
        assert!((forward.y + back.y).abs() < 1e-9);
        assert!((forward.z + back.z).abs() < 1e-9);
    }

    #[test]
    fn test_zero_vector_has_no_direction() {
        assert!(Vec3::ZERO.normalized().is_none());
    }
}
