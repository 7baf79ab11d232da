//! Hand landmark samples produced by the detector.
//!
//! A sample holds the 21-point hand layout for a single video frame.
//! Detectors occasionally return partial hands, so samples shorter than
//! 21 points are accepted and consumers look points up by index.

use serde::{Deserialize, Serialize};

/// Number of landmarks in a full hand.
pub const HAND_LANDMARK_COUNT: usize = 21;

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// A single tracked point in normalized image coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    /// Relative depth; detectors that do not report it leave it at zero.
    #[serde(default)]
    pub z: f64,
}

impl Landmark {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance to another landmark in the image plane (ignores z).
    pub fn planar_distance(&self, other: &Landmark) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Errors raised when building a sample from raw detector output.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SampleError {
    #[error("landmark sample is empty")]
    Empty,

    #[error("landmark sample has {count} points, a hand has at most {HAND_LANDMARK_COUNT}")]
    TooManyPoints { count: usize },
}

/// One detected hand for one video frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LandmarkSample {
    points: Vec<Landmark>,
}

impl LandmarkSample {
    pub fn new(points: Vec<Landmark>) -> Result<Self, SampleError> {
        if points.is_empty() {
            return Err(SampleError::Empty);
        }
        if points.len() > HAND_LANDMARK_COUNT {
            return Err(SampleError::TooManyPoints {
                count: points.len(),
            });
        }
        Ok(Self { points })
    }

    /// Build a sample from `(x, y)` pairs with zero depth.
    pub fn from_xy(points: &[(f64, f64)]) -> Result<Self, SampleError> {
        Self::new(
            points
                .iter()
                .map(|&(x, y)| Landmark::new(x, y, 0.0))
                .collect(),
        )
    }

    pub fn get(&self, index: usize) -> Option<&Landmark> {
        self.points.get(index)
    }

    pub fn points(&self) -> &[Landmark] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether all 21 hand landmarks are present.
    pub fn is_complete(&self) -> bool {
        self.points.len() == HAND_LANDMARK_COUNT
    }
}

impl<'de> Deserialize<'de> for LandmarkSample {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let points = Vec::<Landmark>::deserialize(deserializer)?;
        LandmarkSample::new(points).map_err(serde::de::Error::custom)
    }
}
