//! The per-frame gesture signal consumed by the camera controller.

use serde::{Deserialize, Serialize};

/// Pointing position and pinch distance derived from one landmark sample.
///
/// "No hand" is expressed as `Option<GestureSignal>::None`, never as a
/// sentinel value inside the signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureSignal {
    /// Horizontal pointing position, mirrored so it follows a mirrored preview.
    pub point_x: f64,

    /// Vertical pointing position (image space, 0 = top).
    pub point_y: f64,

    /// Thumb-tip to index-tip distance, absent when either tip is missing.
    pub pinch_distance: Option<f64>,
}

impl GestureSignal {
    pub fn new(point_x: f64, point_y: f64, pinch_distance: Option<f64>) -> Self {
        Self {
            point_x,
            point_y,
            pinch_distance,
        }
    }

    /// A signal with the hand at the frame center and no pinch.
    pub fn centered() -> Self {
        Self::new(0.5, 0.5, None)
    }

    pub fn with_pinch(mut self, distance: f64) -> Self {
        self.pinch_distance = Some(distance);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders() {
        let signal = GestureSignal::centered().with_pinch(0.08);
        assert_eq!(signal.point_x, 0.5);
        assert_eq!(signal.pinch_distance, Some(0.08));
    }

    #[test]
    fn test_serializes_missing_pinch_as_null() {
        let json = serde_json::to_string(&GestureSignal::centered()).unwrap();
        assert!(json.contains("\"pinch_distance\":null"));
    }
}
