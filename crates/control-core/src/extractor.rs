//! Gesture extraction.
//!
//! Reduces a raw landmark sample to the compact signal the controller
//! consumes. The pointing position is the centroid of three stable palm
//! points (wrist, index and middle knuckles) rather than a fingertip, which
//! keeps finger wiggle out of the camera path.

use handorbit_gesture_model::gesture::GestureSignal;
use handorbit_gesture_model::landmark::{
    LandmarkSample, INDEX_MCP, INDEX_TIP, MIDDLE_MCP, THUMB_TIP, WRIST,
};

/// Landmarks averaged into the pointing position.
pub const POINTING_LANDMARKS: [usize; 3] = [WRIST, MIDDLE_MCP, INDEX_MCP];

/// Extract a gesture signal from one frame's detection.
///
/// `None` in means no hand was detected and yields `None`. A sample missing
/// any pointing landmark is treated the same way. The pinch distance is left
/// empty when either fingertip is missing.
pub fn extract_gesture(sample: Option<&LandmarkSample>) -> Option<GestureSignal> {
    let sample = sample?;

    let (cx, cy) = pointing_centroid(sample)?;
    if !cx.is_finite() || !cy.is_finite() {
        tracing::trace!(cx, cy, "Discarding sample with non-finite centroid");
        return None;
    }

    Some(GestureSignal {
        point_x: 1.0 - cx,
        point_y: cy,
        pinch_distance: pinch_distance(sample),
    })
}

/// Raw (unmirrored) centroid of the pointing landmarks.
pub fn pointing_centroid(sample: &LandmarkSample) -> Option<(f64, f64)> {
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    for &idx in &POINTING_LANDMARKS {
        let Some(point) = sample.get(idx) else {
            tracing::trace!(
                landmark = idx,
                points = sample.len(),
                "Sample missing pointing landmark"
            );
            return None;
        };
        sum_x += point.x;
        sum_y += point.y;
    }
    let n = POINTING_LANDMARKS.len() as f64;
    Some((sum_x / n, sum_y / n))
}

/// Planar distance between the thumb tip and the index fingertip.
pub fn pinch_distance(sample: &LandmarkSample) -> Option<f64> {
    let thumb = sample.get(THUMB_TIP)?;
    let index = sample.get(INDEX_TIP)?;
    let distance = thumb.planar_distance(index);
    distance.is_finite().then_some(distance)
}
