//! HandOrbit Gesture Model
//!
//! Defines the data contracts passed between pipeline stages:
//! - **Landmarks:** Per-frame hand landmark samples from the detector
//! - **Gesture:** The compact pointing + pinch signal derived from a sample
//! - **Camera:** Orbital camera state and its Cartesian pose
//! - **Recording:** JSONL frame recordings used for deterministic replay
//!
//! Landmark coordinates are normalized to `[0.0, 1.0]` relative to the
//! video frame, matching the detector's image space.

pub mod camera;
pub mod gesture;
pub mod landmark;
pub mod recording;

pub use camera::*;
pub use gesture::*;
pub use landmark::*;
pub use recording::*;
