//! HandOrbit Control Core
//!
//! Turns detector output into camera motion:
//! - **Extractor:** Reduce a landmark sample to a pointing + pinch signal
//! - **Smoothing:** Advance the orbital camera state towards the gesture
//! - **Preview:** Simulate controller convergence for a held gesture
//!
//! This crate is pure computation: no I/O, no scheduling. All inputs are
//! data; all outputs are data.

pub mod camera_preview;
pub mod extractor;
pub mod smoothing;

pub use extractor::extract_gesture;
pub use smoothing::SmoothingController;
