//! Gesture session: one tick of the full pipeline.
//!
//! A session owns every stage, so detection and camera smoothing happen in
//! the same call on the same task. The camera state has a single writer and
//! needs no lock; readers get copies through [`TickReport`].

use std::fmt;

use handorbit_common::config::ControlConfig;
use handorbit_common::error::HandOrbitResult;
use handorbit_control_core::extractor::extract_gesture;
use handorbit_control_core::smoothing::SmoothingController;
use handorbit_gesture_model::camera::{CameraPose, CameraState};
use handorbit_gesture_model::gesture::GestureSignal;
use serde::Serialize;

use crate::{FrameSynchronizer, HandDetector, PollKind, PollOutcome, SyncStats, VideoSource};

/// Human-readable pipeline state for a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Detector still initializing; nothing is polled.
    LoadingDetector,
    /// Detector ready but no video frame processed yet.
    AwaitingVideo,
    /// Frames flowing, no hand in view.
    NoHand,
    /// A hand is steering the camera.
    Tracking,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SessionStatus::LoadingDetector => "Loading hand detector...",
            SessionStatus::AwaitingVideo => "Waiting for video",
            SessionStatus::NoHand => "Show your hand to start",
            SessionStatus::Tracking => "Move your hand to orbit, pinch to zoom",
        };
        f.write_str(text)
    }
}

/// Everything the renderer and UI need after one tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TickReport {
    pub tick: u64,
    pub camera: CameraState,
    pub pose: CameraPose,
    /// Whether the latest gesture came from a detected hand (display only).
    pub hand_present: bool,
    #[serde(flatten)]
    pub poll: PollKind,
}

/// Synchronizer, extractor, and controller wired together.
pub struct GestureSession<S, D> {
    source: S,
    detector: D,
    sync: FrameSynchronizer,
    controller: SmoothingController,
    /// Last extracted gesture, reused on ticks without a new frame.
    latest: Option<GestureSignal>,
}

impl<S: VideoSource, D: HandDetector> GestureSession<S, D> {
    /// Wire a source and detector to a fresh controller.
    ///
    /// Fails with [`HandOrbitError::Config`] if `config` does not validate.
    ///
    /// [`HandOrbitError::Config`]: handorbit_common::error::HandOrbitError::Config
    pub fn new(source: S, detector: D, config: ControlConfig) -> HandOrbitResult<Self> {
        let controller = SmoothingController::new(config)?;
        tracing::info!(
            source = %source.name(),
            detector = %detector.name(),
            "Gesture session created"
        );
        Ok(Self {
            source,
            detector,
            sync: FrameSynchronizer::new(),
            controller,
            latest: None,
        })
    }

    /// Poll for a new frame, then advance the camera one tick.
    pub fn tick(&mut self) -> TickReport {
        let outcome = self.sync.poll(&mut self.source, &mut self.detector);
        let poll = outcome.kind();

        if let PollOutcome::Processed(hand) = outcome {
            let was_present = self.latest.is_some();
            self.latest = extract_gesture(hand.as_ref());
            let present = self.latest.is_some();
            if present != was_present {
                tracing::debug!(present, "Hand presence changed");
            }
        }

        let camera = self.controller.tick(self.latest.as_ref());
        TickReport {
            tick: self.controller.ticks(),
            camera,
            pose: camera.pose(),
            hand_present: self.latest.is_some(),
            poll,
        }
    }

    pub fn status(&self) -> SessionStatus {
        if !self.detector.is_ready() {
            SessionStatus::LoadingDetector
        } else if self.sync.last_processed().is_none() {
            SessionStatus::AwaitingVideo
        } else if self.latest.is_some() {
            SessionStatus::Tracking
        } else {
            SessionStatus::NoHand
        }
    }

    pub fn hand_present(&self) -> bool {
        self.latest.is_some()
    }

    pub fn latest_gesture(&self) -> Option<&GestureSignal> {
        self.latest.as_ref()
    }

    pub fn camera_state(&self) -> CameraState {
        self.controller.camera_state()
    }

    pub fn controller(&self) -> &SmoothingController {
        &self.controller
    }

    pub fn sync_stats(&self) -> SyncStats {
        self.sync.stats()
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn detector(&self) -> &D {
        &self.detector
    }

    pub fn detector_mut(&mut self) -> &mut D {
        &mut self.detector
    }
}
