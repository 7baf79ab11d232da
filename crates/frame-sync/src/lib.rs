//! HandOrbit Frame Sync
//!
//! Drives the hand detector against a live video source. The detector is
//! expensive relative to a display refresh, so it runs at most once per
//! distinct video frame:
//!
//! - **Synchronizer:** dedup polls by video timestamp
//! - **Session:** synchronizer → extractor → controller, once per tick
//! - **Poll loop:** cancellable repeating task that ticks a session
//! - **Backends:** replay sources for recorded detector output
//!
//! Both the video source and the detector are pluggable traits, so the
//! same pipeline runs against a webcam binding or a recording.

pub mod backends;
pub mod poll_loop;
pub mod session;

use handorbit_common::error::HandOrbitResult;
use handorbit_gesture_model::landmark::LandmarkSample;
use handorbit_gesture_model::recording::TimestampNs;
use serde::{Deserialize, Serialize};

pub use poll_loop::PollLoop;
pub use session::{GestureSession, SessionStatus, TickReport};

/// A decoded video frame as seen by the synchronizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoFrame {
    /// Presentation timestamp of the frame.
    pub timestamp_ns: TimestampNs,
    /// Position of the frame in the source, for detectors that index by it.
    pub sequence: u64,
}

/// Trait for video sources.
pub trait VideoSource: Send {
    /// The frame currently being displayed, or `None` before the first
    /// frame has been decoded.
    fn current_frame(&mut self) -> Option<VideoFrame>;

    /// Source name for logging.
    fn name(&self) -> &str;
}

/// Trait for hand landmark detectors.
pub trait HandDetector: Send {
    /// Run detection on a frame. `Ok(None)` means no hand is in frame.
    fn detect(&mut self, frame: &VideoFrame) -> HandOrbitResult<Option<LandmarkSample>>;

    /// Whether the detector has finished initializing.
    fn is_ready(&self) -> bool;

    /// Detector name for logging.
    fn name(&self) -> &str;
}

/// What a single poll did.
#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    /// Detector not initialized yet; the source was not read.
    DetectorNotReady,
    /// The source has no frame yet.
    NoFrame,
    /// Same timestamp as the last processed frame; detection skipped.
    Duplicate,
    /// Detector ran on a new frame. `None` means no hand.
    Processed(Option<LandmarkSample>),
}

impl PollOutcome {
    pub fn kind(&self) -> PollKind {
        match self {
            PollOutcome::DetectorNotReady => PollKind::DetectorNotReady,
            PollOutcome::NoFrame => PollKind::NoFrame,
            PollOutcome::Duplicate => PollKind::Duplicate,
            PollOutcome::Processed(hand) => PollKind::Processed {
                hand: hand.is_some(),
            },
        }
    }
}

/// Payload-free summary of a [`PollOutcome`] for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "poll", rename_all = "snake_case")]
pub enum PollKind {
    DetectorNotReady,
    NoFrame,
    Duplicate,
    Processed { hand: bool },
}

/// Counters kept by the synchronizer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncStats {
    pub polls: u64,
    pub detector_calls: u64,
    pub duplicates: u64,
    pub detection_errors: u64,
    pub not_ready: u64,
}

/// Runs the detector at most once per distinct video timestamp.
#[derive(Debug, Default)]
pub struct FrameSynchronizer {
    /// `None` until the first frame is processed.
    last_processed: Option<TimestampNs>,
    stats: SyncStats,
}

impl FrameSynchronizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Poll the source once, running the detector if the frame is new.
    ///
    /// A detector error on a frame is logged and treated as "no hand"; the
    /// frame still counts as processed so it is not retried.
    pub fn poll<S, D>(&mut self, source: &mut S, detector: &mut D) -> PollOutcome
    where
        S: VideoSource + ?Sized,
        D: HandDetector + ?Sized,
    {
        self.stats.polls += 1;

        if !detector.is_ready() {
            self.stats.not_ready += 1;
            return PollOutcome::DetectorNotReady;
        }

        let Some(frame) = source.current_frame() else {
            return PollOutcome::NoFrame;
        };

        if self.last_processed == Some(frame.timestamp_ns) {
            self.stats.duplicates += 1;
            return PollOutcome::Duplicate;
        }

        self.last_processed = Some(frame.timestamp_ns);
        self.stats.detector_calls += 1;

        match detector.detect(&frame) {
            Ok(hand) => {
                tracing::trace!(
                    timestamp_ns = frame.timestamp_ns,
                    sequence = frame.sequence,
                    hand = hand.is_some(),
                    "Frame processed"
                );
                PollOutcome::Processed(hand)
            }
            Err(e) => {
                self.stats.detection_errors += 1;
                tracing::warn!(
                    error = %e,
                    detector = %detector.name(),
                    timestamp_ns = frame.timestamp_ns,
                    "Hand detection error"
                );
                PollOutcome::Processed(None)
            }
        }
    }

    /// Timestamp of the last frame handed to the detector.
    pub fn last_processed(&self) -> Option<TimestampNs> {
        self.last_processed
    }

    pub fn stats(&self) -> SyncStats {
        self.stats
    }
}


#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::testing::{CountingDetector, ScriptedSource};
    use super::*;

    #[test]
    fn test_duplicate_timestamps_skip_detection() {
        let mut source = ScriptedSource::new(vec![Some(0), Some(0), Some(10), Some(10), Some(10)]);
        let mut detector = CountingDetector::with_hand(0.5, 0.5);
        let mut sync = FrameSynchronizer::new();

        let outcomes: Vec<PollKind> = (0..5)
            .map(|_| sync.poll(&mut source, &mut detector).kind())
            .collect();

        assert_eq!(
            outcomes,
            vec![
                PollKind::Processed { hand: true },
                PollKind::Duplicate,
                PollKind::Processed { hand: true },
                PollKind::Duplicate,
                PollKind::Duplicate,
            ]
        );
        assert_eq!(detector.calls, 2);
        assert_eq!(sync.stats().duplicates, 3);
        assert_eq!(sync.last_processed(), Some(10));
    }

    #[test]
    fn test_not_ready_detector_skips_polling_entirely() {
        let mut source = ScriptedSource::new(vec![Some(0), Some(1)]);
        let mut detector = CountingDetector::with_hand(0.5, 0.5);
        detector.ready = false;
        let mut sync = FrameSynchronizer::new();

        for _ in 0..3 {
            assert_eq!(
                sync.poll(&mut source, &mut detector),
                PollOutcome::DetectorNotReady
            );
        }
        assert_eq!(source.reads, 0);
        assert_eq!(detector.calls, 0);
        assert_eq!(sync.last_processed(), None);
        assert_eq!(sync.stats().not_ready, 3);
    }

    #[test]
    fn test_no_frame_before_video_starts() {
        let mut source = ScriptedSource::new(vec![None, None, Some(5)]);
        let mut detector = CountingDetector::without_hand();
        let mut sync = FrameSynchronizer::new();

        assert_eq!(sync.poll(&mut source, &mut detector), PollOutcome::NoFrame);
        assert_eq!(sync.poll(&mut source, &mut detector), PollOutcome::NoFrame);
        assert_eq!(
            sync.poll(&mut source, &mut detector),
            PollOutcome::Processed(None)
        );
        assert_eq!(detector.calls, 1);
    }

    #[test]
    fn test_detection_error_is_absorbed_and_not_retried() {
        let mut source = ScriptedSource::new(vec![Some(0), Some(0), Some(1)]);
        let mut detector = CountingDetector::with_hand(0.5, 0.5);
        detector.fail_on_call = Some(1);
        let mut sync = FrameSynchronizer::new();

        assert_eq!(
            sync.poll(&mut source, &mut detector),
            PollOutcome::Processed(None)
        );
        assert_eq!(sync.poll(&mut source, &mut detector), PollOutcome::Duplicate);
        assert!(matches!(
            sync.poll(&mut source, &mut detector),
            PollOutcome::Processed(Some(_))
        ));
        assert_eq!(detector.calls, 2);
        assert_eq!(sync.stats().detection_errors, 1);
    }

    proptest! {
        #[test]
        fn prop_one_detection_per_distinct_timestamp(
            repeats in proptest::collection::vec(1usize..6, 1..40)
        ) {
            // Frame i is shown for repeats[i] polls, timestamps strictly increasing.
            let script: Vec<Option<TimestampNs>> = repeats
                .iter()
                .enumerate()
                .flat_map(|(i, &n)| std::iter::repeat(Some(i as TimestampNs * 33_000_000)).take(n))
                .collect();
            let polls = script.len();

            let mut source = ScriptedSource::new(script);
            let mut detector = CountingDetector::with_hand(0.3, 0.7);
            let mut sync = FrameSynchronizer::new();
            for _ in 0..polls {
                sync.poll(&mut source, &mut detector);
            }

            prop_assert_eq!(detector.calls, repeats.len());
            prop_assert_eq!(sync.stats().duplicates as usize, polls - repeats.len());
        }
    }
}
