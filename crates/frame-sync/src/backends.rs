//! Replay backends.
//!
//! A recording is split into a video source that exposes frame timestamps
//! as a clock passes them, and a detector that answers with whatever was
//! recorded for each frame. Together they reproduce a live session without
//! a camera or an inference runtime.

use std::path::Path;

use handorbit_common::clock::Clock;
use handorbit_common::error::{HandOrbitError, HandOrbitResult};
use handorbit_gesture_model::landmark::LandmarkSample;
use handorbit_gesture_model::recording::{Recording, TimestampNs};

use crate::{HandDetector, VideoFrame, VideoSource};

/// Read and parse a JSONL recording from disk.
pub fn load_recording(path: impl AsRef<Path>) -> HandOrbitResult<Recording> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(HandOrbitError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    let recording = Recording::from_jsonl(&content)
        .map_err(|e| HandOrbitError::recording(format!("{}: {e}", path.display())))?;

    tracing::info!(
        path = %path.display(),
        frames = recording.frames.len(),
        distinct = recording.distinct_frames(),
        "Recording loaded"
    );
    Ok(recording)
}

/// Build the source/detector pair for a recording played against `clock`.
pub fn replay<C: Clock>(recording: &Recording, clock: C) -> (ReplayVideoSource<C>, ReplayDetector) {
    (
        ReplayVideoSource::new(recording, clock),
        ReplayDetector::new(recording),
    )
}

/// Video source that shows the latest recorded frame the clock has reached.
///
/// Lines sharing a timestamp are repeated reads of one video frame: the
/// first line of the run is the frame, later lines are never served.
pub struct ReplayVideoSource<C: Clock> {
    timestamps: Vec<TimestampNs>,
    clock: C,
    cursor: Option<usize>,
}

impl<C: Clock> ReplayVideoSource<C> {
    pub fn new(recording: &Recording, clock: C) -> Self {
        Self {
            timestamps: recording.frames.iter().map(|f| f.timestamp_ns).collect(),
            clock,
            cursor: None,
        }
    }

    /// Whether the clock has passed the last recorded frame.
    pub fn is_finished(&self) -> bool {
        match self.timestamps.last() {
            None => true,
            Some(&last) => self
                .cursor
                .is_some_and(|idx| self.timestamps[idx] == last),
        }
    }
}

impl<C: Clock> VideoSource for ReplayVideoSource<C> {
    fn current_frame(&mut self) -> Option<VideoFrame> {
        let now = self.clock.now_ns();
        let mut next = self.cursor.map_or(0, |idx| idx + 1);
        while next < self.timestamps.len() && self.timestamps[next] <= now {
            let shown = self.cursor.map(|idx| self.timestamps[idx]);
            if shown != Some(self.timestamps[next]) {
                self.cursor = Some(next);
            }
            next += 1;
        }

        self.cursor.map(|idx| VideoFrame {
            timestamp_ns: self.timestamps[idx],
            sequence: idx as u64,
        })
    }

    fn name(&self) -> &str {
        "replay"
    }
}

/// Detector that returns the recorded hand for each frame.
pub struct ReplayDetector {
    hands: Vec<Option<LandmarkSample>>,
    calls: u64,
}

impl ReplayDetector {
    pub fn new(recording: &Recording) -> Self {
        Self {
            hands: recording.frames.iter().map(|f| f.hand.clone()).collect(),
            calls: 0,
        }
    }

    /// Load a detector straight from a recording file.
    ///
    /// Any failure here is an initialization failure and is reported as
    /// [`HandOrbitError::DetectorUnavailable`].
    pub fn open(path: impl AsRef<Path>) -> HandOrbitResult<Self> {
        let recording = load_recording(path)
            .map_err(|e| HandOrbitError::detector_unavailable(e.to_string()))?;
        Ok(Self::new(&recording))
    }

    /// Number of detect calls served.
    pub fn calls(&self) -> u64 {
        self.calls
    }
}

impl HandDetector for ReplayDetector {
    fn detect(&mut self, frame: &VideoFrame) -> HandOrbitResult<Option<LandmarkSample>> {
        self.calls += 1;
        self.hands
            .get(frame.sequence as usize)
            .cloned()
            .ok_or_else(|| {
                HandOrbitError::detection(format!(
                    "frame {} is not in the recording ({} frames)",
                    frame.sequence,
                    self.hands.len()
                ))
            })
    }

    fn is_ready(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        "replay"
    }
}
