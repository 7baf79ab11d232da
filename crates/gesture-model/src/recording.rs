//! Frame recordings for deterministic replay.
//!
//! A recording captures, for every decoded video frame, the frame timestamp
//! and whatever the detector returned for it. It is stored as JSONL: an
//! optional `# {header}` comment line followed by one [`FrameRecord`] per
//! line.
//!
//! ```text
//! # {"schema_version":"1.0","fps":30,"source":"webcam"}
//! {"t":0,"hand":null}
//! {"t":33333333,"hand":[{"x":0.5,"y":0.5}, ...]}
//! ```

use serde::{Deserialize, Serialize};

use crate::landmark::LandmarkSample;

/// Nanoseconds since the start of the video stream.
pub type TimestampNs = u64;

/// Metadata line at the top of a recording.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordingHeader {
    pub schema_version: String,

    /// Nominal video frame rate.
    pub fps: u32,

    /// Free-form description of where the frames came from.
    #[serde(default)]
    pub source: Option<String>,
}

/// Detector output for one video frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameRecord {
    #[serde(rename = "t")]
    pub timestamp_ns: TimestampNs,

    /// The detected hand, `null` when no hand was in frame.
    pub hand: Option<LandmarkSample>,
}

impl FrameRecord {
    pub fn timestamp_secs(&self) -> f64 {
        self.timestamp_ns as f64 / 1_000_000_000.0
    }
}

/// Errors raised while reading a recording.
#[derive(Debug, thiserror::Error)]
pub enum RecordingError {
    #[error("Parse error on line {line}: {source}")]
    Parse {
        line: usize,
        source: serde_json::Error,
    },

    #[error("Frame on line {line} goes back in time ({timestamp_ns} < {previous_ns})")]
    OutOfOrder {
        line: usize,
        timestamp_ns: TimestampNs,
        previous_ns: TimestampNs,
    },
}

/// A parsed recording.
#[derive(Debug, Clone, PartialEq)]
pub struct Recording {
    pub header: Option<RecordingHeader>,
    pub frames: Vec<FrameRecord>,
}

impl Recording {
    /// Parse a JSONL recording, checking that timestamps never decrease.
    ///
    /// Repeated timestamps are allowed: they model a video element that has
    /// not advanced between two reads.
    pub fn from_jsonl(content: &str) -> Result<Self, RecordingError> {
        let mut header = None;
        let mut frames: Vec<FrameRecord> = Vec::new();

        for (idx, raw) in content.lines().enumerate() {
            let line = idx + 1;
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                continue;
            }
            if let Some(comment) = trimmed.strip_prefix('#') {
                // Only the first comment may carry the header; others are notes.
                if header.is_none() && frames.is_empty() {
                    header = serde_json::from_str(comment.trim()).ok();
                }
                continue;
            }

            let frame: FrameRecord = serde_json::from_str(trimmed)
                .map_err(|source| RecordingError::Parse { line, source })?;
            if let Some(previous) = frames.last() {
                if frame.timestamp_ns < previous.timestamp_ns {
                    return Err(RecordingError::OutOfOrder {
                        line,
                        timestamp_ns: frame.timestamp_ns,
                        previous_ns: previous.timestamp_ns,
                    });
                }
            }
            frames.push(frame);
        }

        Ok(Self { header, frames })
    }

    /// Number of distinct frame timestamps.
    pub fn distinct_frames(&self) -> usize {
        let mut count = 0;
        let mut last = None;
        for frame in &self.frames {
            if last != Some(frame.timestamp_ns) {
                count += 1;
                last = Some(frame.timestamp_ns);
            }
        }
        count
    }

    /// Timestamp of the last frame, if any.
    pub fn duration_ns(&self) -> TimestampNs {
        self.frames.last().map(|f| f.timestamp_ns).unwrap_or(0)
    }
}

/// Parse frames from JSONL content (one JSON object per line).
pub fn parse_frames(jsonl: &str) -> Result<Vec<FrameRecord>, serde_json::Error> {
    jsonl
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(serde_json::from_str)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
# {"schema_version":"1.0","fps":30,"source":"unit-test"}
{"t":0,"hand":null}
{"t":33333333,"hand":[{"x":0.5,"y":0.5},{"x":0.4,"y":0.6,"z":-0.01}]}
{"t":33333333,"hand":null}
{"t":66666666,"hand":null}
"#;

    #[test]
    fn test_parse_with_header() {
        let recording = Recording::from_jsonl(SAMPLE).unwrap();
        let header = recording.header.as_ref().unwrap();
        assert_eq!(header.fps, 30);
        assert_eq!(header.source.as_deref(), Some("unit-test"));
        assert_eq!(recording.frames.len(), 4);
        assert_eq!(recording.distinct_frames(), 3);
        assert_eq!(recording.duration_ns(), 66_666_666);

        let hand = recording.frames[1].hand.as_ref().unwrap();
        assert_eq!(hand.len(), 2);
        assert!((hand.get(1).unwrap().z + 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_out_of_order() {
        let content = "{\"t\":10,\"hand\":null}\n{\"t\":5,\"hand\":null}\n";
        let err = Recording::from_jsonl(content).unwrap_err();
        assert!(matches!(err, RecordingError::OutOfOrder { line: 2, .. }));
    }

    #[test]
    fn test_reports_bad_line_number() {
        let content = "{\"t\":10,\"hand\":null}\nnot json\n";
        let err = Recording::from_jsonl(content).unwrap_err();
        assert!(matches!(err, RecordingError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_rejects_empty_hand_array() {
        let content = "{\"t\":10,\"hand\":[]}\n";
        assert!(Recording::from_jsonl(content).is_err());
    }

    #[test]
    fn test_parse_frames_skips_comments() {
        let frames = parse_frames(SAMPLE).unwrap();
        assert_eq!(frames.len(), 4);
        assert!((frames[1].timestamp_secs() - 0.0333).abs() < 1e-3);
    }
}
