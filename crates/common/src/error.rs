//! Error types shared across HandOrbit crates.

use std::path::PathBuf;

/// Top-level error type for HandOrbit operations.
///
/// Only initialization failures are meant to reach the caller. Per-frame
/// anomalies (`Detection`) are absorbed by the frame synchronizer.
#[derive(Debug, thiserror::Error)]
pub enum HandOrbitError {
    #[error("Hand detector unavailable: {message}")]
    DetectorUnavailable { message: String },

    #[error("Detection failed: {message}")]
    Detection { message: String },

    #[error("Recording error: {message}")]
    Recording { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using HandOrbitError.
pub type HandOrbitResult<T> = Result<T, HandOrbitError>;

impl HandOrbitError {
    pub fn detector_unavailable(msg: impl Into<String>) -> Self {
        Self::DetectorUnavailable {
            message: msg.into(),
        }
    }

    pub fn detection(msg: impl Into<String>) -> Self {
        Self::Detection {
            message: msg.into(),
        }
    }

    pub fn recording(msg: impl Into<String>) -> Self {
        Self::Recording {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = HandOrbitError::detector_unavailable("model not loaded");
        assert_eq!(
            err.to_string(),
            "Hand detector unavailable: model not loaded"
        );

        let err = HandOrbitError::config("tick_rate_hz must be positive");
        assert!(err.to_string().starts_with("Configuration error"));
    }

    #[test]
    fn test_io_conversion() {
        fn read_missing() -> HandOrbitResult<String> {
            Ok(std::fs::read_to_string(
                "/definitely/not/a/handorbit/file.json",
            )?)
        }
        assert!(matches!(read_missing(), Err(HandOrbitError::Io(_))));
    }
}
