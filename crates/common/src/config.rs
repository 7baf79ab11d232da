//! Application configuration.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_3};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{HandOrbitError, HandOrbitResult};

/// Global application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Gesture-to-camera tuning.
    pub control: ControlConfig,

    /// Frame polling settings.
    pub sync: SyncConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Tuning constants for the smoothing controller.
///
/// The smoothing factors are applied once per tick and are not normalized
/// by frame time, so they assume the tick rate in [`SyncConfig`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlConfig {
    /// Radians of azimuth reached at a full-frame horizontal excursion.
    pub azimuth_gain: f64,

    /// Radians of polar deflection reached at a full-frame vertical excursion.
    pub polar_gain: f64,

    /// Per-tick smoothing factor for azimuth and polar angle.
    pub rotation_smoothing: f64,

    /// Per-tick smoothing factor for zoom radius.
    pub zoom_smoothing: f64,

    /// Margin kept between the reported polar angle and the poles.
    pub polar_epsilon: f64,

    /// Pinch distance (normalized) mapped to `zoom_near`.
    pub pinch_min: f64,

    /// Pinch distance (normalized) mapped to `zoom_far`.
    pub pinch_max: f64,

    /// Orbit radius for a closed pinch.
    pub zoom_near: f64,

    /// Orbit radius for an open pinch.
    pub zoom_far: f64,

    pub initial_azimuth: f64,
    pub initial_polar: f64,
    pub initial_radius: f64,
}

/// Frame polling settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Display refresh rate the poll loop ticks at (Hz).
    pub tick_rate_hz: u32,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "handorbit=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            azimuth_gain: 3.0,
            polar_gain: 1.5,
            rotation_smoothing: 0.05,
            zoom_smoothing: 0.1,
            polar_epsilon: 0.1,
            pinch_min: 0.02,
            pinch_max: 0.15,
            zoom_near: 3.0,
            zoom_far: 11.0,
            initial_azimuth: 0.0,
            initial_polar: FRAC_PI_3,
            initial_radius: 5.0,
        }
    }
}

impl ControlConfig {
    /// Smallest orbit radius the controller may produce.
    pub fn min_radius(&self) -> f64 {
        self.zoom_near.min(self.zoom_far)
    }

    /// Largest orbit radius the controller may produce.
    pub fn max_radius(&self) -> f64 {
        self.zoom_near.max(self.zoom_far)
    }

    /// Check that the tuning values describe a usable controller.
    pub fn validate(&self) -> HandOrbitResult<()> {
        let values = [
            ("azimuth_gain", self.azimuth_gain),
            ("polar_gain", self.polar_gain),
            ("rotation_smoothing", self.rotation_smoothing),
            ("zoom_smoothing", self.zoom_smoothing),
            ("polar_epsilon", self.polar_epsilon),
            ("pinch_min", self.pinch_min),
            ("pinch_max", self.pinch_max),
            ("zoom_near", self.zoom_near),
            ("zoom_far", self.zoom_far),
            ("initial_azimuth", self.initial_azimuth),
            ("initial_polar", self.initial_polar),
            ("initial_radius", self.initial_radius),
        ];
        if let Some((name, _)) = values.iter().find(|(_, v)| !v.is_finite()) {
            return Err(HandOrbitError::config(format!("{name} must be finite")));
        }

        for (name, factor) in [
            ("rotation_smoothing", self.rotation_smoothing),
            ("zoom_smoothing", self.zoom_smoothing),
        ] {
            if factor <= 0.0 || factor > 1.0 {
                return Err(HandOrbitError::config(format!(
                    "{name} must be in (0, 1], got {factor}"
                )));
            }
        }

        if !(0.0..FRAC_PI_2).contains(&self.polar_epsilon) {
            return Err(HandOrbitError::config(format!(
                "polar_epsilon must be in [0, pi/2), got {}",
                self.polar_epsilon
            )));
        }

        if self.pinch_max <= self.pinch_min {
            // Held at runtime: zoom simply never changes.
            tracing::warn!(
                pinch_min = self.pinch_min,
                pinch_max = self.pinch_max,
                "Degenerate pinch range, pinch zoom is disabled"
            );
        }

        Ok(())
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self { tick_rate_hz: 60 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match Self::load_from(&config_path) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!("Failed to load config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Load and validate config from an explicit path.
    pub fn load_from(path: impl AsRef<Path>) -> HandOrbitResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(HandOrbitError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to the standard location.
    pub fn save(&self) -> HandOrbitResult<PathBuf> {
        let config_path = config_file_path();
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    /// Save config to an explicit path.
    pub fn save_to(&self, path: impl AsRef<Path>) -> HandOrbitResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn validate(&self) -> HandOrbitResult<()> {
        self.control.validate()?;
        if self.sync.tick_rate_hz == 0 {
            return Err(HandOrbitError::config("tick_rate_hz must be positive"));
        }
        Ok(())
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("handorbit").join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.sync.tick_rate_hz, 60);
        assert!((config.control.rotation_smoothing - 0.05).abs() < 1e-12);
        assert_eq!(config.control.min_radius(), 3.0);
        assert_eq!(config.control.max_radius(), 11.0);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let json = r#"{ "control": { "azimuth_gain": 2.0 }, "sync": { "tick_rate_hz": 120 } }"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.control.azimuth_gain, 2.0);
        assert_eq!(config.control.polar_gain, 1.5);
        assert_eq!(config.sync.tick_rate_hz, 120);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_rejects_bad_smoothing_factor() {
        let mut config = AppConfig::default();
        config.control.rotation_smoothing = 0.0;
        assert!(config.validate().is_err());

        config.control.rotation_smoothing = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_non_finite_and_zero_rate() {
        let mut config = AppConfig::default();
        config.control.zoom_far = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.sync.tick_rate_hz = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_degenerate_pinch_range_is_accepted() {
        let mut config = AppConfig::default();
        config.control.pinch_max = config.control.pinch_min;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = std::env::temp_dir().join("handorbit_test_config");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("config.json");

        let mut config = AppConfig::default();
        config.control.zoom_far = 20.0;
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_from_missing_path() {
        let err = AppConfig::load_from("/nonexistent/handorbit/config.json").unwrap_err();
        assert!(matches!(err, HandOrbitError::FileNotFound { .. }));
    }
}
