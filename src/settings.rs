//! Engine settings
//!
//! Loaded from a JSON file on native targets; every field has a default so a
//! partial file is enough.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::coords::{CoordinateFrame, ScreenPoint};
use crate::error::{Result, SettingsError, ensure_positive};

/// Surface and baseline mapping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameSettings {
    /// Surface width in pixels
    pub width: f64,
    /// Surface height in pixels
    pub height: f64,
    /// Baseline pixels per real unit
    pub scale: f64,
    /// Baseline origin; the surface centre when unset
    pub origin: Option<ScreenPoint>,
}

impl Default for FrameSettings {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            scale: DEFAULT_SCALE,
            origin: None,
        }
    }
}

/// Curve sampling defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingSettings {
    /// Pixels between samples for cartesian and inverted curves
    pub pixel_step: f64,
    /// Radians between polar samples
    pub polar_step: f64,
    /// Parameter units between parametric samples
    pub parametric_step: f64,
    /// Flagged neighbours closer than this many pixels stay connected
    pub continuity_tolerance: f64,
    /// Upper bound on samples per curve
    pub max_samples: usize,
}

impl Default for SamplingSettings {
    fn default() -> Self {
        Self {
            pixel_step: DEFAULT_PIXEL_STEP,
            polar_step: DEFAULT_POLAR_STEP,
            parametric_step: DEFAULT_PARAMETRIC_STEP,
            continuity_tolerance: DEFAULT_CONTINUITY_TOLERANCE,
            max_samples: MAX_SAMPLES,
        }
    }
}

/// Engine settings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub frame: FrameSettings,
    pub sampling: SamplingSettings,
}

impl Settings {
    /// Reject values the engine cannot work with
    pub fn validate(&self) -> Result<()> {
        ensure_positive("surface width", self.frame.width)?;
        ensure_positive("surface height", self.frame.height)?;
        ensure_positive("scale", self.frame.scale)?;
        ensure_positive("pixel step", self.sampling.pixel_step)?;
        ensure_positive("polar step", self.sampling.polar_step)?;
        ensure_positive("parametric step", self.sampling.parametric_step)?;
        let tolerance = self.sampling.continuity_tolerance;
        if tolerance.is_nan() || tolerance < 0.0 {
            return Err(crate::EngineError::InvalidParameter {
                name: "continuity tolerance",
                value: self.sampling.continuity_tolerance,
                reason: "must be zero or greater",
            });
        }
        if self.sampling.max_samples < 2 {
            return Err(crate::EngineError::InvalidParameter {
                name: "max samples",
                value: self.sampling.max_samples as f64,
                reason: "must be at least 2",
            });
        }
        Ok(())
    }

    /// Build the baseline frame these settings describe
    pub fn build_frame(&self) -> Result<CoordinateFrame> {
        let f = &self.frame;
        match f.origin {
            Some(origin) => CoordinateFrame::new(f.width, f.height, origin, f.scale),
            None => CoordinateFrame::centered(f.width, f.height, f.scale),
        }
    }

    /// Load and validate settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> std::result::Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&json)?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults on any failure
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!(
                    "Using default settings ({}: {})",
                    path.as_ref().display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> std::result::Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"frame":{"width":320.0},"sampling":{"pixel_step":2.0}}"#)
                .unwrap();
        assert_eq!(settings.frame.width, 320.0);
        assert_eq!(settings.frame.height, DEFAULT_HEIGHT);
        assert_eq!(settings.sampling.pixel_step, 2.0);
        assert_eq!(settings.sampling.polar_step, DEFAULT_POLAR_STEP);
    }

    #[test]
    fn test_validate_rejects_zero_step() {
        let mut settings = Settings::default();
        settings.sampling.polar_step = 0.0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_build_frame_centers_origin() {
        let frame = Settings::default().build_frame().unwrap();
        assert_eq!(
            frame.origin(),
            ScreenPoint::new(DEFAULT_WIDTH / 2.0, DEFAULT_HEIGHT / 2.0)
        );
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!(
            "graph_stage_settings_{}.json",
            std::process::id()
        ));
        let mut settings = Settings::default();
        settings.frame.scale = 25.0;
        settings.save(&path).unwrap();
        let loaded = Settings::load(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_load_missing_falls_back() {
        let settings = Settings::load_or_default("/nonexistent/graph_stage.json");
        assert_eq!(settings, Settings::default());
    }
}
