//! Game settings
//!
//! Loaded from a JSON file by the native binary; every field has a default so
//! partial files work.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Largest accepted star streaming radius (in chunks)
pub const MAX_RENDER_DISTANCE: i32 = 16;
/// Largest accepted planet count
pub const MAX_PLANETS: usize = 64;

/// Errors from loading or validating settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    Medium,
    #[default]
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Stars generated per chunk for this preset
    pub fn stars_per_chunk(&self) -> usize {
        match self {
            QualityPreset::Low => 50,
            QualityPreset::Medium => 100,
            QualityPreset::High => STARS_PER_CHUNK,
        }
    }
}

/// Game settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seed for planet placement and gameplay randomness
    pub seed: u64,
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Explicit star density, overrides the preset
    pub stars_per_chunk: Option<usize>,

    // === World ===
    pub num_planets: usize,
    /// Edge length of a star chunk cube
    pub chunk_size: f32,
    /// Chebyshev radius (in chunks) kept resident around the camera
    pub render_distance: i32,

    // === Screen ===
    pub screen_width: f32,
    pub screen_height: f32,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0,
            quality: QualityPreset::default(),
            stars_per_chunk: None,

            num_planets: NUM_PLANETS,
            chunk_size: CHUNK_SIZE,
            render_distance: RENDER_DISTANCE,

            screen_width: VIRTUAL_WIDTH,
            screen_height: VIRTUAL_HEIGHT,

            show_fps: true,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Effective star density (respects the explicit override)
    pub fn stars_per_chunk(&self) -> usize {
        self.stars_per_chunk.unwrap_or_else(|| self.quality.stars_per_chunk())
    }

    /// Screen center used as the aim origin
    pub fn screen_center(&self) -> Vec2 {
        Vec2::new(self.screen_width / 2.0, self.screen_height / 2.0)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !self.chunk_size.is_finite() || self.chunk_size <= 0.0 {
            return Err(SettingsError::Invalid(format!(
                "chunk_size must be positive, got {}",
                self.chunk_size
            )));
        }
        if !(0..=MAX_RENDER_DISTANCE).contains(&self.render_distance) {
            return Err(SettingsError::Invalid(format!(
                "render_distance must be within 0..={}, got {}",
                MAX_RENDER_DISTANCE, self.render_distance
            )));
        }
        if self.num_planets > MAX_PLANETS {
            return Err(SettingsError::Invalid(format!(
                "num_planets must be at most {}, got {}",
                MAX_PLANETS, self.num_planets
            )));
        }
        if !(self.screen_width > 0.0 && self.screen_height > 0.0) {
            return Err(SettingsError::Invalid(format!(
                "screen size must be positive, got {}x{}",
                self.screen_width, self.screen_height
            )));
        }
        Ok(())
    }

    /// Parse and validate settings from JSON text
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{}; using default settings", e);
                Self::default()
            }
        }
    }

    /// Save settings to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("Saved settings to {}", path.as_ref().display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.stars_per_chunk(), STARS_PER_CHUNK);
        assert_eq!(settings.screen_center(), Vec2::new(512.0, 384.0));
    }

    #[test]
    fn test_preset_density_and_override() {
        let mut settings = Settings::from_preset(QualityPreset::Low);
        assert_eq!(settings.stars_per_chunk(), 50);
        settings.stars_per_chunk = Some(7);
        assert_eq!(settings.stars_per_chunk(), 7);
    }

    #[test]
    fn test_preset_parse() {
        assert_eq!(QualityPreset::parse("MED"), Some(QualityPreset::Medium));
        assert_eq!(QualityPreset::parse("ultra"), None);
        assert_eq!(QualityPreset::High.as_str(), "High");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 7, "num_planets": 3 }"#).unwrap();
        assert_eq!(settings.seed, 7);
        assert_eq!(settings.num_planets, 3);
        assert_eq!(settings.chunk_size, CHUNK_SIZE);
        assert_eq!(settings.quality, QualityPreset::High);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = Settings::from_json(r#"{ "chunk_size": 0.0 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));

        let err = Settings::from_json(r#"{ "render_distance": 40 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));

        let err = Settings::from_json(r#"{ "num_planets": 500 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = Settings::from_json("{ seed: ").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_save_load_file() {
        let path = std::env::temp_dir()
            .join(format!("ring_raider_settings_{}.json", std::process::id()));
        let settings = Settings {
            seed: 99,
            quality: QualityPreset::Medium,
            ..Settings::default()
        };
        settings.save(&path).unwrap();

        let loaded = Settings::load(&path).unwrap();
        assert_eq!(loaded.seed, 99);
        assert_eq!(loaded.quality, QualityPreset::Medium);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let settings = Settings::load_or_default("/nonexistent/ring_raider.json");
        assert_eq!(settings.seed, Settings::default().seed);
    }
}
