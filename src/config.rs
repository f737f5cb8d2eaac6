//! JSON configuration for the raincloud binary.
//!
//! The file carries the drop [`Settings`] at top level plus optional
//! window and scene options:
//!
//! ```json
//! {
//!     "min_drops": 100, "max_drops": 200,
//!     "min_speed": 200.0, "max_speed": 400.0,
//!     "min_angle": -10.0, "max_angle": 10.0,
//!     "min_length": 10.0, "max_length": 20.0,
//!     "drop_color": [120, 160, 255],
//!     "background_color": [25, 25, 40],
//!     "window": { "title": "Rain Clouds", "width": 800, "height": 600 },
//!     "rain_field": true
//! }
//! ```

use crate::error::ConfigError;
use crate::settings::Settings;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn default_title() -> String {
    "Rain Clouds".into()
}

fn default_width() -> u32 {
    800
}

fn default_height() -> u32 {
    600
}

fn default_fps() -> u32 {
    60
}

/// Window options.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WindowConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    /// Frame rate cap in Hz.
    #[serde(default = "default_fps")]
    pub target_fps: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            width: default_width(),
            height: default_height(),
            target_fps: default_fps(),
        }
    }
}

/// Complete application configuration.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct AppConfig {
    #[serde(flatten)]
    pub settings: Settings,
    #[serde(default)]
    pub window: WindowConfig,
    /// Fill the window with looping background rain.
    #[serde(default)]
    pub rain_field: bool,
}

impl AppConfig {
    /// Parse and validate a configuration from JSON text.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = serde_json::from_str(json)?;
        config.settings.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Save the configuration to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{
        "min_drops": 50, "max_drops": 80,
        "min_speed": 100.0, "max_speed": 300.0,
        "min_angle": -5.0, "max_angle": 5.0,
        "min_length": 5.0, "max_length": 15.0,
        "drop_color": [0, 0, 255],
        "background_color": [0, 0, 0]
    }"#;

    #[test]
    fn test_minimal_config_uses_window_defaults() {
        let config = AppConfig::from_json(MINIMAL).unwrap();
        assert_eq!(config.settings.min_drops, 50);
        assert_eq!(config.settings.drop_color.0, [0, 0, 255]);
        assert_eq!(config.window, WindowConfig::default());
        assert!(!config.rain_field);
    }

    #[test]
    fn test_inverted_angle_is_rejected() {
        let json = MINIMAL.replace("\"min_angle\": -5.0", "\"min_angle\": 45.0");
        let err = AppConfig::from_json(&json).unwrap_err();
        assert!(matches!(err, ConfigError::InvertedRange { field: "angle", .. }));
    }

    #[test]
    fn test_overflowing_speed_is_rejected() {
        let json = MINIMAL
            .replace("\"min_speed\": 100.0", "\"min_speed\": 1e39")
            .replace("\"max_speed\": 300.0", "\"max_speed\": 1e39");
        assert!(AppConfig::from_json(&json).is_err());
    }

    #[test]
    fn test_save_then_load() {
        let mut config = AppConfig::from_json(MINIMAL).unwrap();
        config.window.title = "Storm".into();
        config.rain_field = true;

        let name = format!("raincloud-config-{}.json", std::process::id());
        let path = std::env::temp_dir().join(name);
        config.save(&path).unwrap();
        let loaded = AppConfig::load(&path);
        let _ = fs::remove_file(&path);

        assert_eq!(loaded.unwrap(), config);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let path = std::env::temp_dir().join("raincloud-config-does-not-exist.json");
        assert!(matches!(AppConfig::load(path), Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_missing_field_is_parse_error() {
        let err = AppConfig::from_json(r#"{ "min_drops": 1 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_window_section_overrides() {
        let json = MINIMAL.replace(
            "\"background_color\": [0, 0, 0]",
            r#""background_color": [0, 0, 0], "window": { "width": 1024 }, "rain_field": true"#,
        );
        let config = AppConfig::from_json(&json).unwrap();
        assert_eq!(config.window.width, 1024);
        assert_eq!(config.window.height, 600);
        assert!(config.rain_field);
    }
}
