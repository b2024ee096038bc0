// SPDX-License-Identifier: MPL-2.0
//! This module handles the crop editor configuration, including loading and
//! saving user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! The configuration is organized into logical sections:
//! - `[crop]` - Minimum crop size and default aspect ratio
//! - `[layout]` - Toolbar placement and reserved margins
//! - `[settle]` - Post-drag settle delays
//!
//! # Path Resolution
//!
//! The config file location can be customized for testing or portable deployments:
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Pass an override directory to `load_with_override()`/`save_with_override()`
//! 3. Set `LENS_CROP_CONFIG_DIR` environment variable
//! 4. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use lens_crop::config;
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (mut config, _warning) = config::load();
//!
//! // Modify a setting
//! config.crop.aspect_ratio = Some("16:9".to_string());
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::domain::editing::AspectRatio;
use crate::editor::EditorSettings;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";

/// Application name used for directory naming.
const APP_NAME: &str = "LensCrop";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "LENS_CROP_CONFIG_DIR";

// =============================================================================
// Enums (shared between sections)
// =============================================================================

/// Where the editing toolbar sits inside the viewport.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ToolbarPosition {
    #[default]
    Bottom,
    Left,
    None,
}

// =============================================================================
// Section Structs
// =============================================================================

/// Crop box settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CropConfig {
    /// Smallest crop width/height in viewport points.
    #[serde(
        default = "default_min_crop_length",
        skip_serializing_if = "Option::is_none"
    )]
    pub min_crop_length: Option<f64>,

    /// Aspect ratio selected when a session starts (`freeform`, `square`, `16:9`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<String>,
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            min_crop_length: default_min_crop_length(),
            aspect_ratio: None,
        }
    }
}

/// Layout settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LayoutConfig {
    /// Toolbar placement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toolbar_position: Option<ToolbarPosition>,

    /// Toolbar thickness in viewport points.
    #[serde(
        default = "default_toolbar_thickness",
        skip_serializing_if = "Option::is_none"
    )]
    pub toolbar_thickness: Option<f64>,

    /// Margin kept around the crop area in viewport points.
    #[serde(
        default = "default_content_margin",
        skip_serializing_if = "Option::is_none"
    )]
    pub content_margin: Option<f64>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            toolbar_position: Some(ToolbarPosition::default()),
            toolbar_thickness: default_toolbar_thickness(),
            content_margin: default_content_margin(),
        }
    }
}

/// Settle sequence settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SettleConfig {
    /// Delay before revealing the dimming effect (milliseconds).
    #[serde(
        default = "default_reveal_delay_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub reveal_delay_ms: Option<u64>,

    /// Further delay before finalizing zoom/offset (milliseconds).
    #[serde(
        default = "default_finalize_delay_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub finalize_delay_ms: Option<u64>,
}

impl Default for SettleConfig {
    fn default() -> Self {
        Self {
            reveal_delay_ms: default_reveal_delay_ms(),
            finalize_delay_ms: default_finalize_delay_ms(),
        }
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Editor configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub crop: CropConfig,

    #[serde(default)]
    pub layout: LayoutConfig,

    #[serde(default)]
    pub settle: SettleConfig,
}

impl Config {
    /// Converts the persisted preferences into runtime editor settings.
    ///
    /// Out-of-range values are clamped and an unparsable aspect ratio falls
    /// back to freeform, so a hand-edited file can never break a session.
    #[must_use]
    pub fn editor_settings(&self) -> EditorSettings {
        let min_crop_length = self
            .crop
            .min_crop_length
            .filter(|v| v.is_finite())
            .unwrap_or(MIN_CROP_LENGTH)
            .clamp(MIN_CROP_LENGTH_LOWER_BOUND, MIN_CROP_LENGTH_UPPER_BOUND);

        let aspect_ratio = match self.crop.aspect_ratio.as_deref() {
            Some(raw) => raw.parse::<AspectRatio>().unwrap_or_else(|err| {
                tracing::warn!(%err, "ignoring configured aspect ratio");
                AspectRatio::Freeform
            }),
            None => AspectRatio::Freeform,
        };

        let non_negative = |value: Option<f64>, default: f64| {
            value.filter(|v| v.is_finite()).unwrap_or(default).max(0.0)
        };

        let delay = |value: Option<u64>, default: u64| {
            Duration::from_millis(value.unwrap_or(default).min(MAX_SETTLE_DELAY_MS))
        };

        EditorSettings {
            min_crop_length,
            aspect_ratio,
            toolbar_position: self.layout.toolbar_position.unwrap_or_default(),
            toolbar_thickness: non_negative(self.layout.toolbar_thickness, TOOLBAR_THICKNESS),
            content_margin: non_negative(self.layout.content_margin, CONTENT_MARGIN),
            reveal_delay: delay(self.settle.reveal_delay_ms, SETTLE_REVEAL_DELAY_MS),
            finalize_delay: delay(self.settle.finalize_delay_ms, SETTLE_FINALIZE_DELAY_MS),
        }
    }
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_min_crop_length() -> Option<f64> {
    Some(MIN_CROP_LENGTH)
}

fn default_toolbar_thickness() -> Option<f64> {
    Some(TOOLBAR_THICKNESS)
}

fn default_content_margin() -> Option<f64> {
    Some(CONTENT_MARGIN)
}

fn default_reveal_delay_ms() -> Option<u64> {
    Some(SETTLE_REVEAL_DELAY_MS)
}

fn default_finalize_delay_ms() -> Option<u64> {
    Some(SETTLE_FINALIZE_DELAY_MS)
}

// =============================================================================
// Config Path Resolution
// =============================================================================

/// Returns the config directory: explicit override, then env var, then platform default.
fn get_config_dir_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    if base_dir.is_some() {
        return base_dir;
    }
    if let Some(dir) = std::env::var_os(ENV_CONFIG_DIR) {
        return Some(PathBuf::from(dir));
    }
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}

/// Returns the config file path with an optional override.
fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    get_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning message explaining what went wrong.
#[must_use]
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
#[must_use]
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    tracing::warn!(
                        path = %path.display(),
                        %err,
                        "failed to load config, using defaults"
                    );
                    return (
                        Config::default(),
                        Some(format!("could not read {}: {err}", path.display())),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::editing::Fraction;
    use crate::error::Error;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let config = Config {
            crop: CropConfig {
                min_crop_length: Some(80.0),
                aspect_ratio: Some("4:3".to_string()),
            },
            layout: LayoutConfig {
                toolbar_position: Some(ToolbarPosition::Left),
                toolbar_thickness: Some(44.0),
                content_margin: Some(8.0),
            },
            settle: SettleConfig {
                reveal_delay_ms: Some(100),
                finalize_delay_ms: Some(200),
            },
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_invalid_toml_errors() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        let result = load_from_path(&config_path);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn load_with_override_reports_warning_for_broken_file() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join(CONFIG_FILE), "[crop\nbroken").expect("write");

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert!(warning.is_some());
    }

    #[test]
    fn load_with_override_missing_file_is_silent_default() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert!(warning.is_none());
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config: Config = toml::from_str("[crop]\naspect_ratio = \"square\"\n").expect("parse");
        assert_eq!(config.layout, LayoutConfig::default());
        assert_eq!(config.settle, SettleConfig::default());
        assert_eq!(config.crop.min_crop_length, Some(MIN_CROP_LENGTH));
    }

    #[test]
    fn save_to_path_creates_parent_directories() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("deep").join("path").join("settings.toml");

        save_to_path(&Config::default(), &config_path).expect("save should create directories");
        assert!(config_path.exists());
    }

    #[test]
    fn editor_settings_use_defaults() {
        let settings = Config::default().editor_settings();
        assert_eq!(settings.min_crop_length, MIN_CROP_LENGTH);
        assert_eq!(settings.aspect_ratio, AspectRatio::Freeform);
        assert_eq!(settings.toolbar_position, ToolbarPosition::Bottom);
        assert_eq!(settings.reveal_delay, Duration::from_millis(SETTLE_REVEAL_DELAY_MS));
    }

    #[test]
    fn editor_settings_clamp_out_of_range_values() {
        let config = Config {
            crop: CropConfig {
                min_crop_length: Some(10_000.0),
                aspect_ratio: Some("16:9".to_string()),
            },
            layout: LayoutConfig {
                toolbar_position: Some(ToolbarPosition::None),
                toolbar_thickness: Some(-5.0),
                content_margin: Some(f64::NAN),
            },
            settle: SettleConfig {
                reveal_delay_ms: Some(u64::MAX),
                finalize_delay_ms: None,
            },
        };
        let settings = config.editor_settings();
        assert_eq!(settings.min_crop_length, MIN_CROP_LENGTH_UPPER_BOUND);
        assert_eq!(
            settings.aspect_ratio,
            AspectRatio::Landscape(Fraction::R9x16)
        );
        assert_eq!(settings.toolbar_thickness, 0.0);
        assert_eq!(settings.content_margin, CONTENT_MARGIN);
        assert_eq!(settings.reveal_delay, Duration::from_millis(MAX_SETTLE_DELAY_MS));
        assert_eq!(
            settings.finalize_delay,
            Duration::from_millis(SETTLE_FINALIZE_DELAY_MS)
        );
    }

    #[test]
    fn editor_settings_ignore_bad_aspect_ratio() {
        let config = Config {
            crop: CropConfig {
                min_crop_length: None,
                aspect_ratio: Some("banana".to_string()),
            },
            ..Config::default()
        };
        assert_eq!(config.editor_settings().aspect_ratio, AspectRatio::Freeform);
    }
}
