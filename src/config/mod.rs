// SPDX-License-Identifier: MPL-2.0
//! User settings stored in `settings.toml`.
//!
//! | Section     | Keys                                              |
//! |-------------|---------------------------------------------------|
//! | `[general]` | `language`, `theme_mode`                          |
//! | `[api]`     | `endpoint`, `access_key`, `per_page`, `timeout_secs` |
//! | `[search]`  | `trail_offset`, `cooldown_secs`                   |
//! | `[display]` | `thumbnail_size`, `image_cache_capacity`          |
//!
//! Every key is optional. Numeric values are clamped to the ranges in
//! [`defaults`] when read through the accessors on [`Config`]. The file
//! location is resolved by [`crate::app::paths`].
//!
//! ```no_run
//! use lumen_search::config;
//!
//! let (config, _warning) = config::load();
//! let offset = config.trail_offset();
//! assert!(offset >= 1);
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::error::{Error, Result};
use crate::search::api::{ApiSettings, DEFAULT_ENDPOINT};
use crate::search::session::SessionSettings;
use crate::ui::theming::ThemeMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// `[general]`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "ru").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Application theme mode (light, dark, or system).
    #[serde(
        default = "default_theme_mode",
        deserialize_with = "deserialize_theme_mode"
    )]
    pub theme_mode: ThemeMode,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            language: None,
            theme_mode: default_theme_mode(),
        }
    }
}

/// Remote search API settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    /// Search endpoint URL.
    #[serde(default = "default_endpoint", skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Unsplash access key (`client_id`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_key: Option<String>,

    /// Photos per page.
    #[serde(default = "default_per_page", skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs", skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            access_key: None,
            per_page: default_per_page(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Paging behavior.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchConfig {
    /// How many items before the end of the list the next page is requested.
    #[serde(default = "default_trail_offset", skip_serializing_if = "Option::is_none")]
    pub trail_offset: Option<usize>,

    /// Pause after the API reports an exhausted quota, in seconds.
    #[serde(default = "default_cooldown_secs", skip_serializing_if = "Option::is_none")]
    pub cooldown_secs: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            trail_offset: default_trail_offset(),
            cooldown_secs: default_cooldown_secs(),
        }
    }
}

/// Result grid settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplayConfig {
    /// Edge length of a result tile in logical pixels.
    #[serde(default = "default_thumbnail_size", skip_serializing_if = "Option::is_none")]
    pub thumbnail_size: Option<f32>,

    /// Number of decoded images kept in memory.
    #[serde(
        default = "default_image_cache_capacity",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_cache_capacity: Option<usize>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            thumbnail_size: default_thumbnail_size(),
            image_cache_capacity: default_image_cache_capacity(),
        }
    }
}

/// Contents of `settings.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub display: DisplayConfig,
}

impl Config {
    /// Page size clamped to what the API accepts.
    #[must_use]
    pub fn per_page(&self) -> u32 {
        self.api
            .per_page
            .unwrap_or(DEFAULT_PER_PAGE)
            .clamp(MIN_PER_PAGE, MAX_PER_PAGE)
    }

    #[must_use]
    pub fn cooldown(&self) -> Duration {
        let secs = self
            .search
            .cooldown_secs
            .unwrap_or(DEFAULT_COOLDOWN_SECS)
            .clamp(MIN_COOLDOWN_SECS, MAX_COOLDOWN_SECS);
        Duration::from_secs(secs)
    }

    #[must_use]
    pub fn trail_offset(&self) -> usize {
        self.search
            .trail_offset
            .unwrap_or(DEFAULT_TRAIL_OFFSET)
            .max(1)
    }

    #[must_use]
    pub fn thumbnail_size(&self) -> f32 {
        self.display
            .thumbnail_size
            .unwrap_or(DEFAULT_THUMBNAIL_SIZE)
            .clamp(MIN_THUMBNAIL_SIZE, MAX_THUMBNAIL_SIZE)
    }

    #[must_use]
    pub fn image_cache_capacity(&self) -> usize {
        self.display
            .image_cache_capacity
            .unwrap_or(DEFAULT_IMAGE_CACHE_CAPACITY)
            .max(MIN_IMAGE_CACHE_CAPACITY)
    }

    #[must_use]
    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            per_page: self.per_page(),
            cooldown: self.cooldown(),
        }
    }

    /// API settings, with the access key resolved by the caller.
    #[must_use]
    pub fn api_settings(&self, access_key: Option<String>) -> ApiSettings {
        let timeout = self
            .api
            .timeout_secs
            .unwrap_or(DEFAULT_API_TIMEOUT_SECS)
            .clamp(MIN_API_TIMEOUT_SECS, MAX_API_TIMEOUT_SECS);
        ApiSettings {
            endpoint: self
                .api
                .endpoint
                .clone()
                .filter(|endpoint| !endpoint.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            access_key,
            timeout: Duration::from_secs(timeout),
        }
    }
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_theme_mode() -> ThemeMode {
    ThemeMode::System
}

fn default_endpoint() -> Option<String> {
    Some(DEFAULT_ENDPOINT.to_string())
}

fn default_per_page() -> Option<u32> {
    Some(DEFAULT_PER_PAGE)
}

fn default_timeout_secs() -> Option<u64> {
    Some(DEFAULT_API_TIMEOUT_SECS)
}

fn default_trail_offset() -> Option<usize> {
    Some(DEFAULT_TRAIL_OFFSET)
}

fn default_cooldown_secs() -> Option<u64> {
    Some(DEFAULT_COOLDOWN_SECS)
}

fn default_thumbnail_size() -> Option<f32> {
    Some(DEFAULT_THUMBNAIL_SIZE)
}

fn default_image_cache_capacity() -> Option<usize> {
    Some(DEFAULT_IMAGE_CACHE_CAPACITY)
}

fn deserialize_theme_mode<'de, D>(deserializer: D) -> std::result::Result<ThemeMode, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    let raw = String::deserialize(deserializer)?;
    match raw.to_lowercase().as_str() {
        "light" => Ok(ThemeMode::Light),
        "dark" => Ok(ThemeMode::Dark),
        "system" => Ok(ThemeMode::System),
        other => Err(D::Error::custom(format!("invalid theme_mode: {}", other))),
    }
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with an i18n key explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = paths::settings_file(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "failed to load settings");
                    return (Config::default(), Some(err.i18n_key().to_string()));
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

/// Writes a default `settings.toml` when none exists yet, so users have a
/// file to put their access key in. Returns whether a file was written.
pub fn init_default_with_override(base_dir: Option<PathBuf>) -> Result<bool> {
    match paths::settings_file(base_dir) {
        Some(path) if !path.exists() => {
            save_to_path(&Config::default(), &path)?;
            tracing::info!(path = %path.display(), "wrote default settings");
            Ok(true)
        }
        _ => Ok(false),
    }
}

// =============================================================================
// Save Functions
// =============================================================================

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
    use crate::error::Error;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let config = Config {
            general: GeneralConfig {
                language: Some("ru".to_string()),
                theme_mode: ThemeMode::Light,
            },
            api: ApiConfig {
                endpoint: Some("https://proxy.example/search".to_string()),
                access_key: Some("secret".to_string()),
                per_page: Some(12),
                timeout_secs: Some(5),
            },
            search: SearchConfig {
                trail_offset: Some(6),
                cooldown_secs: Some(60),
            },
            display: DisplayConfig {
                thumbnail_size: Some(160.0),
                image_cache_capacity: Some(64),
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

        match load_from_path(&config_path) {
            Err(Error::Config(_)) => {}
            other => panic!("expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn default_config_has_expected_values() {
        let config = Config::default();
        assert_eq!(config.general.language, None);
        assert_eq!(config.general.theme_mode, ThemeMode::System);
        assert_eq!(config.per_page(), 30);
        assert_eq!(config.trail_offset(), 20);
        assert_eq!(config.cooldown(), Duration::from_secs(300));
        assert_eq!(config.api.access_key, None);
    }

    #[test]
    fn partial_file_fills_missing_sections_with_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "[api]\naccess_key = \"abc\"\n").expect("failed to write");

        let config = load_from_path(&config_path).expect("failed to load config");
        assert_eq!(config.api.access_key.as_deref(), Some("abc"));
        assert_eq!(config.api.per_page, Some(DEFAULT_PER_PAGE));
        assert_eq!(config.search, SearchConfig::default());
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let mut config = Config::default();
        config.api.per_page = Some(100);
        config.search.cooldown_secs = Some(0);
        config.search.trail_offset = Some(0);
        config.display.thumbnail_size = Some(10.0);
        config.display.image_cache_capacity = Some(1);

        assert_eq!(config.per_page(), MAX_PER_PAGE);
        assert_eq!(config.cooldown(), Duration::from_secs(MIN_COOLDOWN_SECS));
        assert_eq!(config.trail_offset(), 1);
        assert_eq!(config.thumbnail_size(), MIN_THUMBNAIL_SIZE);
        assert_eq!(config.image_cache_capacity(), MIN_IMAGE_CACHE_CAPACITY);
    }

    #[test]
    fn blank_endpoint_falls_back_to_unsplash() {
        let mut config = Config::default();
        config.api.endpoint = Some("  ".to_string());
        let settings = config.api_settings(Some("key".to_string()));
        assert_eq!(settings.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(settings.access_key.as_deref(), Some("key"));
    }

    #[test]
    fn invalid_theme_mode_is_rejected() {
        let result = toml::from_str::<Config>("[general]\ntheme_mode = \"sepia\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn load_with_override_from_empty_directory_returns_default() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert!(warning.is_none());
    }

    #[test]
    fn load_with_override_from_corrupted_file_returns_default_with_warning() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join(paths::SETTINGS_FILE), "[[[").expect("failed to write");

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert_eq!(warning.as_deref(), Some("notification-config-load-error"));
    }

    #[test]
    fn init_default_writes_once() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let base = Some(temp_dir.path().to_path_buf());

        assert!(init_default_with_override(base.clone()).expect("first init"));
        assert!(!init_default_with_override(base.clone()).expect("second init"));

        let (config, warning) = load_with_override(base);
        assert_eq!(config, Config::default());
        assert!(warning.is_none());
    }

    #[test]
    fn saved_file_is_found_by_load_with_override() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let base = Some(temp_dir.path().to_path_buf());
        let mut config = Config::default();
        config.general.theme_mode = ThemeMode::Dark;

        save_to_path(&config, &temp_dir.path().join(paths::SETTINGS_FILE))
            .expect("failed to save");
        let (loaded, warning) = load_with_override(base);
        assert_eq!(loaded.general.theme_mode, ThemeMode::Dark);
        assert!(warning.is_none());
    }
}
