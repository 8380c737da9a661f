// SPDX-License-Identifier: MPL-2.0
//! This module handles the library's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! The configuration is organized into logical sections:
//! - `[compare]` - Slider start position, slide mode, handle and autoplay
//! - `[retry]` - Linear backoff for failed drops and uploads
//! - `[diagnostics]` - Interaction monitor history and slow-operation threshold
//!
//! # Path Resolution
//!
//! The config file location can be customized for testing or portable deployments:
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Set `COMPARE_LENS_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use compare_lens::config::{self, Config};
//! use compare_lens::domain::ui::SlideMode;
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (mut config, _warning) = config::load();
//!
//! // Modify a setting
//! config.compare.slide_mode = SlideMode::Drag;
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;
pub mod paths;

pub use defaults::*;

use crate::compare::SliderConfig;
use crate::diagnostics::MonitorConfig;
use crate::domain::ui::{AutoplayDuration, SlideMode, SliderPercent};
use crate::error::{Error, Result};
use crate::retry::RetryPolicy;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

const CONFIG_FILE: &str = "settings.toml";

/// Warning key returned by [`load`] when the config file cannot be parsed.
pub const LOAD_ERROR_WARNING: &str = "notification-config-load-error";

// =============================================================================
// Section Structs
// =============================================================================

/// Comparison slider settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompareConfig {
    /// Split position on mount, in percent.
    #[serde(
        default = "default_initial_percent",
        skip_serializing_if = "Option::is_none"
    )]
    pub initial_percent: Option<f32>,

    /// How pointer input moves the split (`hover` or `drag`).
    #[serde(
        default,
        deserialize_with = "deserialize_slide_mode",
        serialize_with = "serialize_slide_mode"
    )]
    pub slide_mode: SlideMode,

    /// Whether a grab handle is drawn on the divider.
    #[serde(default = "default_true", skip_serializing_if = "Option::is_none")]
    pub show_handle: Option<bool>,

    /// Whether the split sweeps on its own while the pointer is away.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autoplay: Option<bool>,

    /// Half-period of the autoplay sweep, in milliseconds.
    #[serde(
        default = "default_autoplay_duration_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub autoplay_duration_ms: Option<u32>,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            initial_percent: default_initial_percent(),
            slide_mode: SlideMode::default(),
            show_handle: default_true(),
            autoplay: Some(false),
            autoplay_duration_ms: default_autoplay_duration_ms(),
        }
    }
}

/// Retry settings for failed drops and uploads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RetryConfig {
    #[serde(
        default = "default_retry_base_delay_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub base_delay_ms: Option<u64>,

    #[serde(
        default = "default_max_retries",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_retries: Option<u32>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            base_delay_ms: default_retry_base_delay_ms(),
            max_retries: default_max_retries(),
        }
    }
}

/// Interaction monitor settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiagnosticsConfig {
    /// Number of drag metrics and events kept in memory.
    #[serde(
        default = "default_history_size",
        skip_serializing_if = "Option::is_none"
    )]
    pub history_size: Option<usize>,

    /// Drag operations slower than this are logged as warnings.
    #[serde(
        default = "default_slow_operation_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub slow_operation_ms: Option<u64>,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            history_size: default_history_size(),
            slow_operation_ms: default_slow_operation_ms(),
        }
    }
}

// =============================================================================
// Main Config Struct
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub compare: CompareConfig,

    #[serde(default)]
    pub retry: RetryConfig,

    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
}

impl Config {
    /// Builds the slider configuration, clamping out-of-range values.
    #[must_use]
    pub fn slider_config(&self) -> SliderConfig {
        let compare = &self.compare;
        let initial_percent = compare.initial_percent.unwrap_or(DEFAULT_INITIAL_PERCENT);
        if !(0.0..=100.0).contains(&initial_percent) {
            warn!(initial_percent, "initial_percent out of range, clamping");
        }
        let autoplay_duration_ms = compare
            .autoplay_duration_ms
            .unwrap_or(DEFAULT_AUTOPLAY_DURATION_MS);
        if !(MIN_AUTOPLAY_DURATION_MS..=MAX_AUTOPLAY_DURATION_MS).contains(&autoplay_duration_ms) {
            warn!(autoplay_duration_ms, "autoplay_duration_ms out of range, clamping");
        }

        SliderConfig {
            initial_percent: SliderPercent::new(initial_percent),
            mode: compare.slide_mode,
            show_handle: compare.show_handle.unwrap_or(true),
            autoplay: compare.autoplay.unwrap_or(false),
            autoplay_duration: AutoplayDuration::new(autoplay_duration_ms),
        }
    }

    /// Builds the retry policy, clamping out-of-range values.
    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        let base_delay_ms = self
            .retry
            .base_delay_ms
            .filter(|ms| *ms > 0)
            .unwrap_or(DEFAULT_RETRY_BASE_DELAY_MS);
        let max_retries = self.retry.max_retries.unwrap_or(DEFAULT_MAX_RETRIES);
        if max_retries > MAX_MAX_RETRIES {
            warn!(max_retries, "max_retries too large, clamping");
        }
        RetryPolicy::new(
            Duration::from_millis(base_delay_ms),
            max_retries.min(MAX_MAX_RETRIES),
        )
    }

    /// Builds the interaction monitor settings, clamping out-of-range values.
    #[must_use]
    pub fn monitor_config(&self) -> MonitorConfig {
        let history_size = self
            .diagnostics
            .history_size
            .unwrap_or(DEFAULT_MONITOR_HISTORY);
        if !(MIN_MONITOR_HISTORY..=MAX_MONITOR_HISTORY).contains(&history_size) {
            warn!(history_size, "history_size out of range, clamping");
        }
        let slow_operation_ms = self
            .diagnostics
            .slow_operation_ms
            .unwrap_or(DEFAULT_SLOW_OPERATION_MS);

        MonitorConfig {
            history_size: history_size.clamp(MIN_MONITOR_HISTORY, MAX_MONITOR_HISTORY),
            slow_threshold: Duration::from_millis(slow_operation_ms),
        }
    }
}

// =============================================================================
// Default Value Functions (for serde)
// =============================================================================

#[allow(clippy::unnecessary_wraps)]
fn default_initial_percent() -> Option<f32> {
    Some(DEFAULT_INITIAL_PERCENT)
}

#[allow(clippy::unnecessary_wraps)]
fn default_true() -> Option<bool> {
    Some(true)
}

#[allow(clippy::unnecessary_wraps)]
fn default_autoplay_duration_ms() -> Option<u32> {
    Some(DEFAULT_AUTOPLAY_DURATION_MS)
}

#[allow(clippy::unnecessary_wraps)]
fn default_retry_base_delay_ms() -> Option<u64> {
    Some(DEFAULT_RETRY_BASE_DELAY_MS)
}

#[allow(clippy::unnecessary_wraps)]
fn default_max_retries() -> Option<u32> {
    Some(DEFAULT_MAX_RETRIES)
}

#[allow(clippy::unnecessary_wraps)]
fn default_history_size() -> Option<usize> {
    Some(DEFAULT_MONITOR_HISTORY)
}

#[allow(clippy::unnecessary_wraps)]
fn default_slow_operation_ms() -> Option<u64> {
    Some(DEFAULT_SLOW_OPERATION_MS)
}

fn deserialize_slide_mode<'de, D>(deserializer: D) -> std::result::Result<SlideMode, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let raw = String::deserialize(deserializer)?;
    raw.parse::<SlideMode>()
        .map_err(|_| D::Error::custom(format!("invalid slide_mode: {}", raw)))
}

fn serialize_slide_mode<S>(mode: &SlideMode, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(mode.as_str())
}

// =============================================================================
// Config Path Resolution
// =============================================================================

/// Returns the config file path with an optional override.
fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
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
/// default config with a warning key explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "falling back to default config");
                    return (Config::default(), Some(LOAD_ERROR_WARNING.to_string()));
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
    use crate::error::Error;
    use crate::test_utils::assert_abs_diff_eq;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let config = Config {
            compare: CompareConfig {
                initial_percent: Some(30.0),
                slide_mode: SlideMode::Drag,
                show_handle: Some(false),
                autoplay: Some(true),
                autoplay_duration_ms: Some(2500),
            },
            retry: RetryConfig {
                base_delay_ms: Some(250),
                max_retries: Some(5),
            },
            diagnostics: DiagnosticsConfig {
                history_size: Some(50),
                slow_operation_ms: Some(400),
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
            other => panic!("expected config error, got {:?}", other),
        }
    }

    #[test]
    fn load_with_override_falls_back_with_warning() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(
            temp_dir.path().join(CONFIG_FILE),
            "[compare]\nslide_mode = \"sideways\"\n",
        )
        .expect("failed to write config");

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));

        assert_eq!(config, Config::default());
        assert_eq!(warning.as_deref(), Some(LOAD_ERROR_WARNING));
    }

    #[test]
    fn load_with_override_missing_file_returns_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert!(warning.is_none());
    }

    #[test]
    fn partial_file_fills_missing_fields_with_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "[compare]\nslide_mode = \"Drag\"\n")
            .expect("failed to write config");

        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded.compare.slide_mode, SlideMode::Drag);
        assert_eq!(loaded.compare.initial_percent, Some(DEFAULT_INITIAL_PERCENT));
        assert_eq!(loaded.compare.show_handle, Some(true));
        assert_eq!(loaded.retry, RetryConfig::default());
        assert_eq!(loaded.diagnostics, DiagnosticsConfig::default());
    }

    #[test]
    fn save_with_override_writes_settings_file() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let base = temp_dir.path().join("deep").join("path");

        save_with_override(&Config::default(), Some(base.clone()))
            .expect("save should create directories");

        assert!(base.join(CONFIG_FILE).exists());
    }

    #[test]
    fn slider_config_clamps_out_of_range_values() {
        let mut config = Config::default();
        config.compare.initial_percent = Some(140.0);
        config.compare.autoplay_duration_ms = Some(5);

        let slider = config.slider_config();

        assert_abs_diff_eq!(slider.initial_percent.value(), 100.0);
        assert_eq!(slider.autoplay_duration.millis(), MIN_AUTOPLAY_DURATION_MS);
    }

    #[test]
    fn long_autoplay_duration_clamps_to_domain_max() {
        let mut config = Config::default();
        config.compare.autoplay_duration_ms = Some(u32::MAX);

        let slider = config.slider_config();

        assert_eq!(slider.autoplay_duration, AutoplayDuration::new(u32::MAX));
        assert_eq!(slider.autoplay_duration.millis(), MAX_AUTOPLAY_DURATION_MS);
    }

    #[test]
    fn default_config_maps_to_default_slider() {
        assert_eq!(Config::default().slider_config(), SliderConfig::default());
    }

    #[test]
    fn retry_policy_rejects_zero_delay_and_caps_retries() {
        let mut config = Config::default();
        config.retry.base_delay_ms = Some(0);
        config.retry.max_retries = Some(99);

        let policy = config.retry_policy();

        assert_eq!(
            policy.base_delay(),
            Duration::from_millis(DEFAULT_RETRY_BASE_DELAY_MS)
        );
        assert_eq!(policy.max_retries(), MAX_MAX_RETRIES);
    }

    #[test]
    fn monitor_config_clamps_history_size() {
        let mut config = Config::default();
        config.diagnostics.history_size = Some(1);
        assert_eq!(config.monitor_config().history_size, MIN_MONITOR_HISTORY);

        config.diagnostics.history_size = Some(usize::MAX);
        assert_eq!(config.monitor_config().history_size, MAX_MONITOR_HISTORY);
    }
}
