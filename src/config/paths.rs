// SPDX-License-Identifier: MPL-2.0
//! Config directory resolution.
//!
//! Paths are resolved in the following priority order:
//! 1. **Explicit override** - parameter to `_with_override()` functions (for tests)
//! 2. **Environment variable** (`COMPARE_LENS_CONFIG_DIR`)
//! 3. **Platform default** - via `dirs` crate

use std::path::PathBuf;

/// Application name used for directory naming.
const APP_NAME: &str = "CompareLens";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "COMPARE_LENS_CONFIG_DIR";

/// Returns the application config directory path.
///
/// Platform defaults:
/// - Linux: `~/.config/CompareLens/`
/// - macOS: `~/Library/Application Support/CompareLens/`
/// - Windows: `C:\Users\<User>\AppData\Roaming\CompareLens\`
///
/// Returns `None` if the config directory cannot be determined.
pub fn get_app_config_dir() -> Option<PathBuf> {
    get_app_config_dir_with_override(None)
}

/// Returns the application config directory with an optional override.
///
/// An empty environment variable is treated as unset.
pub fn get_app_config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path);
    }

    if let Some(path) = env_config_dir() {
        return Some(path);
    }

    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}

fn env_config_dir() -> Option<PathBuf> {
    std::env::var_os(ENV_CONFIG_DIR)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}
