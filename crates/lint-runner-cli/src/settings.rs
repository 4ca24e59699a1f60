//! Finding and loading `lint-runner.toml`.
//!
//! Settings sit beside the linter configuration and are found the same way:
//! the nearest `lint-runner.toml` at or above the package directory. An
//! explicit `--settings` path skips the search; when neither exists the
//! built-in defaults apply.

use anyhow::{Context, Result};
use lint_runner_core::{ConfigLocator, ConfigReference, RunnerConfig};
use std::path::{Path, PathBuf};

/// Settings file name searched from the package directory upward.
pub const SETTINGS_FILE: &str = "lint-runner.toml";

/// Picks the settings file for `package_dir`, if there is one.
///
/// The explicit path is returned unchecked so a typo surfaces as a load
/// error instead of silently falling back to defaults.
#[must_use]
pub fn settings_path(package_dir: &Path, explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    match ConfigLocator::new(SETTINGS_FILE).locate(package_dir) {
        ConfigReference::Found(path) => Some(path),
        ConfigReference::NotFound => None,
    }
}

/// Loads the settings that apply to `package_dir`.
///
/// # Errors
///
/// Returns an error if the chosen file cannot be read or is invalid.
pub fn load(package_dir: &Path, explicit: Option<&Path>) -> Result<RunnerConfig> {
    let Some(path) = settings_path(package_dir, explicit) else {
        tracing::debug!("No {SETTINGS_FILE} above {}; using defaults", package_dir.display());
        return Ok(RunnerConfig::default());
    };
    tracing::debug!("Loading settings from {}", path.display());
    RunnerConfig::from_file(&path)
        .with_context(|| format!("Failed to load settings: {}", path.display()))
}
