//! Runner settings, loaded from `lint-runner.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default linter executable name.
pub const DEFAULT_TOOL: &str = "swiftlint";

/// Default configuration file name searched by the locator.
pub const DEFAULT_CONFIG_FILE: &str = ".swiftlint.yml";

/// Top-level runner settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunnerConfig {
    /// Executable name, resolved on `PATH` by the caller.
    #[serde(default = "default_tool")]
    pub tool: String,

    /// Recognized configuration file name.
    #[serde(default = "default_config_file")]
    pub config_file: String,

    /// Source file extensions collected per target (without the dot).
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Ambient variables forwarded into the tool's environment.
    #[serde(default)]
    pub pass_env: Vec<String>,

    /// Names of the disable / CI variables.
    #[serde(default)]
    pub env: EnvNames,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            tool: default_tool(),
            config_file: default_config_file(),
            extensions: default_extensions(),
            pass_env: Vec::new(),
            env: EnvNames::default(),
        }
    }
}

impl RunnerConfig {
    /// Creates the default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses settings from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or a field is out of range.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.tool.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "tool",
                message: "must not be empty".to_string(),
            });
        }
        if self.config_file.is_empty() || self.config_file.contains(['/', '\\']) {
            return Err(ConfigError::Invalid {
                field: "config_file",
                message: format!("must be a bare file name, got {:?}", self.config_file),
            });
        }
        if self.extensions.is_empty() {
            return Err(ConfigError::Invalid {
                field: "extensions",
                message: "must list at least one extension".to_string(),
            });
        }
        Ok(())
    }

    /// Returns `true` if `path` has one of the configured extensions.
    #[must_use]
    pub fn matches_extension(&self, path: &std::path::Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| {
                self.extensions
                    .iter()
                    .any(|want| want.trim_start_matches('.') == ext)
            })
    }
}

/// Variable names consulted by the caller for the run switches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnvNames {
    /// Truthy value disables linting.
    #[serde(default = "default_disable_var")]
    pub disable: String,
    /// Truthy value marks a CI context.
    #[serde(default = "default_ci_var")]
    pub ci: String,
}

impl Default for EnvNames {
    fn default() -> Self {
        Self {
            disable: default_disable_var(),
            ci: default_ci_var(),
        }
    }
}

fn default_tool() -> String {
    DEFAULT_TOOL.to_string()
}

fn default_config_file() -> String {
    DEFAULT_CONFIG_FILE.to_string()
}

fn default_extensions() -> Vec<String> {
    vec!["swift".to_string()]
}

fn default_disable_var() -> String {
    "DISABLE_SWIFTLINT".to_string()
}

fn default_ci_var() -> String {
    "isCI".to_string()
}

/// Settings errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading the settings file.
    #[error("Failed to read settings file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in the settings file.
    #[error("Failed to parse settings: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// A field holds an unusable value.
    #[error("Invalid settings field `{field}`: {message}")]
    Invalid {
        /// Offending field.
        field: &'static str,
        /// What is wrong with it.
        message: String,
    },
}
