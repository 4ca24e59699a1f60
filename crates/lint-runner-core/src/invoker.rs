//! Argument construction and tool execution.
//!
//! One call is one fresh invocation:
//! `NotStarted -> ArgumentsBuilt -> ProcessRunning -> {Succeeded | Failed | NotConfigured}`.
//! [`LintInvoker::plan`] covers the first transition and
//! [`LintInvoker::invoke`] the rest.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::process::{LintCommand, ProcessRunner};
use crate::types::{
    ConfigReference, InvocationMode, InvocationResult, NotConfiguredReason, SourceFileSet,
};

/// Subcommand token passed first.
pub const LINT_SUBCOMMAND: &str = "lint";
/// Added right after the subcommand in fix mode.
pub const FIX_FLAG: &str = "--fix";
/// Followed by the configuration path.
pub const CONFIG_FLAG: &str = "--config";
/// Makes exclusion rules apply to explicitly passed files.
pub const FORCE_EXCLUDE_FLAG: &str = "--force-exclude";
/// Followed by the cache directory.
pub const CACHE_PATH_FLAG: &str = "--cache-path";
/// Disables caching altogether (CI).
pub const NO_CACHE_FLAG: &str = "--no-cache";

/// Subdirectory of the work directory reported as the output location.
const OUTPUT_SUBDIR: &str = "Output";

/// Cache handling for one invocation. Exactly one is selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheMode {
    /// Cache results under the given directory.
    Path(PathBuf),
    /// Do not cache.
    Disabled,
}

impl CacheMode {
    /// CI contexts disable the cache; everything else caches in `work_dir`.
    #[must_use]
    pub fn select(ci: bool, work_dir: &Path) -> Self {
        if ci {
            Self::Disabled
        } else {
            Self::Path(work_dir.to_path_buf())
        }
    }
}

/// Builds the tool's argument list.
///
/// Order: subcommand, fix flag (fix mode only), `--config <path>`,
/// `--force-exclude`, cache flag(s), then every input file in order.
/// Paths are passed as raw OS strings, so names that are not valid UTF-8
/// reach the tool byte for byte.
#[must_use]
pub fn build_arguments(
    mode: InvocationMode,
    config: &Path,
    cache: &CacheMode,
    files: &SourceFileSet,
) -> Vec<OsString> {
    let mut arguments: Vec<OsString> = Vec::with_capacity(files.len() + 7);
    arguments.push(LINT_SUBCOMMAND.into());
    if mode == InvocationMode::LintAndFix {
        arguments.push(FIX_FLAG.into());
    }
    arguments.push(CONFIG_FLAG.into());
    arguments.push(config.into());
    // Every file is passed explicitly, so exclusions in the configuration
    // only apply with this flag.
    arguments.push(FORCE_EXCLUDE_FLAG.into());
    match cache {
        CacheMode::Path(dir) => {
            arguments.push(CACHE_PATH_FLAG.into());
            arguments.push(dir.into());
        }
        CacheMode::Disabled => arguments.push(NO_CACHE_FLAG.into()),
    }
    arguments.extend(files.iter().map(OsString::from));
    arguments
}

/// Runs the linter through a [`ProcessRunner`].
///
/// Concurrent invocations sharing one work directory also share its cache;
/// callers running targets in parallel must give each its own directory.
#[derive(Debug, Clone)]
pub struct LintInvoker<R> {
    runner: R,
    tool: PathBuf,
    display_name: String,
    environment: BTreeMap<String, String>,
    ci: bool,
}

impl<R: ProcessRunner> LintInvoker<R> {
    /// Creates an invoker for the executable at `tool`.
    ///
    /// The child environment starts empty; see [`Self::with_environment`].
    pub fn new(tool: impl Into<PathBuf>, runner: R) -> Self {
        let tool = tool.into();
        let display_name = tool
            .file_stem()
            .map_or_else(|| "lint".to_string(), |s| s.to_string_lossy().into_owned());
        Self {
            runner,
            tool,
            display_name,
            environment: BTreeMap::new(),
            ci: false,
        }
    }

    /// Sets the name reported with planned commands.
    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    /// Sets the complete environment of the child.
    #[must_use]
    pub fn with_environment(mut self, environment: BTreeMap<String, String>) -> Self {
        self.environment = environment;
        self
    }

    /// Marks a CI context, which replaces the cache path with `--no-cache`.
    #[must_use]
    pub fn ci(mut self, ci: bool) -> Self {
        self.ci = ci;
        self
    }

    /// Builds the command without running it.
    ///
    /// # Errors
    ///
    /// Returns the reason when there are no files or no configuration.
    pub fn plan(
        &self,
        mode: InvocationMode,
        files: &SourceFileSet,
        config: &ConfigReference,
        work_dir: &Path,
    ) -> Result<LintCommand, NotConfiguredReason> {
        if files.is_empty() {
            return Err(NotConfiguredReason::NoInputFiles);
        }
        let ConfigReference::Found(config_path) = config else {
            return Err(NotConfiguredReason::NoConfigurationFile);
        };

        let cache = CacheMode::select(self.ci, work_dir);
        let arguments = build_arguments(mode, config_path, &cache, files);
        tracing::debug!("Built {} argument(s) for {} mode", arguments.len(), mode);

        Ok(LintCommand {
            display_name: self.display_name.clone(),
            executable: self.tool.clone(),
            arguments,
            environment: self.environment.clone(),
            output_dir: work_dir.join(OUTPUT_SUBDIR),
        })
    }

    /// Builds the command and runs it to completion.
    ///
    /// Skips without spawning when `files` is empty or `config` is
    /// [`ConfigReference::NotFound`]. Never retries.
    pub fn invoke(
        &self,
        mode: InvocationMode,
        files: &SourceFileSet,
        config: &ConfigReference,
        work_dir: &Path,
    ) -> InvocationResult {
        let command = match self.plan(mode, files, config, work_dir) {
            Ok(command) => command,
            Err(reason) => {
                tracing::warn!("{} not set up | {}", self.display_name, reason);
                return InvocationResult::not_configured(reason);
            }
        };

        tracing::info!("{}", command.command_line());

        match self.runner.run(&command) {
            Ok(termination) => {
                let result = InvocationResult::from_termination(termination);
                if !result.is_success() {
                    tracing::error!("{} invocation failed: {}", self.display_name, termination);
                }
                result
            }
            Err(e) => {
                tracing::error!("Failed to launch {}: {}", self.tool.display(), e);
                InvocationResult::launch_failed(format!("{}: {e}", self.tool.display()))
            }
        }
    }
}
