//! Caller-facing entry point: flags, discovery and invocation in one call.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::config::DEFAULT_CONFIG_FILE;
use crate::flags::RunFlags;
use crate::invoker::LintInvoker;
use crate::locator::ConfigLocator;
use crate::process::{ProcessRunner, SystemProcessRunner};
use crate::types::{InvocationMode, InvocationResult, SourceFileSet};

/// Everything one lint run needs from its caller.
#[derive(Debug, Clone)]
pub struct LintRequest {
    /// Lint or lint-and-fix.
    pub mode: InvocationMode,
    /// Files handed to the tool, in order.
    pub files: SourceFileSet,
    /// Where the upward configuration search begins.
    pub start_directory: PathBuf,
    /// Cache directory; also the parent of the reported output directory.
    pub work_dir: PathBuf,
    /// Disable / CI switches.
    pub flags: RunFlags,
    /// Resolved path of the linter executable.
    pub tool: PathBuf,
    /// Recognized configuration file name.
    pub config_file: String,
    /// Complete environment of the child.
    pub environment: BTreeMap<String, String>,
}

impl LintRequest {
    /// Creates a request with default flags, the default configuration file
    /// name and an empty child environment.
    pub fn new(
        mode: InvocationMode,
        files: SourceFileSet,
        start_directory: impl Into<PathBuf>,
        work_dir: impl Into<PathBuf>,
        tool: impl Into<PathBuf>,
    ) -> Self {
        Self {
            mode,
            files,
            start_directory: start_directory.into(),
            work_dir: work_dir.into(),
            flags: RunFlags::default(),
            tool: tool.into(),
            config_file: DEFAULT_CONFIG_FILE.to_string(),
            environment: BTreeMap::new(),
        }
    }

    /// Sets the disable / CI switches.
    #[must_use]
    pub fn flags(mut self, flags: RunFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Sets the recognized configuration file name.
    #[must_use]
    pub fn config_file(mut self, name: impl Into<String>) -> Self {
        self.config_file = name.into();
        self
    }

    /// Sets the child environment.
    #[must_use]
    pub fn environment(mut self, environment: BTreeMap<String, String>) -> Self {
        self.environment = environment;
        self
    }
}

/// Runs the linter as a real child process.
#[must_use]
pub fn run_lint(request: &LintRequest) -> InvocationResult {
    run_lint_with(request, SystemProcessRunner)
}

/// Runs the linter through `runner`.
///
/// A disabled request returns immediately without searching for a
/// configuration file or spawning anything.
pub fn run_lint_with<R: ProcessRunner>(request: &LintRequest, runner: R) -> InvocationResult {
    if request.flags.disabled {
        tracing::info!("Linting disabled; skipping");
        return InvocationResult::disabled();
    }

    let config = ConfigLocator::new(request.config_file.as_str()).locate(&request.start_directory);

    LintInvoker::new(request.tool.clone(), runner)
        .ci(request.flags.ci)
        .with_environment(request.environment.clone())
        .invoke(request.mode, &request.files, &config, &request.work_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoker::tests::RecordingRunner;
    use crate::types::{NotConfiguredReason, Outcome, Termination};
    use std::ffi::OsString;
    use std::fs;
    use tempfile::TempDir;

    const NAME: &str = ".lintconfig.yml";

    #[test]
    fn disabled_skips_everything() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(NAME), "").unwrap();
        let runner = RecordingRunner::exiting(Termination::Exit(0));

        let request = LintRequest::new(
            InvocationMode::Lint,
            [tmp.path().join("a.x")].into_iter().collect(),
            tmp.path(),
            tmp.path().join("work"),
            "/bin/lint",
        )
        .config_file(NAME)
        .flags(RunFlags::new(true, false));

        let result = run_lint_with(&request, &runner);
        assert_eq!(result.outcome, Outcome::Disabled);
        assert_eq!(runner.spawn_count(), 0);
    }

    #[test]
    fn locates_config_and_invokes() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(NAME), "").unwrap();
        let src = tmp.path().join("pkg/src");
        fs::create_dir_all(&src).unwrap();
        let file = src.join("a.x");
        let runner = RecordingRunner::exiting(Termination::Exit(0));

        let request = LintRequest::new(
            InvocationMode::Lint,
            [file.clone()].into_iter().collect(),
            &src,
            tmp.path().join("work"),
            "/bin/lint",
        )
        .config_file(NAME);

        let result = run_lint_with(&request, &runner);
        assert!(result.is_success());

        let calls = runner.calls.borrow();
        let expected: Vec<OsString> = vec![
            "lint".into(),
            "--config".into(),
            tmp.path().join(NAME).into(),
            "--force-exclude".into(),
            "--cache-path".into(),
            tmp.path().join("work").into(),
            file.into(),
        ];
        assert_eq!(calls[0].arguments, expected);
    }

    #[test]
    fn missing_config_is_not_configured() {
        let tmp = TempDir::new().unwrap();
        let runner = RecordingRunner::exiting(Termination::Exit(0));

        let request = LintRequest::new(
            InvocationMode::LintAndFix,
            [tmp.path().join("a.x")].into_iter().collect(),
            tmp.path(),
            tmp.path().join("work"),
            "/bin/lint",
        )
        .config_file(".lint-runner-test-config-that-does-not-exist.yml");

        let result = run_lint_with(&request, &runner);
        assert_eq!(
            result.outcome,
            Outcome::NotConfigured {
                reason: NotConfiguredReason::NoConfigurationFile
            }
        );
        assert_eq!(runner.spawn_count(), 0);
    }
}
