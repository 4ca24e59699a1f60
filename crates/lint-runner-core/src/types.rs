//! Core types shared by discovery, invocation and result reporting.

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Whether the tool only reports findings or also rewrites files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvocationMode {
    /// Report findings only.
    #[default]
    Lint,
    /// Report findings and rewrite files to resolve auto-fixable ones.
    LintAndFix,
}

impl std::fmt::Display for InvocationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lint => write!(f, "lint"),
            Self::LintAndFix => write!(f, "lint-and-fix"),
        }
    }
}

/// Ordered sequence of source files handed to the tool.
///
/// Order is preserved exactly as given; the tool receives the files in the
/// same order they were inserted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceFileSet(Vec<PathBuf>);

impl SourceFileSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a file to the end of the set.
    pub fn push(&mut self, path: impl Into<PathBuf>) {
        self.0.push(path.into());
    }

    /// Returns `true` if there is nothing to lint.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of files in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over the files in order.
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.0.iter().map(PathBuf::as_path)
    }
}

impl From<Vec<PathBuf>> for SourceFileSet {
    fn from(files: Vec<PathBuf>) -> Self {
        Self(files)
    }
}

impl<P: Into<PathBuf>> FromIterator<P> for SourceFileSet {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Outcome of configuration discovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigReference {
    /// Path to the first readable configuration file found.
    Found(PathBuf),
    /// No configuration file up to the filesystem root.
    NotFound,
}

impl ConfigReference {
    /// Returns the resolved path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Found(p) => Some(p),
            Self::NotFound => None,
        }
    }

    /// Returns `true` if a configuration file was found.
    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

/// How the child process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "status", rename_all = "snake_case")]
pub enum Termination {
    /// Normal exit with a status code.
    Exit(i32),
    /// Killed by a signal.
    Signal(i32),
    /// Ended without a code or signal the platform can report.
    Unknown,
}

impl Termination {
    /// Classifies a finished child's status.
    #[must_use]
    pub fn from_status(status: std::process::ExitStatus) -> Self {
        if let Some(code) = status.code() {
            return Self::Exit(code);
        }
        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return Self::Signal(signal);
            }
        }
        Self::Unknown
    }

    /// Returns `true` for a normal exit with status 0.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Exit(0))
    }
}

impl std::fmt::Display for Termination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exit(code) => write!(f, "exit:{code}"),
            Self::Signal(signal) => write!(f, "signal:{signal}"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Why an invocation was skipped without spawning anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotConfiguredReason {
    /// The source file set was empty.
    NoInputFiles,
    /// No configuration file exists from the start directory up to the root.
    NoConfigurationFile,
}

impl std::fmt::Display for NotConfiguredReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoInputFiles => write!(f, "nothing to lint"),
            Self::NoConfigurationFile => write!(f, "no configuration file found"),
        }
    }
}

/// Terminal state of a single invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// The tool exited normally with status 0.
    Succeeded,
    /// Linting was switched off; nothing was looked up or spawned.
    Disabled,
    /// Nothing to run: no files, or no configuration file.
    NotConfigured {
        /// Which precondition was missing.
        reason: NotConfiguredReason,
    },
    /// The executable could not be started.
    ToolLaunchFailed {
        /// Launch error as reported by the OS.
        message: String,
    },
    /// The tool exited normally with a nonzero status.
    ToolExitedNonZero {
        /// The exit status.
        code: i32,
    },
    /// The tool was signaled or otherwise ended abnormally.
    AbnormalTermination {
        /// How it ended.
        kind: Termination,
    },
}

/// Result of one invocation. Produced once, never retained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationResult {
    /// Terminal state.
    #[serde(flatten)]
    pub outcome: Outcome,
    /// How the child ended, when one was spawned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub termination: Option<Termination>,
    /// Human-readable detail for warnings and failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<String>,
}

impl InvocationResult {
    /// Linting was disabled by the caller.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            outcome: Outcome::Disabled,
            termination: None,
            diagnostic: None,
        }
    }

    /// The invocation was skipped for `reason`.
    #[must_use]
    pub fn not_configured(reason: NotConfiguredReason) -> Self {
        Self {
            outcome: Outcome::NotConfigured { reason },
            termination: None,
            diagnostic: Some(reason.to_string()),
        }
    }

    /// The executable could not be started.
    #[must_use]
    pub fn launch_failed(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            diagnostic: Some(message.clone()),
            outcome: Outcome::ToolLaunchFailed { message },
            termination: None,
        }
    }

    /// Maps a finished child to its outcome.
    #[must_use]
    pub fn from_termination(termination: Termination) -> Self {
        let outcome = match termination {
            Termination::Exit(0) => Outcome::Succeeded,
            Termination::Exit(code) => Outcome::ToolExitedNonZero { code },
            other => Outcome::AbnormalTermination { kind: other },
        };
        let diagnostic = (outcome != Outcome::Succeeded).then(|| termination.to_string());
        Self {
            outcome,
            termination: Some(termination),
            diagnostic,
        }
    }

    /// Returns `true` if the tool ran and exited with status 0.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.outcome == Outcome::Succeeded
    }

    /// Returns `true` if the calling build step should fail.
    ///
    /// `Disabled` and `NotConfigured` never fail a build.
    #[must_use]
    pub fn should_fail_build(&self) -> bool {
        matches!(
            self.outcome,
            Outcome::ToolLaunchFailed { .. }
                | Outcome::ToolExitedNonZero { .. }
                | Outcome::AbnormalTermination { .. }
        )
    }

    /// Exit code of the child, if it exited normally.
    #[must_use]
    pub fn exit_code(&self) -> Option<i32> {
        match self.termination {
            Some(Termination::Exit(code)) => Some(code),
            _ => None,
        }
    }

    /// Converts build-failing outcomes into a [`LintError`].
    ///
    /// # Errors
    ///
    /// Returns an error for launch failures, nonzero exits and abnormal
    /// terminations.
    pub fn into_result(self) -> Result<(), LintError> {
        match self.outcome {
            Outcome::Succeeded | Outcome::Disabled | Outcome::NotConfigured { .. } => Ok(()),
            Outcome::ToolLaunchFailed { message } => Err(LintError::ToolLaunchFailed { message }),
            Outcome::ToolExitedNonZero { code } => Err(LintError::ToolExitedNonZero { code }),
            Outcome::AbnormalTermination { kind } => {
                Err(LintError::AbnormalTermination { termination: kind })
            }
        }
    }
}

/// Build-failing invocation outcomes.
#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum LintError {
    /// The executable could not be started.
    #[error("failed to launch linter: {message}")]
    #[diagnostic(
        code(lint_runner::tool_launch_failed),
        help("check that the linter is installed and executable, or pass --tool")
    )]
    ToolLaunchFailed {
        /// Launch error as reported by the OS.
        message: String,
    },

    /// The linter reported findings or could not apply fixes.
    #[error("linter invocation failed: exit:{code}")]
    #[diagnostic(
        code(lint_runner::tool_exited_non_zero),
        help("address the reported findings; run `lint-runner fix` for auto-fixable ones")
    )]
    ToolExitedNonZero {
        /// The exit status.
        code: i32,
    },

    /// The linter was killed or crashed.
    #[error("linter invocation failed: {termination}")]
    #[diagnostic(code(lint_runner::abnormal_termination))]
    AbnormalTermination {
        /// How it ended.
        termination: Termination,
    },
}

impl LintError {
    /// Process exit status a driver should propagate for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ToolExitedNonZero { code } => *code,
            Self::ToolLaunchFailed { .. } | Self::AbnormalTermination { .. } => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_exit_maps_to_succeeded() {
        let result = InvocationResult::from_termination(Termination::Exit(0));
        assert!(result.is_success());
        assert!(!result.should_fail_build());
        assert_eq!(result.exit_code(), Some(0));
        assert!(result.diagnostic.is_none());
    }

    #[test]
    fn nonzero_exit_carries_code() {
        for code in [1, 2, 42, 255] {
            let result = InvocationResult::from_termination(Termination::Exit(code));
            assert_eq!(result.outcome, Outcome::ToolExitedNonZero { code });
            assert!(result.should_fail_build());
            assert_eq!(result.diagnostic.as_deref(), Some(format!("exit:{code}").as_str()));
        }
    }

    #[test]
    fn signal_maps_to_abnormal_termination() {
        let result = InvocationResult::from_termination(Termination::Signal(9));
        assert_eq!(
            result.outcome,
            Outcome::AbnormalTermination {
                kind: Termination::Signal(9)
            }
        );
        assert_eq!(result.exit_code(), None);
        assert_eq!(result.diagnostic.as_deref(), Some("signal:9"));
    }

    #[test]
    fn skips_do_not_fail_build() {
        assert!(!InvocationResult::disabled().should_fail_build());
        assert!(!InvocationResult::not_configured(NotConfiguredReason::NoInputFiles)
            .should_fail_build());
        assert!(InvocationResult::disabled().into_result().is_ok());
        assert!(
            InvocationResult::not_configured(NotConfiguredReason::NoConfigurationFile)
                .into_result()
                .is_ok()
        );
    }

    #[test]
    fn launch_failure_is_fatal() {
        let result = InvocationResult::launch_failed("No such file or directory");
        assert!(result.should_fail_build());
        let err = result.into_result().unwrap_err();
        assert!(matches!(err, LintError::ToolLaunchFailed { .. }));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn into_result_propagates_exit_code() {
        let err = InvocationResult::from_termination(Termination::Exit(2))
            .into_result()
            .unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.to_string(), "linter invocation failed: exit:2");
    }

    #[test]
    fn source_file_set_keeps_order() {
        let set: SourceFileSet = ["/b.swift", "/a.swift", "/c.swift"].into_iter().collect();
        let files: Vec<&Path> = set.iter().collect();
        assert_eq!(
            files,
            vec![
                Path::new("/b.swift"),
                Path::new("/a.swift"),
                Path::new("/c.swift")
            ]
        );
        assert_eq!(set.len(), 3);
        assert!(SourceFileSet::new().is_empty());
    }
}
