//! Process-runner seam.
//!
//! [`LintInvoker`](crate::LintInvoker) never touches `std::process`
//! directly; it hands a fully built [`LintCommand`] to a [`ProcessRunner`].
//! Tests substitute a recording fake.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::types::Termination;

/// A fully described tool invocation.
///
/// This is also the value a build-tool host registers as a prebuild step
/// when it runs the tool itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LintCommand {
    /// Name shown by hosts that list build steps.
    pub display_name: String,
    /// Path to the executable.
    pub executable: PathBuf,
    /// Ordered argument list. Paths keep their exact OS bytes.
    pub arguments: Vec<OsString>,
    /// Complete environment of the child. Nothing else is inherited.
    pub environment: BTreeMap<String, String>,
    /// Directory for outputs the host should track; keeps cache files out
    /// of build products.
    pub output_dir: PathBuf,
}

impl LintCommand {
    /// Renders `executable arg1 arg2 ...` for logs. Lossy for arguments
    /// that are not valid UTF-8.
    #[must_use]
    pub fn command_line(&self) -> String {
        let mut line = self.executable.display().to_string();
        for arg in &self.arguments {
            line.push(' ');
            line.push_str(&arg.to_string_lossy());
        }
        line
    }
}

/// Spawns a command and blocks until it terminates.
pub trait ProcessRunner {
    /// Runs `command` to completion.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the executable could not be started.
    fn run(&self, command: &LintCommand) -> std::io::Result<Termination>;
}

impl<R: ProcessRunner + ?Sized> ProcessRunner for &R {
    fn run(&self, command: &LintCommand) -> std::io::Result<Termination> {
        (**self).run(command)
    }
}

/// Runs commands as real child processes.
///
/// The child gets exactly [`LintCommand::environment`]; stdout and stderr
/// are inherited so the linter's findings reach the caller's output
/// unmodified. There is no timeout.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProcessRunner;

impl ProcessRunner for SystemProcessRunner {
    fn run(&self, command: &LintCommand) -> std::io::Result<Termination> {
        let status = Command::new(&command.executable)
            .args(&command.arguments)
            .env_clear()
            .envs(&command.environment)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()?;
        Ok(Termination::from_status(status))
    }
}
