//! # lint-runner-core
//!
//! Runs an external linter the way a build-tool plugin would, without
//! depending on any particular build system.
//!
//! This crate provides:
//!
//! - [`ConfigLocator`] for finding the nearest configuration file above a
//!   directory
//! - [`LintInvoker`] for building a deterministic argument list and running
//!   the tool
//! - [`ProcessRunner`] as the seam between the invoker and real processes
//! - [`run_lint`] tying both together for a caller-supplied [`LintRequest`]
//!
//! ## Example
//!
//! ```ignore
//! use lint_runner_core::{run_lint, InvocationMode, LintRequest, RunFlags};
//!
//! let request = LintRequest::new(
//!     InvocationMode::Lint,
//!     files,
//!     "/repo/pkg",
//!     "/repo/.build/lint-runner",
//!     "/usr/local/bin/swiftlint",
//! )
//! .flags(RunFlags::new(false, is_ci));
//!
//! run_lint(&request).into_result()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod flags;
mod invoker;
mod locator;
mod process;
mod runner;
mod sources;
mod types;

pub use config::{ConfigError, EnvNames, RunnerConfig, DEFAULT_CONFIG_FILE, DEFAULT_TOOL};
pub use flags::{is_truthy, RunFlags};
pub use invoker::{
    build_arguments, CacheMode, LintInvoker, CACHE_PATH_FLAG, CONFIG_FLAG, FIX_FLAG,
    FORCE_EXCLUDE_FLAG, LINT_SUBCOMMAND, NO_CACHE_FLAG,
};
pub use locator::{locate, ConfigLocator};
pub use process::{LintCommand, ProcessRunner, SystemProcessRunner};
pub use runner::{run_lint, run_lint_with, LintRequest};
pub use sources::{collect_sources, DiscoveryError};
pub use types::{
    ConfigReference, InvocationMode, InvocationResult, LintError, NotConfiguredReason, Outcome,
    SourceFileSet, Termination,
};
