//! Lint / fix command implementation.
//!
//! Plays the build host's part: resolves the tool, collects source files
//! per target, reads the disable / CI switches from the environment, and
//! hands each target to the core as one independent invocation.

use anyhow::{Context, Result};
use lint_runner_core::{
    collect_sources, run_lint, InvocationMode, LintRequest, RunFlags, RunnerConfig, SourceFileSet,
};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use super::output::{self, TargetReport};
use crate::RunArgs;

/// Default cache directory, relative to the package directory.
const DEFAULT_WORK_DIR: &str = ".build/lint-runner";

/// Runs the lint or fix command.
pub fn run(mode: InvocationMode, args: &RunArgs, settings: Option<&Path>) -> Result<()> {
    let package_dir = std::fs::canonicalize(&args.package_dir).with_context(|| {
        format!("Package directory not found: {}", args.package_dir.display())
    })?;
    let config = crate::settings::load(&package_dir, settings)?;

    let vars: HashMap<String, String> = std::env::vars().collect();
    let mut flags = RunFlags::from_vars(&vars, &config.env);
    flags.ci |= args.ci;

    let work_dir = args
        .work_dir
        .clone()
        .unwrap_or_else(|| package_dir.join(DEFAULT_WORK_DIR));
    if !flags.disabled && !flags.ci {
        std::fs::create_dir_all(&work_dir)
            .with_context(|| format!("Failed to create work directory {}", work_dir.display()))?;
    }

    let tool = resolve_tool(args.tool.as_deref(), &config);
    let environment = forwarded_environment(&vars, &config.pass_env);

    let targets = if args.targets.is_empty() {
        vec![package_dir.clone()]
    } else {
        args.targets.clone()
    };

    let mut reports = Vec::with_capacity(targets.len());
    for target in targets {
        let (target, files) = target_sources(&target, flags, &config)?;

        tracing::debug!("{}: {} file(s)", target.display(), files.len());

        let request = LintRequest::new(mode, files, &package_dir, &work_dir, &tool)
            .config_file(config.config_file.as_str())
            .flags(flags)
            .environment(environment.clone());
        let file_count = request.files.len();
        let result = run_lint(&request);

        if mode == InvocationMode::LintAndFix && result.is_success() {
            tracing::info!("Formatted the source code in {}.", target.display());
        }

        reports.push(TargetReport {
            target,
            files: file_count,
            result,
        });
    }

    output::print(&reports, args.format)?;

    if let Some(code) = exit_code(&reports) {
        std::process::exit(code);
    }

    Ok(())
}

/// Resolves one target and collects its files.
///
/// A disabled run never touches the filesystem: the target is reported as
/// given, with no files.
fn target_sources(
    target: &Path,
    flags: RunFlags,
    config: &RunnerConfig,
) -> Result<(PathBuf, SourceFileSet)> {
    if flags.disabled {
        return Ok((target.to_path_buf(), SourceFileSet::new()));
    }
    let target = std::fs::canonicalize(target)
        .with_context(|| format!("Target not found: {}", target.display()))?;
    let files = collect_sources(&target, config)
        .with_context(|| format!("Failed to collect sources in {}", target.display()))?;
    Ok((target, files))
}

/// Explicit path wins; otherwise the configured name is looked up on PATH.
///
/// An unresolvable name is passed through unchanged so the failure surfaces
/// as a launch error for the invocation that needs it.
fn resolve_tool(explicit: Option<&Path>, config: &RunnerConfig) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    match which::which(&config.tool) {
        Ok(path) => {
            tracing::debug!("Resolved {} to {}", config.tool, path.display());
            path
        }
        Err(e) => {
            tracing::debug!("Could not resolve {} on PATH: {}", config.tool, e);
            PathBuf::from(&config.tool)
        }
    }
}

/// Picks the allow-listed variables out of the ambient environment.
fn forwarded_environment(
    vars: &HashMap<String, String>,
    pass_env: &[String],
) -> BTreeMap<String, String> {
    pass_env
        .iter()
        .filter_map(|name| vars.get(name).map(|value| (name.clone(), value.clone())))
        .collect()
}

/// Exit status of the first build-failing target, if any.
fn exit_code(reports: &[TargetReport]) -> Option<i32> {
    reports
        .iter()
        .find(|r| r.result.should_fail_build())
        .map(|r| r.result.exit_code().filter(|c| *c != 0).unwrap_or(1))
}
