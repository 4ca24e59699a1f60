//! Shared output formatting for run results.

use anyhow::Result;
use lint_runner_core::{InvocationResult, Outcome};
use serde::Serialize;
use std::path::PathBuf;

use crate::OutputFormat;

/// Result of one target's invocation.
#[derive(Debug, Serialize)]
pub struct TargetReport {
    /// Target the files were collected from.
    pub target: PathBuf,
    /// Number of files passed to the linter.
    pub files: usize,
    /// Invocation result.
    #[serde(flatten)]
    pub result: InvocationResult,
}

/// Print run results in the specified format.
pub fn print(reports: &[TargetReport], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(reports),
        OutputFormat::Json => return print_json(reports),
    }
    Ok(())
}

fn print_text(reports: &[TargetReport]) {
    for report in reports {
        println!("{}", format_text(report));
    }

    let failed = reports.iter().filter(|r| r.result.should_fail_build()).count();
    let summary_color = if failed > 0 { "\x1b[31m" } else { "\x1b[32m" };
    println!(
        "{}{} target(s), {} failed\x1b[0m",
        summary_color,
        reports.len(),
        failed
    );
}

fn format_text(report: &TargetReport) -> String {
    let target = report.target.display();
    match &report.result.outcome {
        Outcome::Succeeded => format!("\x1b[32mok\x1b[0m {target} ({} file(s))", report.files),
        Outcome::Disabled => format!("\x1b[34mskipped\x1b[0m {target}: linting disabled"),
        Outcome::NotConfigured { reason } => {
            format!("\x1b[33mwarning\x1b[0m {target}: not set up | {reason}")
        }
        Outcome::ToolLaunchFailed { message } => {
            format!("\x1b[31merror\x1b[0m {target}: failed to launch linter: {message}")
        }
        Outcome::ToolExitedNonZero { .. } | Outcome::AbnormalTermination { .. } => format!(
            "\x1b[31merror\x1b[0m {target}: linter invocation failed: {}",
            report.result.diagnostic.as_deref().unwrap_or("unknown")
        ),
    }
}

fn print_json(reports: &[TargetReport]) -> Result<()> {
    let json = serde_json::to_string_pretty(reports)?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lint_runner_core::{NotConfiguredReason, Termination};

    fn report(result: InvocationResult) -> TargetReport {
        TargetReport {
            target: PathBuf::from("/repo/Sources/App"),
            files: 2,
            result,
        }
    }

    #[test]
    fn text_mentions_target_and_detail() {
        let line = format_text(&report(InvocationResult::from_termination(Termination::Exit(2))));
        assert!(line.contains("/repo/Sources/App"));
        assert!(line.contains("exit:2"));

        let line = format_text(&report(InvocationResult::not_configured(
            NotConfiguredReason::NoConfigurationFile,
        )));
        assert!(line.contains("no configuration file found"));
    }

    #[test]
    fn json_flattens_outcome() {
        let json = serde_json::to_value(report(InvocationResult::from_termination(
            Termination::Exit(3),
        )))
        .unwrap();
        assert_eq!(json["target"], "/repo/Sources/App");
        assert_eq!(json["outcome"], "tool_exited_non_zero");
        assert_eq!(json["code"], 3);
        assert_eq!(json["termination"]["kind"], "exit");
        assert_eq!(json["termination"]["status"], 3);
    }
}
