//! lint-runner CLI tool.
//!
//! Usage:
//! ```bash
//! lint-runner lint [OPTIONS] [TARGETS]...
//! lint-runner fix [OPTIONS] [TARGETS]...
//! lint-runner locate [DIR]
//! lint-runner init
//! ```

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use lint_runner_core::InvocationMode;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod settings;

/// Run an external linter with the nearest configuration file
#[derive(Parser)]
#[command(name = "lint-runner")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the runner settings file (lint-runner.toml)
    #[arg(short, long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lint every target
    Lint(RunArgs),

    /// Lint every target and apply auto-fixes
    Fix(RunArgs),

    /// Print the configuration file the linter would use
    Locate {
        /// Directory to start searching from (default: current directory)
        #[arg(default_value = ".")]
        dir: PathBuf,
    },

    /// Initialize a settings file
    Init {
        /// Overwrite existing settings
        #[arg(long)]
        force: bool,
    },
}

/// Options shared by `lint` and `fix`.
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Targets to lint: directories are walked, files are taken as-is
    /// (default: the package directory)
    targets: Vec<PathBuf>,

    /// Package directory; the configuration search starts here
    #[arg(short, long, default_value = ".")]
    package_dir: PathBuf,

    /// Cache directory (default: <package>/.build/lint-runner)
    #[arg(short, long)]
    work_dir: Option<PathBuf>,

    /// Linter executable (default: the settings' tool, looked up on PATH)
    #[arg(short, long)]
    tool: Option<PathBuf>,

    /// Force CI mode (no cache) regardless of the environment
    #[arg(long)]
    ci: bool,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,
}

/// Output format for run results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Lint(args) => {
            commands::run::run(InvocationMode::Lint, &args, cli.settings.as_deref())
        }
        Commands::Fix(args) => {
            commands::run::run(InvocationMode::LintAndFix, &args, cli.settings.as_deref())
        }
        Commands::Locate { dir } => commands::locate::run(&dir, cli.settings.as_deref()),
        Commands::Init { force } => commands::init::run(force),
    }
}
