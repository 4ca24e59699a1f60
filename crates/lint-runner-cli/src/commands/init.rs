//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

use crate::settings::SETTINGS_FILE;

pub(crate) const DEFAULT_SETTINGS: &str = r#"# lint-runner settings
# Every key is optional; the values below are the defaults.

# Linter executable, looked up on PATH unless --tool is given
tool = "swiftlint"

# Configuration file searched from the package directory upward
config_file = ".swiftlint.yml"

# Source file extensions collected from each target
extensions = ["swift"]

# Ambient variables forwarded to the linter; nothing else is inherited
pass_env = []

[env]
# A truthy value (TRUE, 1, yes, ...) skips linting entirely
disable = "DISABLE_SWIFTLINT"

# A truthy value marks a CI run: --no-cache replaces --cache-path
ci = "isCI"
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let settings_path = Path::new(SETTINGS_FILE);

    if settings_path.exists() && !force {
        bail!(
            "Settings file already exists at {}. Use --force to overwrite.",
            settings_path.display()
        );
    }

    std::fs::write(settings_path, DEFAULT_SETTINGS)?;

    println!("Created {}", settings_path.display());
    println!("\nNext steps:");
    println!("  1. Edit {} to match your linter", settings_path.display());
    println!("  2. Run: lint-runner lint");

    Ok(())
}
