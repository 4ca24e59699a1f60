//! Locate command implementation.

use anyhow::{bail, Context, Result};
use lint_runner_core::{ConfigLocator, ConfigReference};
use std::path::Path;

/// Runs the locate command.
pub fn run(dir: &Path, settings: Option<&Path>) -> Result<()> {
    let dir = std::fs::canonicalize(dir)
        .with_context(|| format!("Directory not found: {}", dir.display()))?;
    let config = crate::settings::load(&dir, settings)?;

    let locator = ConfigLocator::new(config.config_file.as_str());
    match locator.locate(&dir) {
        ConfigReference::Found(path) => {
            println!("{}", path.display());
            Ok(())
        }
        ConfigReference::NotFound => bail!(
            "No {} found in {} or any parent directory",
            locator.file_name(),
            dir.display()
        ),
    }
}
