//! Hierarchical configuration-file discovery.
//!
//! Starting from a directory, each ancestor is checked for a readable file
//! with the recognized name. The first hit wins; the walk stops at the
//! filesystem root.

use std::fs::File;
use std::path::{Component, Path, PathBuf};

use crate::types::ConfigReference;

/// Walks upward from a start directory looking for a configuration file.
#[derive(Debug, Clone)]
pub struct ConfigLocator {
    file_name: String,
}

impl ConfigLocator {
    /// Creates a locator for the given configuration file name (e.g. `.swiftlint.yml`).
    #[must_use]
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }

    /// The file name this locator searches for.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Finds the nearest readable configuration file at or above `start`.
    ///
    /// A relative `start` is resolved against the current directory, so the
    /// walk always reaches the filesystem root and a found path is absolute.
    ///
    /// Never fails: unreadable candidates (permission denied, broken links,
    /// directories with the same name) are treated as absent at that level.
    #[must_use]
    pub fn locate(&self, start: &Path) -> ConfigReference {
        let cwd = std::env::current_dir().ok();
        let start = anchor(start, cwd.as_deref());

        // `ancestors` ends once removing the last component yields nothing
        // new, so the root is visited exactly once.
        for (level, dir) in start.ancestors().enumerate() {
            let candidate = dir.join(&self.file_name);
            if is_readable_file(&candidate) {
                tracing::debug!(
                    "Found {} after ascending {} level(s): {}",
                    self.file_name,
                    level,
                    candidate.display()
                );
                return ConfigReference::Found(candidate);
            }
            tracing::trace!("No {} in {}", self.file_name, dir.display());
        }

        tracing::debug!("No {} found above {}", self.file_name, start.display());
        ConfigReference::NotFound
    }
}

/// Joins a relative `start` onto `cwd` and folds `.` and `..` lexically.
///
/// Without a current directory the path is kept relative; the walk then
/// ends at its first component.
fn anchor(start: &Path, cwd: Option<&Path>) -> PathBuf {
    let joined = match cwd {
        Some(cwd) if start.is_relative() => cwd.join(start),
        _ => start.to_path_buf(),
    };

    let mut out = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                // `..` at the root stays at the root
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    out
}

/// Opens the file for reading rather than checking existence, so a file the
/// current process cannot read does not count.
fn is_readable_file(path: &Path) -> bool {
    let Ok(metadata) = std::fs::metadata(path) else {
        return false;
    };
    metadata.is_file() && File::open(path).is_ok()
}

/// Convenience wrapper returning the path directly.
#[must_use]
pub fn locate(start: &Path, file_name: &str) -> Option<PathBuf> {
    match ConfigLocator::new(file_name).locate(start) {
        ConfigReference::Found(path) => Some(path),
        ConfigReference::NotFound => None,
    }
}
