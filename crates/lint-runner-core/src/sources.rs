//! Source file collection per target.

use std::path::{Path, PathBuf};

use crate::config::RunnerConfig;
use crate::types::SourceFileSet;

/// Directories never descended into: build products (including fetched
/// dependency checkouts) and VCS metadata.
const SKIPPED_DIRS: &[&str] = &[".build", ".git"];

/// Errors while collecting source files.
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    /// Target path does not exist.
    #[error("Target not found: {0}")]
    MissingTarget(PathBuf),

    /// Directory walk failed.
    #[error("Failed to walk {root}: {source}")]
    Walk {
        /// Target being walked.
        root: PathBuf,
        /// Underlying walker error.
        source: ignore::Error,
    },
}

/// Collects the files of one target that match the configured extensions.
///
/// A file target is taken as-is when its extension matches. A directory is
/// walked honoring `.gitignore`; hidden entries are included except the
/// `.build` and `.git` directories. The result is sorted so repeated runs
/// pass files in the same order.
///
/// # Errors
///
/// Returns an error if the target does not exist or cannot be walked.
pub fn collect_sources(
    target: &Path,
    config: &RunnerConfig,
) -> Result<SourceFileSet, DiscoveryError> {
    if target.is_file() {
        let files = if config.matches_extension(target) {
            vec![target.to_path_buf()]
        } else {
            tracing::debug!("Skipping {}: extension not linted", target.display());
            Vec::new()
        };
        return Ok(files.into());
    }
    if !target.is_dir() {
        return Err(DiscoveryError::MissingTarget(target.to_path_buf()));
    }

    let mut builder = ignore::WalkBuilder::new(target);
    builder
        .hidden(false)
        .git_ignore(true)
        .require_git(false)
        .filter_entry(|entry| entry.depth() == 0 || !is_skipped_dir(entry));

    let mut files = Vec::new();
    for entry in builder.build() {
        let entry = entry.map_err(|source| DiscoveryError::Walk {
            root: target.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if entry.file_type().is_some_and(|t| t.is_file()) && config.matches_extension(path) {
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    tracing::debug!("Collected {} source file(s) under {}", files.len(), target.display());
    Ok(files.into())
}

fn is_skipped_dir(entry: &ignore::DirEntry) -> bool {
    entry.file_type().is_some_and(|t| t.is_dir())
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| SKIPPED_DIRS.contains(&name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn collects_matching_files_sorted() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("Sources/B.swift"));
        touch(&tmp.path().join("Sources/A.swift"));
        touch(&tmp.path().join("Sources/nested/C.swift"));
        touch(&tmp.path().join("Sources/readme.md"));

        let set = collect_sources(tmp.path(), &RunnerConfig::default()).unwrap();
        let files: Vec<PathBuf> = set.iter().map(Path::to_path_buf).collect();
        assert_eq!(
            files,
            vec![
                tmp.path().join("Sources/A.swift"),
                tmp.path().join("Sources/B.swift"),
                tmp.path().join("Sources/nested/C.swift"),
            ]
        );
    }

    #[test]
    fn respects_gitignore() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".gitignore"), "Generated/\n").unwrap();
        touch(&tmp.path().join("Generated/G.swift"));
        touch(&tmp.path().join("Main.swift"));

        let set = collect_sources(tmp.path(), &RunnerConfig::default()).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.iter().next(), Some(tmp.path().join("Main.swift").as_path()));
    }

    #[test]
    fn build_and_git_directories_are_skipped() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join(".build/checkouts/Dep/Sources/Dep.swift"));
        touch(&tmp.path().join(".git/hooks/hook.swift"));
        touch(&tmp.path().join("Sources/.build/Nested.swift"));
        touch(&tmp.path().join(".swiftpm/Plugin.swift"));
        touch(&tmp.path().join("Sources/App.swift"));

        let set = collect_sources(tmp.path(), &RunnerConfig::default()).unwrap();
        let files: Vec<PathBuf> = set.iter().map(Path::to_path_buf).collect();
        assert_eq!(
            files,
            vec![
                tmp.path().join(".swiftpm/Plugin.swift"),
                tmp.path().join("Sources/App.swift"),
            ]
        );
    }

    #[test]
    fn target_named_build_is_still_walked() {
        let tmp = TempDir::new().unwrap();
        let target = tmp.path().join(".build");
        touch(&target.join("Generated.swift"));

        let set = collect_sources(&target, &RunnerConfig::default()).unwrap();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn file_target_is_taken_as_is() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("One.swift");
        touch(&file);
        let other = tmp.path().join("notes.txt");
        touch(&other);

        let config = RunnerConfig::default();
        assert_eq!(collect_sources(&file, &config).unwrap().len(), 1);
        assert!(collect_sources(&other, &config).unwrap().is_empty());
    }

    #[test]
    fn empty_directory_yields_empty_set() {
        let tmp = TempDir::new().unwrap();
        assert!(collect_sources(tmp.path(), &RunnerConfig::default())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn missing_target_is_an_error() {
        let err = collect_sources(Path::new("/nonexistent/target"), &RunnerConfig::default())
            .unwrap_err();
        assert!(matches!(err, DiscoveryError::MissingTarget(_)));
    }
}
