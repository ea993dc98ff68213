//! Directory planning
//!
//! Derives the source, build and install paths of a dependency. Path
//! derivation is pure; directory creation is a separate, idempotent step.

use std::path::PathBuf;

use serde::Serialize;

use crate::core::dependency::{DependencySpec, FetchMode, ARCHIVE_SUFFIXES};
use crate::core::environment::EnvironmentConfig;
use crate::error::FilesystemError;
use crate::infra::filesystem;

/// Leading character some upstreams put in front of release tags
const VERSION_PREFIX: char = 'v';

/// Paths used while processing one dependency
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryLayout {
    /// Downloaded archive, for archive-mode dependencies
    pub archive_path: Option<PathBuf>,
    /// Extracted (or cloned) source tree
    pub source_dir: PathBuf,
    /// Build output, nested under the source tree
    pub build_dir: PathBuf,
    /// Shared install prefix
    pub install_dir: PathBuf,
}

/// Final path segment of a URL, without query or fragment
pub fn archive_file_name(url: &str) -> &str {
    let url = url.split(['?', '#']).next().unwrap_or(url);
    url.trim_end_matches('/').rsplit('/').next().unwrap_or(url)
}

/// Derive the extracted directory name from an archive URL
///
/// The archive suffix is removed from the last path segment, then a single
/// leading `v` is dropped if present.
///
/// ```
/// use depstrap::core::planner::source_dir_name;
///
/// assert_eq!(
///     source_dir_name("https://example.com/abseil-cpp-20240722.0.tar.gz"),
///     "abseil-cpp-20240722.0"
/// );
/// assert_eq!(source_dir_name("https://example.com/v1.3.tar.gz"), "1.3");
/// ```
pub fn source_dir_name(url: &str) -> String {
    let file_name = archive_file_name(url);
    let stem = ARCHIVE_SUFFIXES
        .iter()
        .find_map(|suffix| file_name.strip_suffix(suffix))
        .unwrap_or(file_name);
    stem.strip_prefix(VERSION_PREFIX).unwrap_or(stem).to_string()
}

/// Compute the directory layout of a dependency (no I/O)
pub fn plan(config: &EnvironmentConfig, dep: &DependencySpec) -> DirectoryLayout {
    let (archive_path, source_dir) = match dep.fetch_mode() {
        FetchMode::Archive => {
            let name = source_dir_name(&dep.source_url);
            let dir_name = match &dep.source_dir_prefix {
                Some(prefix) => format!("{prefix}-{name}"),
                None => name,
            };
            (
                Some(config.download_dir.join(archive_file_name(&dep.source_url))),
                config.download_dir.join(dir_name),
            )
        }
        FetchMode::Repository => (None, config.download_dir.join(&dep.name)),
    };

    DirectoryLayout {
        archive_path,
        build_dir: source_dir.join(&dep.build_subdir),
        source_dir,
        install_dir: config.install_dir.clone(),
    }
}

/// Make sure the build output directory exists
pub fn ensure_build_dir(layout: &DirectoryLayout) -> Result<(), FilesystemError> {
    filesystem::create_dir_all(&layout.build_dir)
}

/// Create the shared download and install roots
///
/// The consuming project's build output directory is left alone.
pub fn ensure_roots(config: &EnvironmentConfig) -> Result<(), FilesystemError> {
    for dir in [&config.download_dir, &config.install_dir] {
        filesystem::create_dir_all(dir)?;
    }
    Ok(())
}
