//! Source retrieval
//!
//! Picks archive or repository mode from the URL shape and drives the
//! matching [`BuildTools`] calls.

use std::path::Path;

use crate::core::dependency::{DependencySpec, FetchMode};
use crate::core::environment::SanitizedEnv;
use crate::core::planner::DirectoryLayout;
use crate::error::{Step, ToolFailure};
use crate::infra::tools::{BuildTools, CloneRequest};

/// Retrieve the sources of `dep` into `download_dir`
///
/// Archive mode downloads to the planned archive path and extracts next to
/// it; repository mode clones straight into the planned source directory.
pub async fn fetch<T: BuildTools>(
    tools: &T,
    dep: &DependencySpec,
    layout: &DirectoryLayout,
    download_dir: &Path,
    env: &SanitizedEnv,
) -> Result<(), ToolFailure> {
    match dep.fetch_mode() {
        FetchMode::Archive => {
            let archive = layout.archive_path.as_deref().ok_or_else(|| {
                ToolFailure::new(
                    Step::Fetch,
                    format!("fetch {}", dep.source_url),
                    "no archive path planned for archive source",
                )
            })?;
            tools.fetch_archive(&dep.source_url, archive, env).await?;
            tools.extract_archive(archive, download_dir, env).await
        }
        FetchMode::Repository => {
            let request = CloneRequest {
                url: dep.source_url.clone(),
                tag: dep.version_tag.clone(),
                dest: layout.source_dir.clone(),
            };
            tools.clone_repository(&request, env).await
        }
    }
}
