//! External tool interface
//!
//! One method per external capability. The core only ever talks to these
//! methods, so the pipeline can be exercised against a fake implementation.

use std::path::{Path, PathBuf};

use crate::core::dependency::{BuildType, ConfigureOption, FetchMode};
use crate::core::environment::SanitizedEnv;
use crate::error::{ConfigError, ToolFailure};

/// Shallow repository checkout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloneRequest {
    /// Repository URL
    pub url: String,
    /// Tag or branch to check out
    pub tag: Option<String>,
    /// Checkout destination
    pub dest: PathBuf,
}

/// Build plan generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigureRequest {
    /// Source tree
    pub source_dir: PathBuf,
    /// Where the build plan is generated
    pub build_dir: PathBuf,
    /// Every `-D` option, already including build type and prefixes
    pub options: Vec<ConfigureOption>,
}

/// Compilation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRequest {
    /// Configured build directory
    pub build_dir: PathBuf,
    /// Configuration to build
    pub build_type: BuildType,
    /// Parallel jobs
    pub jobs: usize,
}

/// Installation into the shared prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallRequest {
    /// Configured and built directory
    pub build_dir: PathBuf,
}

/// External capabilities needed to bootstrap the dependency chain
///
/// Every call blocks the pipeline until the underlying tool finishes and
/// receives the sanitized environment explicitly.
#[allow(async_fn_in_trait)]
pub trait BuildTools {
    /// Verify the tools a run will need are present, before any side effect
    fn check_available(&self, _modes: &[FetchMode], _build: bool) -> Result<(), ConfigError> {
        Ok(())
    }

    /// Download `url` to the file `dest`
    async fn fetch_archive(
        &self,
        url: &str,
        dest: &Path,
        env: &SanitizedEnv,
    ) -> Result<(), ToolFailure>;

    /// Extract a gzip tarball into `dest_dir`
    async fn extract_archive(
        &self,
        archive: &Path,
        dest_dir: &Path,
        env: &SanitizedEnv,
    ) -> Result<(), ToolFailure>;

    /// Shallow single-revision clone with shallow submodules
    async fn clone_repository(
        &self,
        request: &CloneRequest,
        env: &SanitizedEnv,
    ) -> Result<(), ToolFailure>;

    /// Generate a build plan
    async fn configure_project(
        &self,
        request: &ConfigureRequest,
        env: &SanitizedEnv,
    ) -> Result<(), ToolFailure>;

    /// Compile a configured project
    async fn build_project(
        &self,
        request: &BuildRequest,
        env: &SanitizedEnv,
    ) -> Result<(), ToolFailure>;

    /// Install a built project
    async fn install_project(
        &self,
        request: &InstallRequest,
        env: &SanitizedEnv,
    ) -> Result<(), ToolFailure>;
}
