//! Real external tools
//!
//! Downloads over HTTP, extracts in-process, and shells out to `git` and
//! `cmake` for everything else.

use std::path::Path;

use crate::core::dependency::FetchMode;
use crate::core::environment::SanitizedEnv;
use crate::error::{ConfigError, Step, ToolFailure};
use crate::infra::download::DownloadManager;
use crate::infra::tools::{
    BuildRequest, BuildTools, CloneRequest, ConfigureRequest, InstallRequest,
};
use crate::infra::{archive, cmake, git, process};

/// Install hints for the programs a run can need
const TOOL_HINTS: &[(&str, &str)] = &[
    (cmake::CMAKE, "Install CMake from https://cmake.org/download/ or your package manager."),
    (git::GIT, "Install git from https://git-scm.com/ or your package manager."),
];

/// [`BuildTools`] backed by the network, the filesystem and subprocesses
#[derive(Debug, Clone, Default)]
pub struct SystemTools {
    downloads: DownloadManager,
}

impl SystemTools {
    /// Create the real tool set
    pub fn new() -> Self {
        Self::default()
    }
}

/// Programs needed for the given fetch modes and build phase
pub fn required_programs(modes: &[FetchMode], build: bool) -> Vec<&'static str> {
    let mut programs = Vec::new();
    if modes.contains(&FetchMode::Repository) {
        programs.push(git::GIT);
    }
    if build {
        programs.push(cmake::CMAKE);
    }
    programs
}

/// Fail if `program` cannot be found on `PATH`
pub fn ensure_program(program: &str) -> Result<(), ConfigError> {
    which::which(program).map(|_| ()).map_err(|_| {
        let hint = TOOL_HINTS
            .iter()
            .find(|(name, _)| *name == program)
            .map_or("", |(_, hint)| *hint);
        ConfigError::MissingTool {
            tool: program.to_string(),
            hint: hint.to_string(),
        }
    })
}

impl BuildTools for SystemTools {
    fn check_available(&self, modes: &[FetchMode], build: bool) -> Result<(), ConfigError> {
        required_programs(modes, build)
            .into_iter()
            .try_for_each(ensure_program)
    }

    async fn fetch_archive(
        &self,
        url: &str,
        dest: &Path,
        _env: &SanitizedEnv,
    ) -> Result<(), ToolFailure> {
        let command = format!("GET {url} -> {}", dest.display());
        tracing::info!("Downloading {url}");

        let result = self
            .downloads
            .download(url, dest)
            .await
            .map_err(|e| ToolFailure::new(Step::Fetch, &command, e.to_string()))?;

        tracing::info!(
            "Downloaded {} ({} bytes, sha256 {})",
            result.path.display(),
            result.size,
            result.checksum
        );
        Ok(())
    }

    async fn extract_archive(
        &self,
        archive: &Path,
        dest_dir: &Path,
        _env: &SanitizedEnv,
    ) -> Result<(), ToolFailure> {
        let command = format!("extract {} -> {}", archive.display(), dest_dir.display());
        tracing::info!("Extracting {}", archive.display());

        let (archive_path, dest_path) = (archive.to_path_buf(), dest_dir.to_path_buf());
        tokio::task::spawn_blocking(move || archive::extract_tar_gz(&archive_path, &dest_path))
            .await
            .map_err(|e| ToolFailure::new(Step::Fetch, &command, e.to_string()))?
            .map_err(|e| ToolFailure::new(Step::Fetch, &command, e.to_string()))
    }

    async fn clone_repository(
        &self,
        request: &CloneRequest,
        env: &SanitizedEnv,
    ) -> Result<(), ToolFailure> {
        process::run(git::GIT, &git::clone_args(request), env, Step::Fetch).await
    }

    async fn configure_project(
        &self,
        request: &ConfigureRequest,
        env: &SanitizedEnv,
    ) -> Result<(), ToolFailure> {
        process::run(cmake::CMAKE, &cmake::configure_args(request), env, Step::Configure).await
    }

    async fn build_project(
        &self,
        request: &BuildRequest,
        env: &SanitizedEnv,
    ) -> Result<(), ToolFailure> {
        process::run(cmake::CMAKE, &cmake::build_args(request), env, Step::Build).await
    }

    async fn install_project(
        &self,
        request: &InstallRequest,
        env: &SanitizedEnv,
    ) -> Result<(), ToolFailure> {
        process::run(cmake::CMAKE, &cmake::install_args(request), env, Step::Install).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_required_programs() {
        assert_eq!(
            required_programs(&[FetchMode::Archive, FetchMode::Repository], true),
            ["git", "cmake"]
        );
        assert_eq!(required_programs(&[FetchMode::Archive], true), ["cmake"]);
        assert!(required_programs(&[FetchMode::Archive], false).is_empty());
    }

    #[test]
    fn test_ensure_program_missing() {
        let err = ensure_program("depstrap-definitely-missing-tool").unwrap_err();
        assert!(matches!(err, ConfigError::MissingTool { ref tool, .. } if tool == "depstrap-definitely-missing-tool"));
    }

    #[tokio::test]
    async fn test_fetch_archive_failure_is_fetch_step() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1.3.tar.gz"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let temp = TempDir::new().unwrap();
        let tools = SystemTools::new();
        let env = SanitizedEnv::default();
        let err = tools
            .fetch_archive(
                &format!("{}/v1.3.tar.gz", mock_server.uri()),
                &temp.path().join("v1.3.tar.gz"),
                &env,
            )
            .await
            .unwrap_err();

        assert_eq!(err.step, Step::Fetch);
        assert!(err.diagnostics.contains("500"));
    }

    #[tokio::test]
    async fn test_extract_archive_failure_is_fetch_step() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("broken.tar.gz");
        std::fs::write(&archive, b"garbage").unwrap();

        let err = SystemTools::new()
            .extract_archive(&archive, temp.path(), &SanitizedEnv::default())
            .await
            .unwrap_err();
        assert_eq!(err.step, Step::Fetch);
        assert!(err.command.contains("broken.tar.gz"));
    }
}
