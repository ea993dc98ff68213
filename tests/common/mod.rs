//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tempfile::TempDir;

use depstrap::core::dependency::{dependency_chain, DependencySpec, FetchMode, SourceOverrides};
use depstrap::core::environment::{EnvironmentConfig, SanitizedEnv};
use depstrap::core::planner;
use depstrap::error::{Step, ToolFailure};
use depstrap::infra::tools::{
    BuildRequest, BuildTools, CloneRequest, ConfigureRequest, InstallRequest,
};

/// Test workspace context
///
/// Creates a temporary root directory for a bootstrap run.
pub struct TestProject {
    /// Temporary directory used as the root
    pub dir: TempDir,
}

impl TestProject {
    /// Create a new test workspace in a temporary directory
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Get the path to the workspace root
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Configuration rooted in this workspace, on a supported host
    pub fn config(&self) -> EnvironmentConfig {
        EnvironmentConfig::new(self.path()).with_machine("x86_64")
    }

    /// Number of entries directly under the root
    pub fn entry_count(&self) -> usize {
        std::fs::read_dir(self.dir.path())
            .expect("Failed to read temp directory")
            .count()
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

/// Default chain for a configuration
pub fn default_chain(config: &EnvironmentConfig) -> Vec<DependencySpec> {
    dependency_chain(config, &SourceOverrides::default())
}

/// Environment as an invoking shell with stale compiler variables would have it
pub fn polluted_env() -> SanitizedEnv {
    SanitizedEnv::from_vars([
        ("PATH", "/usr/bin:/bin"),
        ("HOME", "/home/dev"),
        ("SDKROOT", "/Applications/Xcode.app/SDKs/MacOSX.sdk"),
        ("CPATH", "/opt/stale/include"),
        ("LIBRARY_PATH", "/opt/stale/lib"),
    ])
}

/// One recorded external invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    FetchArchive(String),
    Extract(PathBuf),
    Clone(String),
    Configure(PathBuf),
    Build(PathBuf),
    Install(PathBuf),
}

impl Call {
    /// Pipeline step this invocation belongs to
    pub fn step(&self) -> Step {
        match self {
            Call::FetchArchive(_) | Call::Extract(_) | Call::Clone(_) => Step::Fetch,
            Call::Configure(_) => Step::Configure,
            Call::Build(_) => Step::Build,
            Call::Install(_) => Step::Install,
        }
    }
}

/// Calls a full, successful run of `chain` is expected to make
pub fn expected_calls(config: &EnvironmentConfig, chain: &[DependencySpec]) -> Vec<Call> {
    let mut calls = Vec::new();
    for dep in chain {
        let layout = planner::plan(config, dep);
        match dep.fetch_mode() {
            FetchMode::Archive => {
                calls.push(Call::FetchArchive(dep.source_url.clone()));
                calls.push(Call::Extract(layout.archive_path.clone().expect("archive path")));
            }
            FetchMode::Repository => calls.push(Call::Clone(dep.source_url.clone())),
        }
        calls.push(Call::Configure(layout.source_dir.clone()));
        calls.push(Call::Build(layout.build_dir.clone()));
        calls.push(Call::Install(layout.build_dir.clone()));
    }
    calls
}

/// Fake [`BuildTools`] that records every call and can fail the n-th build
#[derive(Default)]
pub struct RecordingTools {
    calls: Mutex<Vec<Call>>,
    envs: Mutex<Vec<SanitizedEnv>>,
    configures: Mutex<Vec<ConfigureRequest>>,
    builds: AtomicUsize,
    fail_build_at: Option<usize>,
}

impl RecordingTools {
    /// Fake where every call succeeds
    pub fn new() -> Self {
        Self::default()
    }

    /// Fake whose `n`-th build call (1-based) fails
    pub fn failing_build(n: usize) -> Self {
        Self {
            fail_build_at: Some(n),
            ..Self::default()
        }
    }

    /// Recorded calls, in order
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Environment seen by each call, in order
    pub fn envs(&self) -> Vec<SanitizedEnv> {
        self.envs.lock().unwrap().clone()
    }

    /// Configure requests, in order
    pub fn configures(&self) -> Vec<ConfigureRequest> {
        self.configures.lock().unwrap().clone()
    }

    fn record(&self, call: Call, env: &SanitizedEnv) {
        self.calls.lock().unwrap().push(call);
        self.envs.lock().unwrap().push(env.clone());
    }
}

impl BuildTools for RecordingTools {
    async fn fetch_archive(
        &self,
        url: &str,
        _dest: &Path,
        env: &SanitizedEnv,
    ) -> Result<(), ToolFailure> {
        self.record(Call::FetchArchive(url.to_string()), env);
        Ok(())
    }

    async fn extract_archive(
        &self,
        archive: &Path,
        _dest_dir: &Path,
        env: &SanitizedEnv,
    ) -> Result<(), ToolFailure> {
        self.record(Call::Extract(archive.to_path_buf()), env);
        Ok(())
    }

    async fn clone_repository(
        &self,
        request: &CloneRequest,
        env: &SanitizedEnv,
    ) -> Result<(), ToolFailure> {
        self.record(Call::Clone(request.url.clone()), env);
        Ok(())
    }

    async fn configure_project(
        &self,
        request: &ConfigureRequest,
        env: &SanitizedEnv,
    ) -> Result<(), ToolFailure> {
        self.record(Call::Configure(request.source_dir.clone()), env);
        self.configures.lock().unwrap().push(request.clone());
        Ok(())
    }

    async fn build_project(
        &self,
        request: &BuildRequest,
        env: &SanitizedEnv,
    ) -> Result<(), ToolFailure> {
        self.record(Call::Build(request.build_dir.clone()), env);
        let n = self.builds.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_build_at == Some(n) {
            return Err(ToolFailure::new(
                Step::Build,
                format!("cmake --build {}", request.build_dir.display()),
                "error: simulated compiler failure",
            ));
        }
        Ok(())
    }

    async fn install_project(
        &self,
        request: &InstallRequest,
        env: &SanitizedEnv,
    ) -> Result<(), ToolFailure> {
        self.record(Call::Install(request.build_dir.clone()), env);
        Ok(())
    }
}

/// Gzip tarball whose entries all live under `top_dir/`
pub fn tarball(top_dir: &str, files: &[(&str, &str)]) -> Vec<u8> {
    use flate2::write::GzEncoder;
    use flate2::Compression;

    let mut builder = tar::Builder::new(GzEncoder::new(Vec::new(), Compression::default()));
    for (name, content) in files {
        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        builder
            .append_data(&mut header, format!("{top_dir}/{name}"), content.as_bytes())
            .expect("Failed to append tar entry");
    }
    builder
        .into_inner()
        .and_then(GzEncoder::finish)
        .expect("Failed to finish tarball")
}
