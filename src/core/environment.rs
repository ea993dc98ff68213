//! Run environment
//!
//! [`EnvironmentConfig`] is the process-wide configuration resolved once
//! from user input. [`SanitizedEnv`] is the environment handed to every
//! external tool, computed once with the variables that break native
//! compilation removed.

use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use crate::config::defaults;

/// Process-wide configuration, immutable once a run starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentConfig {
    /// Absolute root directory of the operation
    pub root_dir: PathBuf,
    /// Where archives are downloaded and sources extracted
    pub download_dir: PathBuf,
    /// Shared install prefix
    pub install_dir: PathBuf,
    /// Build output directory of the consuming project
    pub build_output_dir: PathBuf,
    /// C compiler identifier
    pub c_compiler: String,
    /// C++ compiler identifier
    pub cpp_compiler: String,
    /// Parallel jobs passed to the build step
    pub cores: usize,
    /// Create scratch directories up front and remove downloads at the end
    pub manage_dirs: bool,
    /// Fetch sources only, never configure/build/install
    pub skip_build: bool,
    /// Host machine name fed to the architecture gate
    pub machine: String,
}

impl EnvironmentConfig {
    /// Create a configuration rooted at `root_dir` with default settings
    ///
    /// A relative root is made absolute against the current directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        let root_dir = absolutize(root_dir.into());
        Self {
            download_dir: root_dir.join(defaults::DEFAULT_DOWNLOAD_DIR),
            install_dir: root_dir.join(defaults::DEFAULT_INSTALL_DIR),
            build_output_dir: root_dir.join(defaults::DEFAULT_BUILD_OUTPUT_DIR),
            root_dir,
            c_compiler: defaults::DEFAULT_C_COMPILER.to_string(),
            cpp_compiler: defaults::DEFAULT_CPP_COMPILER.to_string(),
            cores: defaults::DEFAULT_CORES_TO_USE,
            manage_dirs: true,
            skip_build: false,
            machine: crate::core::arch::detect_machine().to_string(),
        }
    }

    /// Set the download directory (relative paths resolve under the root)
    #[must_use]
    pub fn with_download_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.download_dir = self.root_dir.join(dir);
        self
    }

    /// Set the install directory (relative paths resolve under the root)
    #[must_use]
    pub fn with_install_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.install_dir = self.root_dir.join(dir);
        self
    }

    /// Set the build output directory (relative paths resolve under the root)
    #[must_use]
    pub fn with_build_output_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.build_output_dir = self.root_dir.join(dir);
        self
    }

    /// Set the C and C++ compilers
    #[must_use]
    pub fn with_compilers(mut self, c_compiler: &str, cpp_compiler: &str) -> Self {
        self.c_compiler = c_compiler.to_string();
        self.cpp_compiler = cpp_compiler.to_string();
        self
    }

    /// Set the number of parallel jobs; `0` means every available CPU
    #[must_use]
    pub fn with_cores(mut self, cores: usize) -> Self {
        self.cores = if cores == 0 { num_cpus::get() } else { cores };
        self
    }

    /// Enable or disable directory auto-management
    #[must_use]
    pub fn with_manage_dirs(mut self, manage_dirs: bool) -> Self {
        self.manage_dirs = manage_dirs;
        self
    }

    /// Skip the configure/build/install phase
    #[must_use]
    pub fn with_skip_build(mut self, skip_build: bool) -> Self {
        self.skip_build = skip_build;
        self
    }

    /// Override the detected host machine name
    #[must_use]
    pub fn with_machine(mut self, machine: &str) -> Self {
        self.machine = machine.to_string();
        self
    }
}

fn absolutize(path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        return path;
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => path,
    }
}

/// Environment passed to every external invocation
///
/// Built once before any dependency is processed. The ambient process
/// environment is never mutated; subprocesses are started from this map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SanitizedEnv {
    vars: BTreeMap<OsString, OsString>,
    removed: Vec<String>,
}

impl SanitizedEnv {
    /// Snapshot the current process environment minus the interfering variables
    pub fn capture() -> Self {
        Self::from_vars(std::env::vars_os())
    }

    /// Build from an explicit set of variables minus the interfering ones
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<OsString>,
        V: Into<OsString>,
    {
        let mut map: BTreeMap<OsString, OsString> = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();

        let removed = defaults::INTERFERING_ENV_VARS
            .iter()
            .filter(|name| map.remove(OsStr::new(name)).is_some())
            .map(|name| (*name).to_string())
            .collect();

        Self { vars: map, removed }
    }

    /// Iterate over the variables
    pub fn vars(&self) -> impl Iterator<Item = (&OsStr, &OsStr)> {
        self.vars.iter().map(|(k, v)| (k.as_os_str(), v.as_os_str()))
    }

    /// Look up a variable
    pub fn get(&self, name: &str) -> Option<&OsStr> {
        self.vars.get(OsStr::new(name)).map(OsString::as_os_str)
    }

    /// Whether a variable is present
    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(OsStr::new(name))
    }

    /// Interfering variables that were present and got dropped
    pub fn removed(&self) -> &[String] {
        &self.removed
    }
}
