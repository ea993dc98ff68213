//! Toolchain invocation
//!
//! Configure, build and install one dependency against the shared prefix.
//! Each step waits for the previous one to finish.

use crate::core::dependency::{ConfigureOption, DependencySpec};
use crate::core::environment::SanitizedEnv;
use crate::core::planner::DirectoryLayout;
use crate::error::ToolFailure;
use crate::infra::tools::{BuildRequest, BuildTools, ConfigureRequest, InstallRequest};

/// Compose the configure request for `dep`
///
/// The library's own options come first, followed by build type, C++
/// standard, and the install prefix as both search path and destination.
pub fn configure_request(dep: &DependencySpec, layout: &DirectoryLayout) -> ConfigureRequest {
    let prefix = layout.install_dir.display().to_string();

    let mut options = dep.configure_options.clone();
    options.push(ConfigureOption::new("CMAKE_BUILD_TYPE", dep.build_type.to_string()));
    if let Some(standard) = dep.cxx_standard {
        options.push(ConfigureOption::new("CMAKE_CXX_STANDARD", standard.to_string()));
    }
    options.push(ConfigureOption::new("CMAKE_PREFIX_PATH", prefix.clone()));
    options.push(ConfigureOption::new("CMAKE_INSTALL_PREFIX", prefix));

    ConfigureRequest {
        source_dir: layout.source_dir.clone(),
        build_dir: layout.build_dir.clone(),
        options,
    }
}

/// Runs the native toolchain for one dependency
pub struct ToolchainInvoker<'a, T: BuildTools> {
    tools: &'a T,
    env: &'a SanitizedEnv,
    jobs: usize,
}

impl<'a, T: BuildTools> ToolchainInvoker<'a, T> {
    /// Create an invoker using `jobs` parallel build jobs
    pub fn new(tools: &'a T, env: &'a SanitizedEnv, jobs: usize) -> Self {
        Self { tools, env, jobs }
    }

    /// Generate the build plan
    pub async fn configure(
        &self,
        dep: &DependencySpec,
        layout: &DirectoryLayout,
    ) -> Result<(), ToolFailure> {
        self.tools
            .configure_project(&configure_request(dep, layout), self.env)
            .await
    }

    /// Compile
    pub async fn build(
        &self,
        dep: &DependencySpec,
        layout: &DirectoryLayout,
    ) -> Result<(), ToolFailure> {
        let request = BuildRequest {
            build_dir: layout.build_dir.clone(),
            build_type: dep.build_type,
            jobs: self.jobs,
        };
        self.tools.build_project(&request, self.env).await
    }

    /// Install into the shared prefix
    pub async fn install(&self, layout: &DirectoryLayout) -> Result<(), ToolFailure> {
        let request = InstallRequest {
            build_dir: layout.build_dir.clone(),
        };
        self.tools.install_project(&request, self.env).await
    }
}
