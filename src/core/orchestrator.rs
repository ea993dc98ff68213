//! Dependency orchestration
//!
//! Drives every dependency of the chain through
//! plan → fetch → configure → build → install, strictly in declaration
//! order. The first failure ends the run; nothing after it is attempted.

use std::path::PathBuf;

use serde::Serialize;

use crate::core::arch::HostArch;
use crate::core::dependency::{validate_unique_names, DependencySpec, FetchMode};
use crate::core::environment::{EnvironmentConfig, SanitizedEnv};
use crate::core::fetcher;
use crate::core::invoker::ToolchainInvoker;
use crate::core::planner::{self, DirectoryLayout};
use crate::error::{DepstrapError, Step, ToolFailure};
use crate::infra::filesystem;
use crate::infra::tools::BuildTools;

/// Callback invoked right before a dependency enters a step
pub type StepCallback = Box<dyn Fn(&DependencySpec, Step) + Send + Sync>;

/// Outcome of one fully processed dependency
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyReport {
    /// Dependency name
    pub name: String,
    /// Directories used
    pub layout: DirectoryLayout,
    /// Steps that completed, in order
    pub steps: Vec<Step>,
}

/// Outcome of processing one dependency
pub type BuildResult = Result<DependencyReport, DepstrapError>;

/// Summary of a successful run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// Resolved host architecture
    pub arch: HostArch,
    /// Shared install prefix
    pub install_dir: PathBuf,
    /// Per-dependency results, in processing order
    pub dependencies: Vec<DependencyReport>,
    /// Whether the download directory was removed at the end
    pub download_dir_removed: bool,
}

/// Runs the dependency chain against a [`BuildTools`] implementation
pub struct Orchestrator<'a, T: BuildTools> {
    config: &'a EnvironmentConfig,
    chain: &'a [DependencySpec],
    tools: &'a T,
    env: SanitizedEnv,
    on_step: Option<StepCallback>,
}

impl<'a, T: BuildTools> Orchestrator<'a, T> {
    /// Create an orchestrator using the sanitized current environment
    pub fn new(config: &'a EnvironmentConfig, chain: &'a [DependencySpec], tools: &'a T) -> Self {
        Self {
            config,
            chain,
            tools,
            env: SanitizedEnv::capture(),
            on_step: None,
        }
    }

    /// Use an explicit environment instead of the captured one
    #[must_use]
    pub fn with_env(mut self, env: SanitizedEnv) -> Self {
        self.env = env;
        self
    }

    /// Report step transitions to `callback`
    #[must_use]
    pub fn with_progress(mut self, callback: StepCallback) -> Self {
        self.on_step = Some(callback);
        self
    }

    /// Run the whole chain
    ///
    /// Architecture, name uniqueness and tool availability are checked
    /// before anything touches the filesystem or network.
    pub async fn run(&self) -> Result<RunReport, DepstrapError> {
        let arch = HostArch::from_machine(&self.config.machine)?;
        tracing::info!("Host architecture: {arch}");

        validate_unique_names(self.chain)?;

        let modes: Vec<FetchMode> = self.chain.iter().map(DependencySpec::fetch_mode).collect();
        self.tools
            .check_available(&modes, !self.config.skip_build)?;

        for name in self.env.removed() {
            tracing::info!("Dropping {name} from the build environment");
        }

        if self.config.manage_dirs {
            planner::ensure_roots(self.config)?;
        }

        let mut dependencies = Vec::with_capacity(self.chain.len());
        for dep in self.chain {
            let report = self.process(dep).await?;
            tracing::info!("Finished {}", dep.name);
            dependencies.push(report);
        }

        let download_dir_removed = self.config.manage_dirs && !self.config.skip_build;
        if download_dir_removed {
            tracing::info!("Removing {}", self.config.download_dir.display());
            filesystem::remove_dir_all(&self.config.download_dir)?;
        }

        Ok(RunReport {
            arch,
            install_dir: self.config.install_dir.clone(),
            dependencies,
            download_dir_removed,
        })
    }

    /// Take one dependency through the pipeline
    async fn process(&self, dep: &DependencySpec) -> BuildResult {
        let layout = planner::plan(self.config, dep);
        let mut steps = Vec::with_capacity(Step::ALL.len());
        let failed = |failure: ToolFailure| DepstrapError::DependencyFailed {
            dependency: dep.name.clone(),
            failure,
        };

        tracing::info!("Processing {} from {}", dep.name, dep.source_url);

        self.notify(dep, Step::Fetch);
        fetcher::fetch(self.tools, dep, &layout, &self.config.download_dir, &self.env)
            .await
            .map_err(failed)?;
        steps.push(Step::Fetch);

        if self.config.skip_build {
            return Ok(DependencyReport {
                name: dep.name.clone(),
                layout,
                steps,
            });
        }

        planner::ensure_build_dir(&layout)?;
        let invoker = ToolchainInvoker::new(self.tools, &self.env, self.config.cores);

        self.notify(dep, Step::Configure);
        invoker.configure(dep, &layout).await.map_err(failed)?;
        steps.push(Step::Configure);

        self.notify(dep, Step::Build);
        invoker.build(dep, &layout).await.map_err(failed)?;
        steps.push(Step::Build);

        self.notify(dep, Step::Install);
        invoker.install(&layout).await.map_err(failed)?;
        steps.push(Step::Install);

        Ok(DependencyReport {
            name: dep.name.clone(),
            layout,
            steps,
        })
    }

    fn notify(&self, dep: &DependencySpec, step: Step) {
        tracing::debug!("{}: {step}", dep.name);
        if let Some(callback) = &self.on_step {
            callback(dep, step);
        }
    }
}
