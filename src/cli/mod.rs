//! Command-line interface module
//!
//! This module handles argument parsing and output formatting.
//! It contains no pipeline logic - that belongs in the [`crate::core`] module.

pub mod output;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::config::{defaults, urls};
use crate::core::dependency::{dependency_chain, DependencySpec, SourceOverrides};
use crate::core::environment::EnvironmentConfig;
use crate::core::orchestrator::Orchestrator;
use crate::error::Step;
use crate::infra::system::SystemTools;
use output::{create_spinner, OutputConfig};

/// Version string with build metadata
const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("VERGEN_GIT_SHA"),
    ", ",
    env!("VERGEN_CARGO_TARGET_TRIPLE"),
    ", built ",
    env!("VERGEN_BUILD_TIMESTAMP"),
    ")"
);

/// Yes/no switch, kept as a value for compatibility with existing scripts
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum YesNo {
    Yes,
    No,
}

/// Depstrap - set up the native dependency chain for local development
///
/// Requires git, a C/C++ compiler and cmake to be installed.
#[derive(Parser, Debug)]
#[command(name = "depstrap")]
#[command(author, version, long_version = LONG_VERSION, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print the run report as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Root directory for the operation
    #[arg(long, env = "DEPSTRAP_ROOT_DIR", default_value = defaults::DEFAULT_ROOT_DIR)]
    pub root_dir: PathBuf,

    /// Directory for downloads (relative to the root directory)
    #[arg(long, env = "DEPSTRAP_DOWNLOAD_DIR", default_value = defaults::DEFAULT_DOWNLOAD_DIR)]
    pub download_dir: PathBuf,

    /// Shared install prefix (relative to the root directory)
    #[arg(long, env = "DEPSTRAP_INSTALL_DIR", default_value = defaults::DEFAULT_INSTALL_DIR)]
    pub install_dir: PathBuf,

    /// Build output directory of the consuming project (relative to the root directory)
    #[arg(long, env = "DEPSTRAP_BUILD_OUTPUT_DIR", default_value = defaults::DEFAULT_BUILD_OUTPUT_DIR)]
    pub build_output_dir: PathBuf,

    /// Fetch sources only; skip CMake configuration, build and install
    #[arg(long)]
    pub do_not_run_cmake: bool,

    /// Create scratch directories up front and remove downloads after a successful build
    /// (downloads are kept with --do-not-run-cmake)
    #[arg(long, value_enum, env = "DEPSTRAP_CREATE_DIRS", default_value = "yes")]
    pub create_dirs: YesNo,

    /// URL for abseil
    #[arg(long, env = "DEPSTRAP_ABSEIL_URL", default_value = urls::ABSEIL_URL)]
    pub abseil_url: String,

    /// URL for protobuf
    #[arg(long, env = "DEPSTRAP_PROTOBUF_URL", default_value = urls::PROTOBUF_URL)]
    pub protobuf_url: String,

    /// URL for zlib
    #[arg(long, env = "DEPSTRAP_ZLIB_URL", default_value = urls::ZLIB_URL)]
    pub zlib_url: String,

    /// URL for gRPC
    #[arg(long, env = "DEPSTRAP_GRPC_URL", default_value = urls::GRPC_URL)]
    pub grpc_url: String,

    /// gRPC version tag
    #[arg(long, env = "DEPSTRAP_GRPC_VERSION", default_value = urls::GRPC_VERSION)]
    pub grpc_version: String,

    /// C compiler
    #[arg(long, env = "DEPSTRAP_C_COMPILER", default_value = defaults::DEFAULT_C_COMPILER)]
    pub c_compiler: String,

    /// C++ compiler
    #[arg(long, env = "DEPSTRAP_CPP_COMPILER", default_value = defaults::DEFAULT_CPP_COMPILER)]
    pub cpp_compiler: String,

    /// Number of cores to use when building (0 = all available)
    #[arg(long, env = "DEPSTRAP_CORES_TO_USE", default_value_t = defaults::DEFAULT_CORES_TO_USE)]
    pub cores_to_use: usize,

    /// Override the detected host machine name
    #[arg(long, env = "DEPSTRAP_HOST_MACHINE", hide = true)]
    pub host_machine: Option<String>,
}

impl Cli {
    /// Resolve the run configuration from the parsed arguments
    pub fn environment_config(&self) -> EnvironmentConfig {
        let config = EnvironmentConfig::new(&self.root_dir)
            .with_download_dir(&self.download_dir)
            .with_install_dir(&self.install_dir)
            .with_build_output_dir(&self.build_output_dir)
            .with_compilers(&self.c_compiler, &self.cpp_compiler)
            .with_cores(self.cores_to_use)
            .with_manage_dirs(self.create_dirs == YesNo::Yes)
            .with_skip_build(self.do_not_run_cmake);

        match &self.host_machine {
            Some(machine) => config.with_machine(machine),
            None => config,
        }
    }

    /// Source locations for the chain
    pub fn sources(&self) -> SourceOverrides {
        SourceOverrides {
            abseil_url: self.abseil_url.clone(),
            protobuf_url: self.protobuf_url.clone(),
            zlib_url: self.zlib_url.clone(),
            grpc_url: self.grpc_url.clone(),
            grpc_version: self.grpc_version.clone(),
        }
    }

    /// Execute the bootstrap run
    pub async fn run(self, output: &OutputConfig) -> Result<()> {
        let config = self.environment_config();
        let chain = dependency_chain(&config, &self.sources());
        let tools = SystemTools::new();

        tracing::info!(
            "Bootstrapping {} dependencies into {}",
            chain.len(),
            config.install_dir.display()
        );

        let spinner = output.show_progress().then(|| create_spinner("Starting"));
        let mut orchestrator = Orchestrator::new(&config, &chain, &tools);
        if let Some(pb) = &spinner {
            let pb = pb.clone();
            orchestrator = orchestrator.with_progress(Box::new(
                move |dep: &DependencySpec, step: Step| {
                    pb.set_message(format!("{}: {step}", dep.name));
                },
            ));
        }

        let result = orchestrator.run().await;
        if let Some(pb) = spinner {
            pb.finish_and_clear();
        }

        output.print_report(&result?)
    }
}
