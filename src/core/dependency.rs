//! Dependency chain definition
//!
//! The chain is closed and known in advance, so its order is a literal
//! sequence: abseil → protobuf → zlib → gRPC. Each later entry finds the
//! earlier ones through the shared install prefix.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::config::{defaults, urls};
use crate::core::environment::EnvironmentConfig;
use crate::error::ConfigError;

/// CMake build type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BuildType {
    /// Debug build
    Debug,
    /// Optimized build
    Release,
}

impl fmt::Display for BuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Debug => write!(f, "Debug"),
            Self::Release => write!(f, "Release"),
        }
    }
}

/// Archive suffixes recognised on the last URL segment, longest first
pub const ARCHIVE_SUFFIXES: &[&str] = &[".tar.gz", ".tgz"];

/// Whether `url` points at a gzip tarball
pub fn is_archive_url(url: &str) -> bool {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    ARCHIVE_SUFFIXES.iter().any(|suffix| path.ends_with(suffix))
}

/// How the sources are retrieved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// Download a gzip tarball and extract it
    Archive,
    /// Shallow clone of a tag, submodules included
    Repository,
}

impl FetchMode {
    /// Pick the retrieval mode for an untagged URL
    pub fn from_url(url: &str) -> Self {
        let trimmed = url.trim_end_matches('/');
        if trimmed.ends_with(".git") || trimmed.starts_with("git@") || trimmed.starts_with("git://")
        {
            Self::Repository
        } else {
            Self::Archive
        }
    }

    /// Pick the retrieval mode for a URL pinned to a tag
    ///
    /// Anything other than a tarball is cloned at the tag, whatever its suffix.
    pub fn from_tagged_url(url: &str) -> Self {
        if is_archive_url(url) {
            Self::Archive
        } else {
            Self::Repository
        }
    }
}

/// A single `-D<key>=<value>` build flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigureOption {
    /// Cache variable name
    pub key: String,
    /// Value
    pub value: String,
}

impl ConfigureOption {
    /// Create a new option
    pub fn new(key: &str, value: impl Into<String>) -> Self {
        Self {
            key: key.to_string(),
            value: value.into(),
        }
    }

    /// Render as a CMake command-line define
    pub fn to_define(&self) -> String {
        format!("-D{}={}", self.key, self.value)
    }
}

/// One entry of the dependency chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencySpec {
    /// Unique name within the run
    pub name: String,
    /// Archive URL or repository URL
    pub source_url: String,
    /// Tag to check out, for repositories
    pub version_tag: Option<String>,
    /// How the sources are retrieved
    pub fetch_mode: FetchMode,
    /// Library-specific build flags, in order
    pub configure_options: Vec<ConfigureOption>,
    /// Build output folder, relative to the extracted source tree
    pub build_subdir: String,
    /// Build type selection
    pub build_type: BuildType,
    /// C++ standard, when the library is C++
    pub cxx_standard: Option<u32>,
    /// Prefix the extracted directory carries in front of the derived name
    pub source_dir_prefix: Option<String>,
}

impl DependencySpec {
    /// Create a dependency with default build settings
    pub fn new(name: &str, source_url: &str) -> Self {
        Self {
            name: name.to_string(),
            source_url: source_url.to_string(),
            version_tag: None,
            fetch_mode: FetchMode::from_url(source_url),
            configure_options: Vec::new(),
            build_subdir: defaults::DEFAULT_BUILD_SUBDIR.to_string(),
            build_type: BuildType::Debug,
            cxx_standard: Some(defaults::CXX_STANDARD),
            source_dir_prefix: None,
        }
    }

    /// Set the tag to check out
    ///
    /// A tagged source that is not a tarball is cloned.
    #[must_use]
    pub fn with_version_tag(mut self, tag: &str) -> Self {
        self.version_tag = Some(tag.to_string());
        self.fetch_mode = FetchMode::from_tagged_url(&self.source_url);
        self
    }

    /// Force the retrieval mode
    #[must_use]
    pub fn with_fetch_mode(mut self, mode: FetchMode) -> Self {
        self.fetch_mode = mode;
        self
    }

    /// Append a build flag
    #[must_use]
    pub fn with_option(mut self, key: &str, value: impl Into<String>) -> Self {
        self.configure_options.push(ConfigureOption::new(key, value));
        self
    }

    /// Set the build output folder
    #[must_use]
    pub fn with_build_subdir(mut self, subdir: &str) -> Self {
        self.build_subdir = subdir.to_string();
        self
    }

    /// Set the build type
    #[must_use]
    pub fn with_build_type(mut self, build_type: BuildType) -> Self {
        self.build_type = build_type;
        self
    }

    /// Set (or clear) the C++ standard
    #[must_use]
    pub fn with_cxx_standard(mut self, standard: Option<u32>) -> Self {
        self.cxx_standard = standard;
        self
    }

    /// Set the extracted directory prefix
    #[must_use]
    pub fn with_source_dir_prefix(mut self, prefix: &str) -> Self {
        self.source_dir_prefix = Some(prefix.to_string());
        self
    }

    /// Retrieval mode for this dependency
    pub fn fetch_mode(&self) -> FetchMode {
        self.fetch_mode
    }
}

/// User-supplied source locations for the chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceOverrides {
    pub abseil_url: String,
    pub protobuf_url: String,
    pub zlib_url: String,
    pub grpc_url: String,
    pub grpc_version: String,
}

impl Default for SourceOverrides {
    fn default() -> Self {
        Self {
            abseil_url: urls::ABSEIL_URL.to_string(),
            protobuf_url: urls::PROTOBUF_URL.to_string(),
            zlib_url: urls::ZLIB_URL.to_string(),
            grpc_url: urls::GRPC_URL.to_string(),
            grpc_version: urls::GRPC_VERSION.to_string(),
        }
    }
}

/// Build the fixed, ordered dependency chain
pub fn dependency_chain(config: &EnvironmentConfig, sources: &SourceOverrides) -> Vec<DependencySpec> {
    let cc = config.c_compiler.as_str();
    let cxx = config.cpp_compiler.as_str();

    let abseil = DependencySpec::new("abseil", &sources.abseil_url)
        .with_build_subdir("release")
        .with_option("CMAKE_CXX_COMPILER", cxx)
        .with_option("ABSL_BUILD_TESTING", "OFF")
        .with_option("BUILD_TESTING", "OFF")
        .with_option("ABSL_ENABLE_INSTALL", "ON");

    let protobuf = DependencySpec::new("protobuf", &sources.protobuf_url)
        .with_build_subdir("release")
        .with_option("CMAKE_CXX_COMPILER", cxx)
        .with_option("CMAKE_C_COMPILER", cc)
        .with_option("protobuf_ABSL_PROVIDER", "package")
        .with_option("protobuf_BUILD_TESTS", "OFF");

    let zlib = DependencySpec::new("zlib", &sources.zlib_url)
        .with_source_dir_prefix("zlib")
        .with_build_subdir("build")
        .with_build_type(BuildType::Release)
        .with_cxx_standard(None)
        .with_option("CMAKE_C_COMPILER", cc);

    let grpc = DependencySpec::new("grpc", &sources.grpc_url)
        .with_version_tag(&sources.grpc_version)
        .with_build_subdir("cmake/build")
        .with_option("CMAKE_CXX_COMPILER", cxx)
        .with_option("CMAKE_C_COMPILER", cc)
        .with_option("gRPC_INSTALL", "ON")
        .with_option("gRPC_ABSL_PROVIDER", "package")
        .with_option("gRPC_PROTOBUF_PROVIDER", "package")
        .with_option("gRPC_ZLIB_PROVIDER", "package");

    vec![abseil, protobuf, zlib, grpc]
}

/// Check that every dependency name appears once
pub fn validate_unique_names(chain: &[DependencySpec]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for dep in chain {
        if !seen.insert(dep.name.as_str()) {
            return Err(ConfigError::DuplicateDependency {
                name: dep.name.clone(),
            });
        }
    }
    Ok(())
}
