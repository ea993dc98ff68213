//! Error types for depstrap
//!
//! Domain-specific error types using thiserror.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors, detected before any I/O
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Host CPU architecture is not in the allow-list
    #[error("Unsupported cpu architecture {machine}")]
    UnsupportedArchitecture { machine: String },

    /// Two dependencies share a name
    #[error("Dependency '{name}' is declared more than once")]
    DuplicateDependency { name: String },

    /// Required external program missing from PATH
    #[error("Required tool '{tool}' not found in PATH. {hint}")]
    MissingTool { tool: String, hint: String },
}

/// Download errors
#[derive(Error, Debug)]
pub enum DownloadError {
    /// Network error
    #[error("Network error downloading '{url}': {error}")]
    NetworkError { url: String, error: String },

    /// IO error
    #[error("IO error for '{path}': {error}")]
    IoError { path: PathBuf, error: String },
}

/// Filesystem errors
#[derive(Error, Debug)]
pub enum FilesystemError {
    /// Failed to create directory
    #[error("Failed to create directory '{path}': {error}")]
    CreateDir { path: PathBuf, error: String },

    /// Failed to remove directory
    #[error("Failed to remove directory '{path}': {error}")]
    RemoveDir { path: PathBuf, error: String },
}

/// Pipeline step a dependency goes through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    /// Download + extract, or repository checkout
    Fetch,
    /// Generate the build plan
    Configure,
    /// Compile
    Build,
    /// Copy artifacts into the install prefix
    Install,
}

impl Step {
    /// All steps in pipeline order
    pub const ALL: [Step; 4] = [Step::Fetch, Step::Configure, Step::Build, Step::Install];
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fetch => write!(f, "fetch"),
            Self::Configure => write!(f, "configure"),
            Self::Build => write!(f, "build"),
            Self::Install => write!(f, "install"),
        }
    }
}

/// An external tool (or in-process equivalent) failed
///
/// Carries the failing step, the command line that was attempted and
/// whatever diagnostic output the tool produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{step} step failed: `{command}`")]
pub struct ToolFailure {
    /// Step that failed
    pub step: Step,
    /// Rendered command line
    pub command: String,
    /// Captured stderr/stdout or error description
    pub diagnostics: String,
}

impl ToolFailure {
    /// Create a new tool failure
    pub fn new(step: Step, command: impl Into<String>, diagnostics: impl Into<String>) -> Self {
        Self {
            step,
            command: command.into(),
            diagnostics: diagnostics.into(),
        }
    }
}

/// Top-level depstrap error type
#[derive(Error, Debug)]
pub enum DepstrapError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Filesystem error
    #[error("Filesystem error: {0}")]
    Filesystem(#[from] FilesystemError),

    /// A dependency's pipeline failed
    #[error("Dependency '{dependency}' failed: {failure}")]
    DependencyFailed {
        dependency: String,
        failure: ToolFailure,
    },
}

impl DepstrapError {
    /// The tool failure behind this error, if any
    pub fn tool_failure(&self) -> Option<&ToolFailure> {
        match self {
            Self::DependencyFailed { failure, .. } => Some(failure),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_display() {
        assert_eq!(Step::Fetch.to_string(), "fetch");
        assert_eq!(Step::Configure.to_string(), "configure");
        assert_eq!(Step::Build.to_string(), "build");
        assert_eq!(Step::Install.to_string(), "install");
    }

    #[test]
    fn test_unsupported_architecture_message() {
        let err = ConfigError::UnsupportedArchitecture {
            machine: "riscv64".to_string(),
        };
        assert_eq!(err.to_string(), "Unsupported cpu architecture riscv64");
    }

    #[test]
    fn test_dependency_failed_exposes_tool_failure() {
        let failure = ToolFailure::new(Step::Build, "cmake --build x", "boom");
        let err = DepstrapError::DependencyFailed {
            dependency: "zlib".to_string(),
            failure: failure.clone(),
        };
        assert_eq!(err.tool_failure(), Some(&failure));
        assert!(err.to_string().contains("zlib"));
        assert!(err.to_string().contains("cmake --build x"));
    }
}
