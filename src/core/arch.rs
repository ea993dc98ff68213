//! Host architecture gate
//!
//! Resolves the host machine name through a small allow-list. Anything
//! outside the list aborts the run before any directory or network access.

use std::fmt;

use serde::Serialize;

use crate::error::ConfigError;

/// Recognized machine spellings and the family they map to
const ARCH_ALLOW_LIST: &[(&str, HostArch)] = &[
    ("x86_64", HostArch::X86_64),
    ("AMD64", HostArch::X86_64),
    ("aarch64", HostArch::Aarch64),
    ("arm64", HostArch::Aarch64),
];

/// Supported host CPU families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HostArch {
    /// 64-bit x86
    X86_64,
    /// 64-bit ARM
    Aarch64,
}

impl HostArch {
    /// Resolve a machine name (as reported by the OS) to a supported family
    pub fn from_machine(machine: &str) -> Result<Self, ConfigError> {
        ARCH_ALLOW_LIST
            .iter()
            .find(|(spelling, _)| *spelling == machine)
            .map(|(_, arch)| *arch)
            .ok_or_else(|| ConfigError::UnsupportedArchitecture {
                machine: machine.to_string(),
            })
    }
}

impl fmt::Display for HostArch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostArch::X86_64 => write!(f, "x86_64"),
            HostArch::Aarch64 => write!(f, "aarch64"),
        }
    }
}

/// Machine name of the running host
pub fn detect_machine() -> &'static str {
    std::env::consts::ARCH
}
