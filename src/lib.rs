//! Depstrap - native dependency bootstrapper
//!
//! Fetches, configures, builds and installs a fixed chain of C/C++
//! libraries (abseil, protobuf, zlib, gRPC) into one shared install prefix
//! so a larger project can compile against them.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`cli`] - Command-line interface parsing and output formatting
//! - [`core`] - Planning, ordering and the stop-on-first-failure pipeline
//! - [`infra`] - Infrastructure layer (network, archives, processes, filesystem)
//! - [`config`] - Default values and upstream URLs
//! - [`error`] - Error types and handling

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod infra;

#[cfg(test)]
pub mod test_utils;
