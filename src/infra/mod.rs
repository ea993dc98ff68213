//! Infrastructure layer
//!
//! Handles all I/O operations: network, archives, filesystem, and external
//! processes. [`tools::BuildTools`] is the seam the core drives;
//! [`system::SystemTools`] is its real implementation.

pub mod archive;
pub mod cmake;
pub mod download;
pub mod filesystem;
pub mod git;
pub mod process;
pub mod system;
pub mod tools;
