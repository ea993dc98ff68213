//! Core logic module
//!
//! Everything that decides *what* happens during a run. Side effects are
//! delegated to [`crate::infra`], mostly through [`crate::infra::tools::BuildTools`].
//!
//! # Submodules
//!
//! - [`arch`] - Host architecture allow-list
//! - [`environment`] - Run configuration and sanitized tool environment
//! - [`dependency`] - The fixed dependency chain and its build options
//! - [`planner`] - Source/build/install directory layout
//! - [`fetcher`] - Archive or repository retrieval
//! - [`invoker`] - Configure/build/install against the shared prefix
//! - [`orchestrator`] - Ordered, stop-on-first-failure pipeline

pub mod arch;
pub mod dependency;
pub mod environment;
pub mod fetcher;
pub mod invoker;
pub mod orchestrator;
pub mod planner;
