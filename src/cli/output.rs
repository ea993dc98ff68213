//! Output formatting and progress indicators
//!
//! This module provides utilities for displaying progress spinners,
//! the final run report and formatted error messages.

use std::io::{self, Write};

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};

use crate::core::orchestrator::RunReport;
use crate::error::DepstrapError;

/// Output settings derived from the global flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputConfig {
    /// Suppress everything except errors
    pub quiet: bool,
    /// Emit the report as JSON
    pub json: bool,
    /// Verbosity level (number of -v)
    pub verbose: u8,
}

impl OutputConfig {
    /// Create output settings
    pub fn new(quiet: bool, json: bool, verbose: u8) -> Self {
        Self {
            quiet,
            json,
            verbose,
        }
    }

    /// Default log level for these settings
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            return tracing::Level::ERROR;
        }
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            _ => tracing::Level::DEBUG,
        }
    }

    /// Install the global tracing subscriber, writing to stderr
    pub fn init_tracing(&self) {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::from_default_env()
                    .add_directive(self.log_level().into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }

    /// Whether a spinner should be drawn
    pub fn show_progress(&self) -> bool {
        !self.quiet && !self.json && self.verbose == 0
    }

    /// Print the outcome of a successful run
    pub fn print_report(&self, report: &RunReport) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(report)?);
            return Ok(());
        }
        if self.quiet {
            return Ok(());
        }

        for dep in &report.dependencies {
            println!(
                "{} {} ({})",
                status::SUCCESS,
                dep.name,
                dep.layout.source_dir.display()
            );
        }
        println!(
            "{} Installed {} dependencies into {}",
            status::INFO,
            report.dependencies.len(),
            report.install_dir.display()
        );
        Ok(())
    }
}

/// Create a spinner for operations with unknown duration
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
        .template("{spinner:.blue} {msg} [{elapsed}]")
    {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}

/// Print an error, its causes and any captured tool output to stderr
pub fn display_error(error: &anyhow::Error) {
    let _ = write_error(&mut std::io::stderr().lock(), error);
}

/// Write an error, its causes and any captured tool output to `out`
pub fn write_error(out: &mut impl Write, error: &anyhow::Error) -> io::Result<()> {
    writeln!(out, "{} Error: {error}", status::ERROR)?;
    for cause in error.chain().skip(1) {
        writeln!(out, "  caused by: {cause}")?;
    }

    let failure = error
        .downcast_ref::<DepstrapError>()
        .and_then(DepstrapError::tool_failure);
    if let Some(failure) = failure {
        writeln!(out, "  command: {}", failure.command)?;
        if !failure.diagnostics.is_empty() {
            writeln!(out, "  output:")?;
            for line in failure.diagnostics.lines() {
                writeln!(out, "    {line}")?;
            }
        }
    }
    Ok(())
}

/// Status message prefixes
pub mod status {
    /// Success prefix (green checkmark)
    pub const SUCCESS: &str = "✓";

    /// Error prefix (red X)
    pub const ERROR: &str = "✗";

    /// Info prefix (blue circle)
    pub const INFO: &str = "ℹ";
}
