//! Depstrap CLI - native dependency bootstrapper
//!
//! Entry point for the depstrap command-line application.

use anyhow::Result;
use clap::Parser;

use depstrap::cli::output::{display_error, OutputConfig};
use depstrap::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let output_config = OutputConfig::new(cli.quiet, cli.json, cli.verbose);
    output_config.init_tracing();

    // Run and map every failure to exit status 1
    match cli.run(&output_config).await {
        Ok(()) => Ok(()),
        Err(e) => {
            display_error(&e);
            std::process::exit(1);
        }
    }
}
