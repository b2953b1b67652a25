//! buildnotify — post a CI build summary to a Webex room.
//!
//! Reads build metadata from the CI environment, pulls failure and recap
//! blocks out of the pipeline's log files, and sends one Markdown message.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
