//! `pc-cli`: inspect the Podcastr page hooks and export pre-rendered episode
//! pages to a static directory.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use podcastr_shared::logging;

#[tokio::main]
async fn main() -> Result<()> {
    let _log_guard = logging::init_tracing("pc-cli")?;

    let cli = cli::Cli::parse();
    commands::run(cli).await
}
