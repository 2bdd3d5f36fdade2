pub mod export;
pub mod paths;
pub mod props;
pub mod render;
#[cfg(test)]
mod test_support;

use anyhow::Result;
use podcastr_shared::{config::ContentApiConfig, ContentApiClient};
use serde::Serialize;

use crate::cli::{Cli, Commands};

pub async fn run(cli: Cli) -> Result<()> {
    let mut config = ContentApiConfig::from_env();
    if let Some(api_url) = cli.api_url {
        config = ContentApiConfig::new(api_url, config.timeout);
    }
    tracing::debug!("content api: {}", config.base_url);
    let client = ContentApiClient::new(&config)?;

    match cli.command {
        Commands::Paths { limit } => paths::run(&client, limit).await,
        Commands::Props { slug } => props::run(&client, &slug).await,
        Commands::Render { slug, output } => render::run(&client, &slug, output.as_deref()).await,
        Commands::Export { out_dir, limit } => {
            export::run(&client, &out_dir, limit).await.map(|_| ())
        },
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
