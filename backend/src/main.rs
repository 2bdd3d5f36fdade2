//! Podcastr episode page server: pre-renders the latest episodes at startup,
//! renders the rest on first request and revalidates cached pages in the
//! background.

mod cache;
mod config;
mod generator;
mod handlers;
mod request_context;
mod routes;
mod state;
#[cfg(test)]
mod test_support;

use std::sync::Arc;

use anyhow::{Context, Result};
use podcastr_shared::{logging, ContentApiClient, EpisodeSource};

use crate::{generator::PageGenerator, state::AppState};

#[tokio::main]
async fn main() -> Result<()> {
    let _log_guard = logging::init_tracing("podcastr-backend")?;

    let config = config::ServerConfig::from_env()?;
    tracing::info!("Starting Podcastr backend server");
    tracing::info!("Content API: {}", config.content_api.base_url);

    let client = ContentApiClient::new(&config.content_api)?;
    let source: Arc<dyn EpisodeSource> = Arc::new(client);
    let generator = Arc::new(PageGenerator::new(source, config.generator_settings()));

    // Build step: the server does not start if the latest episodes cannot be
    // rendered.
    let paths = generator
        .prebuild()
        .await
        .context("failed to pre-render episode pages")?;
    tracing::info!("Pre-rendered {} episode pages", paths.paths.len());

    let app = routes::create_router(AppState::new(generator));

    let addr = config.listen_addr();
    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}
