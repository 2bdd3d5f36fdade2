use anyhow::{Context, Result};
use podcastr_shared::{pages::get_static_paths, EpisodeSource};

use super::print_json;

pub async fn run(source: &dyn EpisodeSource, limit: usize) -> Result<()> {
    let paths = get_static_paths(source, limit)
        .await
        .context("failed to enumerate episode paths")?;
    print_json(&paths)
}
