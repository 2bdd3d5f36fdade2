use anyhow::{Context, Result};
use podcastr_shared::{pages::get_static_props, EpisodeSource};

use super::print_json;

pub async fn run(source: &dyn EpisodeSource, slug: &str) -> Result<()> {
    let props = get_static_props(source, slug)
        .await
        .with_context(|| format!("failed to load episode {slug}"))?;
    print_json(&props)
}
