use std::{fs, path::Path};

use anyhow::{Context, Result};
use podcastr_shared::{pages::get_static_props, render::render_episode_page, EpisodeSource};

pub async fn run(source: &dyn EpisodeSource, slug: &str, output: Option<&Path>) -> Result<()> {
    let props = get_static_props(source, slug)
        .await
        .with_context(|| format!("failed to load episode {slug}"))?;
    let html = render_episode_page(props.episode());

    match output {
        Some(path) => {
            fs::write(path, &html)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!("wrote {} ({} bytes)", path.display(), html.len());
        },
        None => println!("{html}"),
    }
    Ok(())
}
