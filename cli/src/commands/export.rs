use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use chrono::{SecondsFormat, Utc};
use podcastr_shared::{
    pages::{get_static_paths, get_static_props, REVALIDATE},
    render::render_episode_page,
    EpisodeSource, Fallback, PathParams,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ExportManifest {
    pub paths: Vec<PathParams>,
    pub fallback: Fallback,
    pub revalidate: u64,
    pub generated_at: String,
    pub pages: Vec<ExportedPage>,
}

#[derive(Debug, Serialize)]
pub struct ExportedPage {
    pub slug: String,
    pub html: String,
    pub data: String,
}

/// Pre-render the latest `limit` episodes into `out_dir`. Fails on the first
/// episode that cannot be loaded, leaving no manifest behind.
pub async fn run(source: &dyn EpisodeSource, out_dir: &Path, limit: usize) -> Result<ExportManifest> {
    let static_paths = get_static_paths(source, limit)
        .await
        .context("failed to enumerate episode paths")?;

    let pages_dir = out_dir.join("episodes");
    let data_dir = out_dir.join("_data").join("episodes");
    for dir in [&pages_dir, &data_dir] {
        fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    }

    let mut pages = Vec::with_capacity(static_paths.paths.len());
    for path in &static_paths.paths {
        let slug = path.slug();
        let file_stem = file_stem_for(slug)?;
        let props = get_static_props(source, slug)
            .await
            .with_context(|| format!("failed to load episode {slug}"))?;

        let html_path = pages_dir.join(format!("{file_stem}.html"));
        let data_path = data_dir.join(format!("{file_stem}.json"));
        write_file(&html_path, render_episode_page(props.episode()).as_bytes())?;
        write_file(&data_path, serde_json::to_string_pretty(&props)?.as_bytes())?;
        tracing::info!("exported episode {slug}");

        pages.push(ExportedPage {
            slug: slug.to_string(),
            html: relative(out_dir, &html_path),
            data: relative(out_dir, &data_path),
        });
    }

    let manifest = ExportManifest {
        paths: static_paths.paths,
        fallback: static_paths.fallback,
        revalidate: REVALIDATE.as_secs(),
        generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        pages,
    };
    let manifest_path = out_dir.join("manifest.json");
    write_file(&manifest_path, serde_json::to_string_pretty(&manifest)?.as_bytes())?;
    tracing::info!("exported {} pages to {}", manifest.pages.len(), out_dir.display());
    Ok(manifest)
}

/// Slugs become file names the way they appear in a URL path segment.
fn file_stem_for(slug: &str) -> Result<String> {
    if slug.is_empty() || slug == "." || slug == ".." {
        bail!("episode id `{slug}` cannot be used as a file name");
    }
    Ok(urlencoding::encode(slug).into_owned())
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).with_context(|| format!("failed to write {}", path.display()))
}

fn relative(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{record, StaticSource};

    #[tokio::test]
    async fn export_writes_pages_data_and_manifest() {
        let out = tempfile::tempdir().expect("temp dir");
        let source = StaticSource(vec![record("a"), record("b w"), record("c")]);

        let manifest = run(&source, out.path(), 2).await.expect("export should succeed");

        assert_eq!(manifest.paths, vec![PathParams::new("a"), PathParams::new("b w")]);
        assert_eq!(manifest.revalidate, 86_400);

        let html = fs::read_to_string(out.path().join("episodes/a.html")).expect("a.html");
        assert!(html.contains(r#"<div class="description"><p>hi</p></div>"#));
        assert!(html.contains("<span>00:00:59</span>"));
        assert!(out.path().join("episodes/b%20w.html").exists());
        assert!(!out.path().join("episodes/c.html").exists());

        let data: serde_json::Value = serde_json::from_str(
            &fs::read_to_string(out.path().join("_data/episodes/a.json")).expect("a.json"),
        )
        .expect("props json");
        assert_eq!(data["props"]["episode"]["publishedAt"], "10 mai 21");

        let written: serde_json::Value = serde_json::from_str(
            &fs::read_to_string(out.path().join("manifest.json")).expect("manifest"),
        )
        .expect("manifest json");
        assert_eq!(written["fallback"], "blocking");
        assert_eq!(written["pages"][1]["html"], "episodes/b%20w.html");
    }

    #[tokio::test]
    async fn export_rejects_path_like_ids() {
        let out = tempfile::tempdir().expect("temp dir");
        let source = StaticSource(vec![record("..")]);

        assert!(run(&source, out.path(), 2).await.is_err());
        assert!(!out.path().join("manifest.json").exists());
    }
}
