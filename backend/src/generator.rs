use std::{sync::Arc, time::Duration};

use dashmap::DashMap;
use podcastr_shared::{
    pages::{get_static_paths, get_static_props},
    render::render_episode_page,
    EpisodeSource, Fallback, PageError, StaticPaths,
};
use tokio::{
    sync::{Mutex, RwLock},
    time::Instant,
};

use crate::cache::{Lookup, PageCache, RenderedPage};

#[derive(Debug, Clone)]
pub struct GeneratorSettings {
    /// How many of the latest episodes get rendered at build.
    pub prerender_limit: usize,
    /// Replaces the revalidate window returned by the data loader.
    pub revalidate: Option<Duration>,
    pub fallback: Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Stale,
    Miss,
}

impl CacheStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CacheStatus::Hit => "HIT",
            CacheStatus::Stale => "STALE",
            CacheStatus::Miss => "MISS",
        }
    }
}

pub struct Served {
    pub page: RenderedPage,
    pub status: CacheStatus,
}

/// Pre-renders the latest episodes, renders everything else on first request
/// and regenerates stale pages in the background.
pub struct PageGenerator {
    source: Arc<dyn EpisodeSource>,
    settings: GeneratorSettings,
    cache: PageCache,
    paths: RwLock<StaticPaths>,
    /// Slugs with a background regeneration in flight.
    regenerating: DashMap<String, ()>,
    /// Serializes first renders of the same slug.
    render_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl PageGenerator {
    pub fn new(source: Arc<dyn EpisodeSource>, settings: GeneratorSettings) -> Self {
        let paths = StaticPaths {
            paths: Vec::new(),
            fallback: settings.fallback,
        };
        Self {
            source,
            settings,
            cache: PageCache::default(),
            paths: RwLock::new(paths),
            regenerating: DashMap::new(),
            render_locks: DashMap::new(),
        }
    }

    /// Build step: enumerate the latest episodes and render each of them.
    /// Any failure aborts the build.
    pub async fn prebuild(&self) -> Result<StaticPaths, PageError> {
        let started_at = Instant::now();
        let mut paths = get_static_paths(self.source.as_ref(), self.settings.prerender_limit).await?;
        paths.fallback = self.settings.fallback;

        for path in &paths.paths {
            self.regenerate(path.slug()).await?;
        }

        tracing::info!(
            pages = paths.paths.len(),
            fallback = ?paths.fallback,
            elapsed_ms = started_at.elapsed().as_millis(),
            "pre-render finished"
        );
        *self.paths.write().await = paths.clone();
        Ok(paths)
    }

    pub async fn static_paths(&self) -> StaticPaths {
        self.paths.read().await.clone()
    }

    pub fn cached_pages(&self) -> usize {
        self.cache.len()
    }

    pub async fn serve(self: &Arc<Self>, slug: &str) -> Result<Served, PageError> {
        match self.cache.lookup(slug) {
            Lookup::Fresh(page) => Ok(Served {
                page,
                status: CacheStatus::Hit,
            }),
            Lookup::Stale(page) => {
                self.spawn_regeneration(slug);
                Ok(Served {
                    page,
                    status: CacheStatus::Stale,
                })
            },
            Lookup::Miss => self.render_on_demand(slug).await,
        }
    }

    /// Fetch, render and cache `slug`, replacing any existing entry.
    pub async fn regenerate(&self, slug: &str) -> Result<RenderedPage, PageError> {
        let started_at = Instant::now();
        let mut props = get_static_props(self.source.as_ref(), slug).await?;
        if let Some(window) = self.settings.revalidate {
            props.revalidate = window;
        }

        let html = render_episode_page(props.episode());
        let page = RenderedPage::new(html, props);
        self.cache.insert(slug, page.clone());

        tracing::info!(
            slug,
            elapsed_ms = started_at.elapsed().as_millis(),
            "rendered episode page"
        );
        Ok(page)
    }

    async fn render_on_demand(&self, slug: &str) -> Result<Served, PageError> {
        if self.settings.fallback == Fallback::Disabled
            && !self.paths.read().await.contains(slug)
        {
            return Err(PageError::UnknownPath {
                slug: slug.to_string(),
            });
        }

        let lock = Arc::clone(
            self.render_locks
                .entry(slug.to_string())
                .or_default()
                .value(),
        );
        let result = {
            let _guard = lock.lock().await;
            match self.cache.get(slug) {
                // Rendered by a concurrent request while we waited.
                Some(page) => Ok(Served {
                    page,
                    status: CacheStatus::Hit,
                }),
                None => self.regenerate(slug).await.map(|page| Served {
                    page,
                    status: CacheStatus::Miss,
                }),
            }
        };
        self.render_locks
            .remove_if(slug, |_, current| Arc::ptr_eq(current, &lock));
        result
    }

    fn spawn_regeneration(self: &Arc<Self>, slug: &str) {
        if self.regenerating.insert(slug.to_string(), ()).is_some() {
            return;
        }

        let generator = Arc::clone(self);
        let slug = slug.to_string();
        tokio::spawn(async move {
            match generator.regenerate(&slug).await {
                Ok(_) => tracing::debug!(slug = %slug, "revalidated stale page"),
                Err(err) if err.is_not_found() => {
                    generator.cache.remove(&slug);
                    tracing::info!(slug = %slug, "episode disappeared, dropped cached page");
                },
                Err(err) => {
                    tracing::warn!(slug = %slug, "revalidation failed, keeping stale page: {err}");
                },
            }
            generator.regenerating.remove(&slug);
        });
    }
}
