use std::sync::Arc;

use dashmap::DashMap;
use podcastr_shared::StaticProps;
use tokio::time::Instant;

/// A rendered page together with the props it was rendered from.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub html: Arc<str>,
    pub props: Arc<StaticProps>,
    pub generated_at: Instant,
}

impl RenderedPage {
    pub fn new(html: String, props: StaticProps) -> Self {
        Self {
            html: Arc::from(html),
            props: Arc::new(props),
            generated_at: Instant::now(),
        }
    }

    pub fn is_stale_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.generated_at) >= self.props.revalidate
    }
}

pub enum Lookup {
    Fresh(RenderedPage),
    Stale(RenderedPage),
    Miss,
}

/// Rendered pages keyed by slug.
#[derive(Default)]
pub struct PageCache {
    pages: DashMap<String, RenderedPage>,
}

impl PageCache {
    pub fn lookup(&self, slug: &str) -> Lookup {
        let Some(page) = self.get(slug) else {
            return Lookup::Miss;
        };
        if page.is_stale_at(Instant::now()) {
            Lookup::Stale(page)
        } else {
            Lookup::Fresh(page)
        }
    }

    pub fn get(&self, slug: &str) -> Option<RenderedPage> {
        self.pages.get(slug).map(|entry| entry.value().clone())
    }

    pub fn insert(&self, slug: &str, page: RenderedPage) {
        self.pages.insert(slug.to_string(), page);
    }

    pub fn remove(&self, slug: &str) -> bool {
        self.pages.remove(slug).is_some()
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }
}
