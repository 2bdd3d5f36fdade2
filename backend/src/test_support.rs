use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Mutex,
    },
};

use async_trait::async_trait;
use podcastr_shared::{ContentApiError, Episode, EpisodeRecord, EpisodeSource};
use serde_json::json;

pub fn record(id: &str, title: &str, published_at: &str) -> EpisodeRecord {
    serde_json::from_value(json!({
        "id": id,
        "title": title,
        "thumbnail": format!("https://example.com/{id}.jpg"),
        "members": "Diego e Richard",
        "published_at": published_at,
        "file": { "url": format!("https://example.com/{id}.m4a"), "duration": "5400" },
        "description": "<p>hi</p>",
    }))
    .expect("record should decode")
}

pub fn episode(id: &str, title: &str) -> Episode {
    Episode::from_record(record(id, title, "2021-05-10T00:00:00.000Z"))
        .expect("record should convert")
}

/// In-memory content API. Records are listed newest first in insertion order.
#[derive(Default)]
pub struct FakeSource {
    episodes: Mutex<Vec<EpisodeRecord>>,
    failing: AtomicBool,
    episode_calls: AtomicUsize,
    calls_by_id: Mutex<HashMap<String, usize>>,
}

impl FakeSource {
    pub fn with_episodes(ids: &[&str]) -> Self {
        let source = Self::default();
        for id in ids {
            source.upsert(record(id, &format!("Episode {id}"), "2021-05-10T00:00:00.000Z"));
        }
        source
    }

    pub fn upsert(&self, episode: EpisodeRecord) {
        let mut episodes = self.episodes.lock().expect("episodes lock");
        match episodes.iter_mut().find(|existing| existing.id == episode.id) {
            Some(existing) => *existing = episode,
            None => episodes.push(episode),
        }
    }

    pub fn retitle(&self, id: &str, title: &str) {
        self.upsert(record(id, title, "2021-05-10T00:00:00.000Z"));
    }

    pub fn delete(&self, id: &str) {
        self.episodes
            .lock()
            .expect("episodes lock")
            .retain(|episode| episode.id != id);
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn episode_calls(&self) -> usize {
        self.episode_calls.load(Ordering::SeqCst)
    }

    pub fn calls_for(&self, id: &str) -> usize {
        self.calls_by_id
            .lock()
            .expect("calls lock")
            .get(id)
            .copied()
            .unwrap_or_default()
    }

    fn unavailable(&self, url: &str) -> Result<(), ContentApiError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(ContentApiError::Status {
                url: url.to_string(),
                status: 503,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl EpisodeSource for FakeSource {
    async fn latest_episodes(&self, limit: usize) -> Result<Vec<EpisodeRecord>, ContentApiError> {
        self.unavailable("/episodes")?;
        Ok(self
            .episodes
            .lock()
            .expect("episodes lock")
            .iter()
            .take(limit)
            .cloned()
            .collect())
    }

    async fn episode(&self, id: &str) -> Result<EpisodeRecord, ContentApiError> {
        self.episode_calls.fetch_add(1, Ordering::SeqCst);
        *self
            .calls_by_id
            .lock()
            .expect("calls lock")
            .entry(id.to_string())
            .or_default() += 1;
        // Let concurrent requests interleave like they would over the network.
        tokio::task::yield_now().await;
        self.unavailable(&format!("/episodes/{id}"))?;
        self.episodes
            .lock()
            .expect("episodes lock")
            .iter()
            .find(|episode| episode.id == id)
            .cloned()
            .ok_or_else(|| ContentApiError::NotFound { id: id.to_string() })
    }
}
