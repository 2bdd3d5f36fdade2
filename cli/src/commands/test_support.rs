use async_trait::async_trait;
use podcastr_shared::{ContentApiError, EpisodeRecord, EpisodeSource};
use serde_json::json;

/// Fixed list of records, newest first.
pub struct StaticSource(pub Vec<EpisodeRecord>);

pub fn record(id: &str) -> EpisodeRecord {
    serde_json::from_value(json!({
        "id": id,
        "title": format!("Episode {id}"),
        "thumbnail": "https://example.com/cover.jpg",
        "members": "Diego",
        "published_at": "2021-05-10T00:00:00.000Z",
        "file": { "url": "https://example.com/a.m4a", "duration": 59 },
        "description": "<p>hi</p>",
    }))
    .expect("record should decode")
}

#[async_trait]
impl EpisodeSource for StaticSource {
    async fn latest_episodes(&self, limit: usize) -> Result<Vec<EpisodeRecord>, ContentApiError> {
        Ok(self.0.iter().take(limit).cloned().collect())
    }

    async fn episode(&self, id: &str) -> Result<EpisodeRecord, ContentApiError> {
        self.0
            .iter()
            .find(|episode| episode.id == id)
            .cloned()
            .ok_or_else(|| ContentApiError::NotFound { id: id.to_string() })
    }
}
