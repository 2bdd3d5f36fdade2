//! HTTP client for the episodes content API.

use std::time::Instant;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::{config::ContentApiConfig, ContentApiError, EpisodeRecord};

/// Read access to episode records. Implemented by [`ContentApiClient`];
/// tests substitute in-memory sources.
#[async_trait]
pub trait EpisodeSource: Send + Sync {
    /// Most recently published episodes, newest first, at most `limit`.
    async fn latest_episodes(&self, limit: usize) -> Result<Vec<EpisodeRecord>, ContentApiError>;

    /// A single episode by id.
    async fn episode(&self, id: &str) -> Result<EpisodeRecord, ContentApiError>;
}

/// reqwest-backed [`EpisodeSource`].
#[derive(Clone)]
pub struct ContentApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl ContentApiClient {
    /// Build a client with the configured timeout.
    pub fn new(config: &ContentApiConfig) -> anyhow::Result<Self> {
        use anyhow::Context;

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .context("failed to build content api http client")?;
        Ok(Self {
            base_url: config.base_url.clone(),
            client,
        })
    }

    /// API origin this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: String,
        query: &[(&str, String)],
    ) -> Result<(StatusCode, Option<T>), ContentApiError> {
        let started_at = Instant::now();
        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|source| ContentApiError::Request {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        tracing::debug!(
            url = %url,
            status = status.as_u16(),
            elapsed_ms = started_at.elapsed().as_millis(),
            "content api responded"
        );
        if status == StatusCode::NOT_FOUND {
            return Ok((status, None));
        }
        if !status.is_success() {
            return Err(ContentApiError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = response
            .json::<T>()
            .await
            .map_err(|source| ContentApiError::Decode { url, source })?;
        Ok((status, Some(body)))
    }
}

#[async_trait]
impl EpisodeSource for ContentApiClient {
    async fn latest_episodes(&self, limit: usize) -> Result<Vec<EpisodeRecord>, ContentApiError> {
        let url = format!("{}/episodes", self.base_url);
        let query = [
            ("_limit", limit.to_string()),
            ("_sort", "published_at".to_string()),
            ("_order", "desc".to_string()),
        ];
        match self.get_json::<Vec<EpisodeRecord>>(url.clone(), &query).await? {
            (_, Some(episodes)) => {
                tracing::info!("fetched {} latest episodes", episodes.len());
                Ok(episodes)
            },
            (status, None) => Err(ContentApiError::Status {
                url,
                status: status.as_u16(),
            }),
        }
    }

    async fn episode(&self, id: &str) -> Result<EpisodeRecord, ContentApiError> {
        // Dot segments survive percent-encoding and get normalized away by the
        // URL parser, which would point the request at another resource.
        if id.is_empty() || id == "." || id == ".." {
            return Err(ContentApiError::NotFound { id: id.to_string() });
        }
        let url = format!("{}/episodes/{}", self.base_url, urlencoding::encode(id));
        match self.get_json::<EpisodeRecord>(url, &[]).await? {
            (_, Some(episode)) => Ok(episode),
            (_, None) => Err(ContentApiError::NotFound { id: id.to_string() }),
        }
    }
}
