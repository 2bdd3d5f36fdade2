//! Shared building blocks for Podcastr episode pages: content API models and
//! client, the page hooks (path enumeration, data loading, rendering), and the
//! logging/config setup used by the backend and the CLI.

pub mod config;
pub mod content_api;
pub mod date;
pub mod duration;
pub mod error;
pub mod logging;
pub mod pages;
pub mod render;

use serde::{Deserialize, Deserializer, Serialize};

pub use content_api::{ContentApiClient, EpisodeSource};
pub use duration::RawDuration;
pub use error::{ContentApiError, PageError};
pub use pages::{Fallback, PathParams, StaticPaths, StaticProps};

// 内容 API 返回的原始记录
/// Episode record as returned by the content API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeRecord {
    /// Episode identifier, used as the route slug.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    /// Episode title.
    pub title: String,
    /// Cover image URL.
    pub thumbnail: String,
    /// Free-text credits.
    pub members: String,
    /// Publication timestamp as sent by the API.
    pub published_at: String,
    /// Audio file metadata.
    pub file: EpisodeFile,
    /// Episode description, HTML.
    pub description: String,
}

/// Audio file metadata nested in an [`EpisodeRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeFile {
    /// Audio source URL.
    pub url: String,
    /// Length in seconds, either a JSON number or a numeric string.
    pub duration: RawDuration,
}

// 页面视图模型
/// View model handed to the renderer, built fresh from every fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    /// Episode identifier.
    pub id: String,
    /// Episode title.
    pub title: String,
    /// Cover image URL.
    pub thumbnail: String,
    /// Free-text credits.
    pub members: String,
    /// Publication date formatted as `d MMM yy` with Portuguese months.
    pub published_at: String,
    /// Length in whole seconds. A fractional `file.duration` such as `59.9`
    /// is truncated to `59`, so this and `duration_as_string` always agree.
    pub duration: u64,
    /// `duration` formatted as `HH:MM:SS`.
    pub duration_as_string: String,
    /// Episode description, HTML injected verbatim by the renderer.
    pub description: String,
    /// Audio source URL.
    pub url: String,
}

impl Episode {
    /// Reshape a content API record into the view model.
    pub fn from_record(record: EpisodeRecord) -> Result<Self, PageError> {
        let published_at =
            date::format_published_at(&record.published_at).ok_or_else(|| {
                PageError::InvalidDate {
                    id: record.id.clone(),
                    value: record.published_at.clone(),
                }
            })?;
        let duration = duration::coerce_duration(&record.file.duration).ok_or_else(|| {
            PageError::InvalidDuration {
                id: record.id.clone(),
                value: record.file.duration.to_string(),
            }
        })?;

        Ok(Episode {
            id: record.id,
            title: record.title,
            thumbnail: record.thumbnail,
            members: record.members,
            published_at,
            duration,
            duration_as_string: duration::convert_duration_to_string(duration),
            description: record.description,
            url: record.file.url,
        })
    }
}

/// json-server hands out numeric ids for generated records; routes only ever
/// see strings.
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(value) => value,
        RawId::Number(value) => value.to_string(),
    })
}
