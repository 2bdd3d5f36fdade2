//! Error types for content API access and page generation.

use thiserror::Error;

/// Failure talking to the content API.
#[derive(Debug, Error)]
pub enum ContentApiError {
    /// Transport failure or timeout.
    #[error("request to {url} failed: {source}")]
    Request {
        /// Requested URL.
        url: String,
        /// Underlying client error.
        #[source]
        source: reqwest::Error,
    },
    /// The API has no episode with this id.
    #[error("episode `{id}` not found")]
    NotFound {
        /// Requested episode id.
        id: String,
    },
    /// Any other non-success status.
    #[error("{url} returned status {status}")]
    Status {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },
    /// Response body was not the expected JSON shape.
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        /// Requested URL.
        url: String,
        /// Underlying decode error.
        #[source]
        source: reqwest::Error,
    },
}

/// Failure producing page data for a route.
#[derive(Debug, Error)]
pub enum PageError {
    /// Fetching from the content API failed.
    #[error(transparent)]
    Api(#[from] ContentApiError),
    /// `published_at` could not be parsed as a date.
    #[error("episode `{id}` has invalid published_at `{value}`")]
    InvalidDate {
        /// Episode id.
        id: String,
        /// Raw value from the API.
        value: String,
    },
    /// `file.duration` could not be coerced to seconds.
    #[error("episode `{id}` has invalid file.duration `{value}`")]
    InvalidDuration {
        /// Episode id.
        id: String,
        /// Raw value from the API.
        value: String,
    },
    /// The route is not pre-built and on-demand rendering is disabled.
    #[error("no page for `{slug}`")]
    UnknownPath {
        /// Requested slug.
        slug: String,
    },
}

impl PageError {
    /// Whether the error means the page does not exist, as opposed to a
    /// failure while producing it.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            PageError::Api(ContentApiError::NotFound { .. }) | PageError::UnknownPath { .. }
        )
    }
}
