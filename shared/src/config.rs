//! Environment-driven configuration shared by the backend and the CLI.

use std::{env, time::Duration};

/// Default content API origin (json-server's usual port for this project).
pub const DEFAULT_CONTENT_API_URL: &str = "http://localhost:3333";
const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Where and how to reach the content API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentApiConfig {
    /// API origin, without trailing slash.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for ContentApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_CONTENT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
        }
    }
}

impl ContentApiConfig {
    /// Read `CONTENT_API_URL` and `CONTENT_API_TIMEOUT_SECONDS`.
    pub fn from_env() -> Self {
        let base_url = env_string("CONTENT_API_URL")
            .unwrap_or_else(|| DEFAULT_CONTENT_API_URL.to_string());
        let timeout = env_u64("CONTENT_API_TIMEOUT_SECONDS")
            .unwrap_or(DEFAULT_TIMEOUT_SECONDS)
            .max(1);
        Self::new(base_url, Duration::from_secs(timeout))
    }

    /// Build a config, normalizing the base URL.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into().trim().trim_end_matches('/').to_string(),
            timeout,
        }
    }
}

/// Non-empty, trimmed value of an environment variable.
pub fn env_string(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Environment variable parsed as `u64`; unparseable values are ignored.
pub fn env_u64(key: &str) -> Option<u64> {
    let raw = env_string(key)?;
    match raw.parse::<u64>() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("ignoring non-numeric {key}={raw}");
            None
        },
    }
}
