use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use podcastr_shared::{
    config::{env_string, env_u64, ContentApiConfig},
    pages::PRERENDER_LIMIT,
    Fallback,
};

use crate::generator::GeneratorSettings;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub port: u16,
    pub content_api: ContentApiConfig,
    pub prerender_limit: usize,
    pub revalidate: Option<Duration>,
    pub fallback: Fallback,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        let port = match env_string("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("invalid PORT: {raw}"))?,
            None => 3000,
        };
        // Development: 0.0.0.0 for direct access
        let bind_addr = env_string("BIND_ADDR").unwrap_or_else(|| "0.0.0.0".to_string());
        let prerender_limit = env_u64("PRERENDER_LIMIT")
            .map(|value| value as usize)
            .unwrap_or(PRERENDER_LIMIT);
        let revalidate = env_u64("REVALIDATE_SECONDS")
            .filter(|seconds| *seconds > 0)
            .map(Duration::from_secs);
        let fallback = match env_string("PAGE_FALLBACK") {
            Some(raw) => raw.parse::<Fallback>().map_err(|err| anyhow!("invalid PAGE_FALLBACK: {err}"))?,
            None => Fallback::Blocking,
        };

        Ok(Self {
            bind_addr,
            port,
            content_api: ContentApiConfig::from_env(),
            prerender_limit,
            revalidate,
            fallback,
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    pub fn generator_settings(&self) -> GeneratorSettings {
        GeneratorSettings {
            prerender_limit: self.prerender_limit,
            revalidate: self.revalidate,
            fallback: self.fallback,
        }
    }
}
