//! Page hooks for `/episodes/:slug`: which routes to pre-build and what data
//! each route renders.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Episode, EpisodeSource, PageError};

/// Number of most recent episodes pre-built at build time.
pub const PRERENDER_LIMIT: usize = 2;

/// Window after which a rendered episode page is considered stale.
pub const REVALIDATE: Duration = Duration::from_secs(60 * 60 * 24);

/// How routes missing from [`StaticPaths::paths`] are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fallback {
    /// Render on first request, then cache like a pre-built page.
    #[default]
    Blocking,
    /// Only pre-built routes exist; everything else is not found.
    Disabled,
}

impl std::str::FromStr for Fallback {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "blocking" => Ok(Fallback::Blocking),
            "disabled" | "false" => Ok(Fallback::Disabled),
            other => Err(format!("unknown fallback mode `{other}`")),
        }
    }
}

/// Route parameters of one pre-buildable page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathParams {
    /// Route parameters.
    pub params: SlugParam,
}

/// The `slug` route parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlugParam {
    /// Episode identifier.
    pub slug: String,
}

impl PathParams {
    /// Route descriptor for `slug`.
    pub fn new(slug: impl Into<String>) -> Self {
        Self {
            params: SlugParam { slug: slug.into() },
        }
    }

    /// The episode identifier of this route.
    pub fn slug(&self) -> &str {
        &self.params.slug
    }
}

/// Routes to pre-build plus the policy for every other route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticPaths {
    /// Pre-buildable routes, newest episode first.
    pub paths: Vec<PathParams>,
    /// Handling of routes not listed in `paths`.
    pub fallback: Fallback,
}

impl StaticPaths {
    /// Whether `slug` is one of the pre-built routes.
    pub fn contains(&self, slug: &str) -> bool {
        self.paths.iter().any(|path| path.slug() == slug)
    }
}

/// Data for one rendered page plus its revalidation window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticProps {
    /// Props handed to the renderer.
    pub props: EpisodeProps,
    /// Seconds a rendered page stays fresh.
    #[serde(with = "duration_seconds")]
    pub revalidate: Duration,
}

/// Renderer input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeProps {
    /// The episode view model.
    pub episode: Episode,
}

impl StaticProps {
    /// The episode view model.
    pub fn episode(&self) -> &Episode {
        &self.props.episode
    }
}

/// Enumerate the routes pre-built at build time: the `limit` most recently
/// published episodes. Other routes render on demand.
pub async fn get_static_paths(
    source: &dyn EpisodeSource,
    limit: usize,
) -> Result<StaticPaths, PageError> {
    let episodes = source.latest_episodes(limit).await?;
    let paths = episodes
        .into_iter()
        .map(|episode| PathParams::new(episode.id))
        .collect();

    Ok(StaticPaths {
        paths,
        fallback: Fallback::Blocking,
    })
}

/// Load and reshape the episode behind `slug`.
pub async fn get_static_props(
    source: &dyn EpisodeSource,
    slug: &str,
) -> Result<StaticProps, PageError> {
    let record = source.episode(slug).await?;
    let episode = Episode::from_record(record)?;

    Ok(StaticProps {
        props: EpisodeProps { episode },
        revalidate: REVALIDATE,
    })
}

mod duration_seconds {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}
