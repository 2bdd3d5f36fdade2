use std::path::PathBuf;

use clap::{Parser, Subcommand};
use podcastr_shared::pages::PRERENDER_LIMIT;

#[derive(Parser)]
#[command(name = "pc-cli", version, about = "Podcastr episode page CLI")]
pub struct Cli {
    /// Content API origin. Defaults to `CONTENT_API_URL`, then localhost:3333.
    #[arg(long, global = true)]
    pub api_url: Option<String>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the routes that get pre-rendered at build time.
    Paths {
        /// Number of latest episodes to pre-render.
        #[arg(long, default_value_t = PRERENDER_LIMIT)]
        limit: usize,
    },
    /// Print the page props for one episode.
    Props {
        /// Episode id.
        #[arg(long)]
        slug: String,
    },
    /// Render one episode page.
    Render {
        /// Episode id.
        #[arg(long)]
        slug: String,
        /// Write the HTML here instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Pre-render the latest episodes into a static directory.
    Export {
        /// Output directory.
        #[arg(long, default_value = "./out")]
        out_dir: PathBuf,
        /// Number of latest episodes to pre-render.
        #[arg(long, default_value_t = PRERENDER_LIMIT)]
        limit: usize,
    },
}
