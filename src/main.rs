use chrono::Utc;
use clap::Parser;
use ensemble_vote::RenderPolicy;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nimbus::config::FetchConfig;
use nimbus::error::CompositeError;
use nimbus::fetch::Fetcher;
use nimbus::{render, walk};

#[derive(Parser)]
#[command(name = "nimbus")]
#[command(about = "Composite renderer for NOAA CFSv2 ensemble forecast maps")]
struct Cli {
    /// Directory containing map groups; when omitted, the current CFSv2
    /// cycle is downloaded into the local cache and rendered from there
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Directory for composite PNGs
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Blending policy: white, smooth, confidence or dominance
    #[arg(short, long, default_value = "white")]
    render_mode: RenderPolicy,

    /// Optional YAML acquisition config (variables, members, cache dir)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nimbus=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => FetchConfig::load(path)?,
        None => FetchConfig::default(),
    };

    let input = match cli.input {
        Some(dir) => dir,
        None => {
            tracing::info!("no input directory given, syncing the local cache");
            Fetcher::new(config).sync(Utc::now())
        }
    };

    let mut rendered = 0usize;
    for leaf in walk::find_leaf_dirs(&input)? {
        match render::render_group(&leaf, cli.render_mode, &cli.output) {
            Ok(path) => {
                tracing::info!(path = %path.display(), "composite written");
                rendered += 1;
            }
            // Organizational directories without maps are not groups
            Err(CompositeError::EmptyGroup(dir)) => {
                tracing::debug!(dir = %dir.display(), "no PNG images, skipping");
            }
            Err(e) => return Err(e.into()),
        }
    }

    tracing::info!(composites = rendered, mode = %cli.render_mode, "run complete");
    Ok(())
}
