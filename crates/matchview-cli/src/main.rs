mod commands;
mod summary;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use matchview_core::config::ViewerConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "matchview", about = "Inspect and render SfM feature correspondences")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Backend base URL (overrides the config file)
    #[arg(long, global = true)]
    server: Option<String>,

    /// Viewer config file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the backend's data sources
    Sources(commands::sources::SourcesArgs),
    /// List the images of the active source
    Images(commands::images::ImagesArgs),
    /// Show one image's metadata and feature counts
    Image(commands::image::ImageArgs),
    /// List the images that share matches with an image
    Pairs(commands::pairs::PairsArgs),
    /// Print the correspondences between two images
    Matches(commands::matches::MatchesArgs),
    /// Show match statistics for an image pair
    Summary(commands::summary::SummaryArgs),
    /// Render an image pair with markers and match lines to a PNG
    Render(commands::render::RenderArgs),
    /// Print or save the default viewer config
    Config(commands::config::ConfigArgs),
}

fn load_config(cli: &Cli) -> Result<ViewerConfig> {
    let mut config = match cli.config {
        Some(ref path) => ViewerConfig::load(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?,
        None => ViewerConfig::default(),
    };
    if let Some(ref url) = cli.server {
        config.server_url = url.clone();
    }
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = load_config(&cli)?;

    match &cli.command {
        Commands::Sources(args) => commands::sources::run(args, &config),
        Commands::Images(args) => commands::images::run(args, &config),
        Commands::Image(args) => commands::image::run(args, &config),
        Commands::Pairs(args) => commands::pairs::run(args, &config),
        Commands::Matches(args) => commands::matches::run(args, &config),
        Commands::Summary(args) => commands::summary::run(args, &config),
        Commands::Render(args) => commands::render::run(args, &config),
        Commands::Config(args) => commands::config::run(args, &config),
    }
}
