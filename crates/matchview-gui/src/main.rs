mod app;
mod convert;
mod messages;
mod panels;
mod states;
mod workers;

use std::path::PathBuf;

use anyhow::Context;
use matchview_core::config::ViewerConfig;

/// `matchview-gui [config.toml]`
fn load_config() -> anyhow::Result<ViewerConfig> {
    match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => ViewerConfig::load(&path)
            .with_context(|| format!("Failed to read config {}", path.display())),
        None => Ok(ViewerConfig::default()),
    }
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = load_config().unwrap_or_else(|e| {
        tracing::warn!("{e:#}, using defaults");
        ViewerConfig::default()
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 820.0])
            .with_min_inner_size([900.0, 560.0])
            .with_title("MatchView"),
        ..Default::default()
    };

    eframe::run_native(
        "MatchView",
        options,
        Box::new(move |cc| Ok(Box::new(app::MatchViewApp::new(&cc.egui_ctx, config)))),
    )
}
