use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use matchview_core::config::ViewerConfig;
use matchview_core::controller::{MatchViewController, SummaryView};
use matchview_core::geometry::{Point2, Size2};
use matchview_core::model::{ImageId, MatchClass, Panel};
use matchview_core::raster::rasterize;

#[derive(Args)]
pub struct RenderArgs {
    /// Image id shown in the left panel
    pub a: ImageId,

    /// Image id shown in the right panel
    pub b: ImageId,

    /// Output PNG path
    #[arg(short, long, default_value = "matches.png")]
    pub output: PathBuf,

    /// Width of each panel in pixels
    #[arg(long, default_value = "800")]
    pub width: u32,

    /// Height of each panel in pixels
    #[arg(long, default_value = "600")]
    pub height: u32,

    /// Draw inlier matches
    #[arg(long)]
    pub inliers: bool,

    /// Draw outlier matches
    #[arg(long)]
    pub outliers: bool,

    /// Only draw features that take part in a displayed match
    #[arg(long)]
    pub only_matched: bool,

    /// Skip the correspondence lines
    #[arg(long)]
    pub no_lines: bool,

    /// Skip the feature markers
    #[arg(long)]
    pub no_markers: bool,

    /// Marker radius in output pixels
    #[arg(long)]
    pub marker_size: Option<f64>,
}

fn effective_config(args: &RenderArgs, config: &ViewerConfig) -> ViewerConfig {
    let mut config = config.clone();
    let display = &mut config.display;
    // Explicit class flags replace the configured filter.
    if args.inliers || args.outliers {
        display.show_inliers = args.inliers;
        display.show_outliers = args.outliers;
    }
    display.only_matched |= args.only_matched;
    display.show_markers &= !args.no_markers;
    if let Some(size) = args.marker_size {
        display.marker_size = size;
    }
    // Lines are switched on once the pair is selected.
    display.show_lines = false;
    config
}

pub fn run(args: &RenderArgs, config: &ViewerConfig) -> Result<()> {
    if args.width == 0 || args.height == 0 {
        bail!("Panel size must be non-zero, got {}x{}", args.width, args.height);
    }
    let config = effective_config(args, config);
    config.validate()?;
    let api = super::connect(&config);

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));

    let panel = Size2::new(args.width as f64, args.height as f64);
    let mut controller = MatchViewController::new(&config);
    controller.layout_panel(Panel::A, Point2::ZERO, panel);
    controller.layout_panel(Panel::B, Point2::new(panel.width, 0.0), panel);

    pb.set_message(format!("Connecting to {}", api.base_url()));
    controller.start();
    controller.run_until_idle(&api);
    if controller.images().is_empty() {
        pb.finish_and_clear();
        bail!("No images available from {}", api.base_url());
    }
    for id in [args.a, args.b] {
        if controller.image_entry(id).is_none() {
            pb.finish_and_clear();
            bail!("Image {} not found in the active source", id);
        }
    }

    pb.set_message(format!("Loading image {}", args.a));
    controller.select_a(Some(args.a));
    controller.run_until_idle(&api);
    if !controller.candidates().contains(&args.b) {
        pb.finish_and_clear();
        bail!("Image {} has no matches with image {}", args.b, args.a);
    }

    pb.set_message(format!("Loading image {} and matches", args.b));
    controller.select_b(Some(args.b));
    if !args.no_lines {
        controller.set_show_lines(true)?;
    }
    controller.run_until_idle(&api);

    for panel in Panel::BOTH {
        if controller.pixels(panel).is_none() {
            pb.finish_and_clear();
            bail!("Failed to load {} pixels", panel);
        }
    }

    pb.set_message("Rendering");
    let scene = controller.scene();
    let a = controller.pixels(Panel::A).map(|p| p.image.clone());
    let b = controller.pixels(Panel::B).map(|p| p.image.clone());
    let img = rasterize(&scene, [a.as_deref(), b.as_deref()])?;
    img.save(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    pb.finish_and_clear();

    let filter = controller.class_filter();
    let classes: Vec<String> = MatchClass::ALL
        .iter()
        .filter(|c| filter.contains(**c))
        .map(|c| c.to_string())
        .collect();
    println!(
        "Rendered {} lines ({}), {} + {} markers",
        scene.lines.len(),
        if classes.is_empty() {
            "none".to_string()
        } else {
            classes.join(", ")
        },
        scene.a.markers.len(),
        scene.b.markers.len()
    );
    if let SummaryView::Unavailable(reason) = controller.summary() {
        println!("Statistics: {}", reason);
    }
    println!("Saved to {}", args.output.display());
    Ok(())
}
