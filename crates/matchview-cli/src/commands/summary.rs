use anyhow::{Context, Result};
use clap::Args;
use matchview_core::api::ReconstructionApi;
use matchview_core::config::ViewerConfig;
use matchview_core::controller::SummaryView;
use matchview_core::model::ImageId;

#[derive(Args)]
pub struct SummaryArgs {
    /// Image id of the first image
    pub a: ImageId,

    /// Image id of the second image
    pub b: ImageId,
}

pub fn run(args: &SummaryArgs, config: &ViewerConfig) -> Result<()> {
    let api = super::connect(config);
    let images = api.images().context("Failed to list images")?;
    let name_of = |id: ImageId| {
        images
            .iter()
            .find(|e| e.id == id)
            .map_or_else(|| format!("image {id}"), |e| e.name.clone())
    };

    let view = match api.match_summary(args.a, args.b) {
        Ok(summary) => SummaryView::from_summary(summary),
        Err(e) => {
            tracing::warn!("match summary failed: {e}");
            SummaryView::unavailable()
        }
    };

    crate::summary::print_pair_summary(&name_of(args.a), &name_of(args.b), &view);
    Ok(())
}
