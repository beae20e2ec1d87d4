use anyhow::{Context, Result};
use clap::Args;
use matchview_core::api::ReconstructionApi;
use matchview_core::config::ViewerConfig;
use matchview_core::model::ImageId;

#[derive(Args)]
pub struct ImageArgs {
    /// Image id
    pub id: ImageId,
}

pub fn run(args: &ImageArgs, config: &ViewerConfig) -> Result<()> {
    let api = super::connect(config);
    let data = api
        .image_data(args.id)
        .with_context(|| format!("Failed to load image {}", args.id))?;
    let partners = api
        .matches_for_image(args.id)
        .with_context(|| format!("Failed to load match candidates for image {}", args.id))?;

    crate::summary::print_image_info(&data, partners.len());
    Ok(())
}
