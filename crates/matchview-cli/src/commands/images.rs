use anyhow::{Context, Result};
use clap::Args;
use matchview_core::api::ReconstructionApi;
use matchview_core::config::ViewerConfig;

#[derive(Args)]
pub struct ImagesArgs {
    /// Only list images whose name contains this text
    #[arg(long)]
    pub filter: Option<String>,
}

pub fn run(args: &ImagesArgs, config: &ViewerConfig) -> Result<()> {
    let api = super::connect(config);
    let images = api
        .images()
        .with_context(|| format!("Failed to list images from {}", api.base_url()))?;

    let shown: Vec<_> = images
        .iter()
        .filter(|e| args.filter.as_ref().map_or(true, |f| e.name.contains(f.as_str())))
        .collect();

    println!("{:>8}  {:>11}  {}", "ID", "Size", "Name");
    println!("{}", "-".repeat(40));
    for entry in &shown {
        let size = match (entry.width, entry.height) {
            (Some(w), Some(h)) => format!("{}x{}", w, h),
            _ => "-".to_string(),
        };
        println!("{:>8}  {:>11}  {}", entry.id, size, entry.name);
    }
    println!("\n{} of {} images", shown.len(), images.len());
    Ok(())
}
