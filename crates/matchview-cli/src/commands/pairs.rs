use anyhow::{Context, Result};
use clap::Args;
use matchview_core::api::ReconstructionApi;
use matchview_core::config::ViewerConfig;
use matchview_core::model::ImageId;

#[derive(Args)]
pub struct PairsArgs {
    /// Image id
    pub id: ImageId,

    /// Also fetch match statistics for every pair
    #[arg(long)]
    pub stats: bool,
}

pub fn run(args: &PairsArgs, config: &ViewerConfig) -> Result<()> {
    let api = super::connect(config);
    let images = api.images().context("Failed to list images")?;
    let partners = api
        .matches_for_image(args.id)
        .with_context(|| format!("Failed to load match candidates for image {}", args.id))?;

    let name_of = |id: ImageId| {
        images
            .iter()
            .find(|e| e.id == id)
            .map_or("?", |e| e.name.as_str())
    };

    println!(
        "Images matched with {} ({}): {}",
        args.id,
        name_of(args.id),
        partners.len()
    );
    if args.stats {
        println!("{:>8}  {:>8}  {:>8}  {}", "ID", "Inliers", "Total", "Name");
    } else {
        println!("{:>8}  {}", "ID", "Name");
    }
    println!("{}", "-".repeat(40));

    for id in partners {
        if args.stats {
            let summary = api
                .match_summary(args.id, id)
                .with_context(|| format!("Failed to load match summary for {} / {}", args.id, id))?;
            let count = |v: Option<u64>| v.map_or_else(|| "-".to_string(), |n| n.to_string());
            println!(
                "{:>8}  {:>8}  {:>8}  {}",
                id,
                count(summary.inlier_count),
                count(summary.total_matches),
                name_of(id)
            );
        } else {
            println!("{:>8}  {}", id, name_of(id));
        }
    }
    Ok(())
}
