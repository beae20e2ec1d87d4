use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use matchview_core::api::wire::tag_matches;
use matchview_core::api::ReconstructionApi;
use matchview_core::config::ViewerConfig;
use matchview_core::model::{ImageData, ImageId, MatchClass};

#[derive(Clone, ValueEnum)]
pub enum MatchTypeArg {
    Inlier,
    Outlier,
    All,
}

impl MatchTypeArg {
    fn classes(&self) -> &'static [MatchClass] {
        match self {
            MatchTypeArg::Inlier => &[MatchClass::Inlier],
            MatchTypeArg::Outlier => &[MatchClass::Outlier],
            MatchTypeArg::All => &MatchClass::ALL,
        }
    }
}

#[derive(Args)]
pub struct MatchesArgs {
    /// Image id of the first image
    pub a: ImageId,

    /// Image id of the second image
    pub b: ImageId,

    /// Which matches to list
    #[arg(long = "type", value_enum, default_value = "inlier")]
    pub match_type: MatchTypeArg,

    /// Show at most N correspondences
    #[arg(long, default_value = "50")]
    pub limit: usize,
}

pub fn run(args: &MatchesArgs, config: &ViewerConfig) -> Result<()> {
    let api = super::connect(config);
    let image_a = api
        .image_data(args.a)
        .with_context(|| format!("Failed to load image {}", args.a))?;
    let image_b = api
        .image_data(args.b)
        .with_context(|| format!("Failed to load image {}", args.b))?;

    let mut all = Vec::new();
    for &class in args.match_type.classes() {
        let pairs = api
            .matches(args.a, args.b, Some(class))
            .with_context(|| format!("Failed to load {} matches {}/{}", class, args.a, args.b))?;
        all.extend(tag_matches(pairs, class));
    }

    println!(
        "{} -> {}: {} correspondences",
        image_a.name,
        image_b.name,
        all.len()
    );
    println!(
        "{:>7}  {:>20}  {:>7}  {:>20}  {}",
        "A idx", "A position", "B idx", "B position", "Class"
    );
    println!("{}", "-".repeat(72));

    for m in all.iter().take(args.limit) {
        println!(
            "{:>7}  {:>20}  {:>7}  {:>20}  {}",
            m.index_a,
            position(&image_a, m.index_a),
            m.index_b,
            position(&image_b, m.index_b),
            m.class
        );
    }
    if all.len() > args.limit {
        println!("... {} more", all.len() - args.limit);
    }
    Ok(())
}

fn position(image: &ImageData, index: usize) -> String {
    match image.point(index) {
        Some(p) => format!("({:.1}, {:.1})", p.x, p.y),
        None => "out of range".to_string(),
    }
}
