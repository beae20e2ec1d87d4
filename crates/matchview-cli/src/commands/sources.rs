use anyhow::{Context, Result};
use clap::Args;
use matchview_core::api::ReconstructionApi;
use matchview_core::config::ViewerConfig;

#[derive(Args)]
pub struct SourcesArgs {
    /// Make this source active on the backend
    #[arg(long)]
    pub select: Option<String>,
}

pub fn run(args: &SourcesArgs, config: &ViewerConfig) -> Result<()> {
    let api = super::connect(config);
    let sources = api
        .sources()
        .with_context(|| format!("Failed to list sources from {}", api.base_url()))?;

    if let Some(ref name) = args.select {
        if !sources.contains(name) {
            anyhow::bail!("Unknown data source '{}'", name);
        }
        api.set_source(name)
            .with_context(|| format!("Failed to switch to source '{}'", name))?;
        println!("Active source: {}", name);
        return Ok(());
    }

    if sources.is_empty() {
        println!("No data sources available");
        return Ok(());
    }
    for (i, name) in sources.iter().enumerate() {
        println!("{:>3}. {}", i + 1, name);
    }
    Ok(())
}
