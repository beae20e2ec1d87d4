use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use matchview_core::config::ViewerConfig;

#[derive(Args)]
pub struct ConfigArgs {
    /// Write config to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the effective config (file and flags applied) instead of the defaults
    #[arg(long)]
    pub effective: bool,
}

/// Print or save the viewer config as TOML.
pub fn run(args: &ConfigArgs, effective: &ViewerConfig) -> Result<()> {
    let config = if args.effective {
        effective.clone()
    } else {
        ViewerConfig::default()
    };
    let toml_str = config.to_toml()?;

    if let Some(ref path) = args.output {
        std::fs::write(path, &toml_str)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        println!("Config saved to {}", path.display());
    } else {
        print!("{}", toml_str);
    }

    Ok(())
}
