mod scenes;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use scenes::Scene;
use tinyrender::{AntiAliasing, RenderConfig};

/// Render the demo scenes to image files.
#[derive(Parser, Debug)]
#[command(name = "tinyrender", version, about = "CPU software rasterizer demo")]
struct Args {
    /// RON render config; defaults are used when omitted.
    config: Option<PathBuf>,

    /// Override the output directory from the config.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable debug logging (per-draw statistics).
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose { "tinyrender=debug" } else { "tinyrender=info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp_millis()
        .init();

    let mut config = match &args.config {
        Some(path) => RenderConfig::load(path).with_context(|| format!("reading {}", path.display()))?,
        None => RenderConfig::default(),
    };
    if let Some(output) = args.output {
        config.output_dir = output;
    }

    fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("creating {}", config.output_dir.display()))?;
    info!(
        "rendering {}x{} with {} into {}",
        config.width,
        config.height,
        config.anti_aliasing,
        config.output_dir.display()
    );
    if config.anti_aliasing == AntiAliasing::Noaa {
        info!("anti-aliasing is off; edges in msaa.tga will be jagged");
    }

    let scene = Scene::new();
    scenes::msaa(&config, &scene)?;
    scenes::alpha_blend(&config, &scene)?;
    scenes::point_light(&config, &scene)?;
    Ok(())
}
