//! Splatview Application
//!
//! Opens a window with a bounded orbit camera and loads an asset in the
//! background while showing its progress.
//!
//! Controls:
//! - Left drag: orbit, right/middle drag: pan, wheel: zoom
//! - Arrow keys or WASD: move the camera within the scene bounds
//! - Escape: quit

use clap::Parser;
use splatview_scene::ViewerConfig;
use std::path::PathBuf;
use tracing::info;

/// Splatview - 3D viewer with a bounded orbit camera
#[derive(Parser, Debug)]
#[command(name = "splatview")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Asset file to load (overrides the config file)
    #[arg(short, long)]
    asset: Option<PathBuf>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() {
    let args = Args::parse();
    splatview_window::init_tracing(&args.log_level);

    let mut config = match args.config.as_ref() {
        Some(path) => match ViewerConfig::from_path(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Configuration error: {}", e);
                std::process::exit(1);
            }
        },
        None => ViewerConfig::default(),
    };
    if let Some(asset) = args.asset {
        config.asset_path = asset;
    }
    info!("Loading configuration done, asset: {}", config.asset_path.display());

    if let Err(e) = splatview_window::run(config) {
        eprintln!("Application error: {}", e);
        std::process::exit(1);
    }
}
