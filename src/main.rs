// SPDX-License-Identifier: GPL-3.0-only

use clap::{Parser, Subcommand};
use depthclip::config::Config;
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "depthclip")]
#[command(about = "Depth-guided background removal for aligned RGB-D frames")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clip the background out of a color/depth image pair
    Process {
        /// Color image (PNG/JPEG, decoded to RGB)
        #[arg(short, long)]
        color: PathBuf,

        /// Aligned 16-bit grayscale depth image (raw sensor units)
        #[arg(short, long)]
        depth: PathBuf,

        /// Meters per raw depth unit
        #[arg(short = 's', long, default_value = "0.001")]
        depth_scale: f32,

        /// Clipping distance in meters (default: configured fallback)
        #[arg(short = 'm', long)]
        clipping_dist: Option<f32>,

        /// Output file path (default: clipped_TIMESTAMP.png)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run the pipeline against the synthetic frame source
    Demo {
        /// Stop after this many frames instead of running until ctrl-c
        #[arg(short, long)]
        frames: Option<u64>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    // Set RUST_LOG environment variable to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=depthclip=debug, RUST_LOG=info
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    let args = Cli::parse();

    match args.command {
        Commands::Process {
            color,
            depth,
            depth_scale,
            clipping_dist,
            output,
        } => cli::process_images(color, depth, depth_scale, clipping_dist, output)?,
        Commands::Demo { frames } => {
            let config = Config::load();
            cli::run_demo(frames, &config)?;
        }
    }

    Ok(())
}
