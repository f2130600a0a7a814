// SPDX-License-Identifier: GPL-3.0-only

//! CLI commands for offline processing and the synthetic demo
//!
//! This module provides command-line functionality for:
//! - Clipping the background out of a color/depth image pair on disk
//! - Running the full pipeline against the synthetic frame source

use chrono::Local;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use depthclip::capture::SyntheticSource;
use depthclip::config::Config;
use depthclip::constants::BACKGROUND_SENTINEL;
use depthclip::errors::{AppError, AppResult};
use depthclip::frame::ColorFrame;
use depthclip::media;
use depthclip::pipeline::run_pipeline;
use depthclip::tracking::FixedPointDetector;

/// Clip the background out of a color PNG using a 16-bit depth PNG
///
/// The depth image must be the same size as the color image and already
/// aligned to its pixel grid; samples are raw sensor units scaled by
/// `depth_scale` to meters.
pub fn process_images(
    color_path: PathBuf,
    depth_path: PathBuf,
    depth_scale: f32,
    clipping_dist: Option<f32>,
    output: Option<PathBuf>,
) -> AppResult<()> {
    let config = Config::load();
    let clipping_dist = clipping_dist.unwrap_or(config.clipping.fallback_m);
    let output = output.unwrap_or_else(default_output_path);

    media::clip_files(&color_path, &depth_path, depth_scale, clipping_dist, &output)?;

    println!("Saved clipped frame to {}", output.display());
    Ok(())
}

/// Run the pipeline on the synthetic scene until ctrl-c or the frame limit
pub fn run_demo(frames: Option<u64>, config: &Config) -> AppResult<()> {
    let running = Arc::new(AtomicBool::new(true));
    let handler_flag = Arc::clone(&running);
    ctrlc::set_handler(move || handler_flag.store(false, Ordering::SeqCst))
        .map_err(|e| AppError::Other(e.to_string()))?;

    let mut source = SyntheticSource::with_dimensions(config.demo_width, config.demo_height);
    if let Some(count) = frames {
        source = source.with_frame_limit(count);
    }
    let mut detector = FixedPointDetector::centered(config.demo_width, config.demo_height);

    println!(
        "Running synthetic demo at {}x{} (ctrl-c to stop)",
        config.demo_width, config.demo_height
    );

    let mut presented = 0u64;
    let mut sink = |frame: &ColorFrame| {
        presented += 1;
        if presented % 30 == 0 {
            let background = frame
                .data()
                .iter()
                .filter(|&&b| b == BACKGROUND_SENTINEL)
                .count();
            let ratio = background as f64 / frame.data().len() as f64;
            println!(
                "frame {:>5}: {:.1}% of bytes clipped to background",
                presented,
                ratio * 100.0
            );
        }
    };

    let stats = run_pipeline(&mut source, &mut detector, &config.clipping, &mut sink, || {
        running.load(Ordering::SeqCst)
    });

    println!(
        "Done: {} frames processed, {} skipped, {} detections",
        stats.processed, stats.skipped, stats.detections
    );
    Ok(())
}

/// Default output path: timestamped file in the working directory
fn default_output_path() -> PathBuf {
    PathBuf::from(format!(
        "clipped_{}.png",
        Local::now().format("%Y%m%d_%H%M%S")
    ))
}
