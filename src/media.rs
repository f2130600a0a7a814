// SPDX-License-Identifier: GPL-3.0-only

//! Image file decode/encode for offline processing
//!
//! Bridges image files on disk into the typed frame model. Color images
//! decode to RGB24; depth images must be 16-bit grayscale so the raw
//! sensor units survive the file round trip without rescaling.

use std::path::Path;
use std::time::Instant;
use tracing::info;

use crate::engine::remove_background;
use crate::errors::{AppError, AppResult};
use crate::frame::{ColorFrame, DepthFrame, PixelFormat};

/// Decode a color image into an RGB24 frame
pub fn load_color(path: &Path) -> AppResult<ColorFrame> {
    let img = image::open(path)?.to_rgb8();
    let (width, height) = img.dimensions();
    Ok(ColorFrame::from_raw(
        width,
        height,
        PixelFormat::Rgb24,
        img.into_raw(),
    )?)
}

/// Decode a depth raster from a 16-bit grayscale image
///
/// Other bit depths are rejected rather than converted: a `to_luma16`
/// conversion would rescale 8-bit samples by 257 and silently corrupt
/// the raw sensor units.
pub fn load_depth(path: &Path, depth_scale: f32) -> AppResult<DepthFrame> {
    match image::open(path)? {
        image::DynamicImage::ImageLuma16(img) => {
            let (width, height) = img.dimensions();
            Ok(DepthFrame::from_samples(
                width,
                height,
                img.into_raw(),
                depth_scale,
            )?)
        }
        other => Err(AppError::Image(format!(
            "depth image must be 16-bit grayscale, got {:?}",
            other.color()
        ))),
    }
}

/// Encode an RGB24 frame to an image file
pub fn save_color(frame: &ColorFrame, path: &Path) -> AppResult<()> {
    if frame.format() != PixelFormat::Rgb24 {
        return Err(AppError::Image(format!(
            "cannot encode {} frame as RGB output",
            frame.format()
        )));
    }
    image::save_buffer(
        path,
        frame.data(),
        frame.width(),
        frame.height(),
        image::ExtendedColorType::Rgb8,
    )?;
    Ok(())
}

/// Clip the background out of a color/depth image pair on disk
///
/// Loads both files, runs the engine with the given clipping distance
/// and writes the clipped color frame to `output`.
pub fn clip_files(
    color_path: &Path,
    depth_path: &Path,
    depth_scale: f32,
    clipping_dist: f32,
    output: &Path,
) -> AppResult<()> {
    let mut color = load_color(color_path)?;
    let depth = load_depth(depth_path, depth_scale)?;

    info!(
        width = color.width(),
        height = color.height(),
        depth_scale,
        clipping_dist_m = clipping_dist,
        "Processing image pair"
    );

    let start = Instant::now();
    remove_background(&mut color, &depth, clipping_dist)?;
    info!(elapsed_ms = start.elapsed().as_millis() as u64, "Clipped");

    save_color(&color, output)
}
