// SPDX-License-Identifier: GPL-3.0-only
// Shared frame types for the processing pipeline

//! Typed color and depth buffer views
//!
//! Frames are plain owned rasters with explicit dimensions and per-pixel
//! stride. All access is bounds-checked through typed accessors; the raw
//! backing bytes are only reinterpreted in one place (the u16 depth view,
//! via bytemuck) and never exposed as untyped memory in the public API.

use serde::{Deserialize, Serialize};

use crate::errors::FrameError;

/// Pixel format for color frames
///
/// The background removal engine itself is layout-agnostic and only
/// consumes the byte stride; the format matters to the CLI and any
/// display consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PixelFormat {
    /// RGB - 24-bit, 3 bytes per pixel, no alpha
    #[default]
    Rgb24,
    /// BGR - 24-bit, 3 bytes per pixel (common camera byte order)
    Bgr24,
    /// RGBA - 32-bit with alpha, 4 bytes per pixel
    Rgba,
    /// Gray8 - 8-bit single channel
    Gray8,
}

impl PixelFormat {
    /// Bytes per pixel for this format
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            Self::Rgb24 | Self::Bgr24 => 3,
            Self::Rgba => 4,
            Self::Gray8 => 1,
        }
    }
}

impl std::fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rgb24 => write!(f, "RGB24"),
            Self::Bgr24 => write!(f, "BGR24"),
            Self::Rgba => write!(f, "RGBA"),
            Self::Gray8 => write!(f, "GRAY8"),
        }
    }
}

/// A mutable color raster, row-major, `bytes_per_pixel` bytes per pixel
#[derive(Debug, Clone)]
pub struct ColorFrame {
    width: u32,
    height: u32,
    format: PixelFormat,
    data: Vec<u8>,
}

impl ColorFrame {
    /// Create a zero-filled color frame
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Self {
        let len = width as usize * height as usize * format.bytes_per_pixel();
        Self {
            width,
            height,
            format,
            data: vec![0; len],
        }
    }

    /// Wrap an existing byte buffer, validating its size against the
    /// declared dimensions
    pub fn from_raw(
        width: u32,
        height: u32,
        format: PixelFormat,
        data: Vec<u8>,
    ) -> Result<Self, FrameError> {
        let expected = width as usize * height as usize * format.bytes_per_pixel();
        if data.len() != expected {
            return Err(FrameError::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            format,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Bytes per pixel of the backing buffer
    pub fn bytes_per_pixel(&self) -> usize {
        self.format.bytes_per_pixel()
    }

    /// Total pixel count (`width * height`)
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Byte length of one row
    pub fn row_bytes(&self) -> usize {
        self.width as usize * self.bytes_per_pixel()
    }

    /// Read-only view of the backing bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable view of the backing bytes
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the frame, returning the backing bytes
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Bytes of the pixel at `(x, y)`, or None when out of bounds
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let bpp = self.bytes_per_pixel();
        let offset = (y as usize * self.width as usize + x as usize) * bpp;
        Some(&self.data[offset..offset + bpp])
    }
}

/// A read-only depth raster: one u16 sample per pixel, row-major
///
/// Samples are raw sensor units; multiplying by `depth_scale` yields
/// meters. A sample value of 0 means "no valid depth reading".
#[derive(Debug, Clone)]
pub struct DepthFrame {
    width: u32,
    height: u32,
    depth_scale: f32,
    samples: Vec<u16>,
}

impl DepthFrame {
    /// Build a depth frame from u16 samples, validating count and scale
    ///
    /// The depth scale is fixed per capture session by the sensor; a
    /// non-positive or non-finite scale is rejected here so the engine
    /// never sees one.
    pub fn from_samples(
        width: u32,
        height: u32,
        samples: Vec<u16>,
        depth_scale: f32,
    ) -> Result<Self, FrameError> {
        if !(depth_scale.is_finite() && depth_scale > 0.0) {
            return Err(FrameError::InvalidDepthScale(depth_scale));
        }
        let expected = width as usize * height as usize;
        if samples.len() != expected {
            return Err(FrameError::BufferSize {
                expected,
                actual: samples.len(),
            });
        }
        Ok(Self {
            width,
            height,
            depth_scale,
            samples,
        })
    }

    /// Build a depth frame from raw little-endian bytes as delivered by
    /// 16-bit depth sensors
    ///
    /// This is the single sanctioned byte-to-sample reinterpretation in
    /// the crate; everything downstream works on the typed u16 view.
    pub fn from_raw_bytes(
        width: u32,
        height: u32,
        bytes: &[u8],
        depth_scale: f32,
    ) -> Result<Self, FrameError> {
        let expected = width as usize * height as usize * 2;
        if bytes.len() != expected {
            return Err(FrameError::BufferSize {
                expected,
                actual: bytes.len(),
            });
        }
        // pod_collect_to_vec handles the u8 -> u16 alignment change
        let samples: Vec<u16> = bytemuck::pod_collect_to_vec(bytes);
        Self::from_samples(width, height, samples, depth_scale)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Meters per raw depth unit
    pub fn depth_scale(&self) -> f32 {
        self.depth_scale
    }

    /// Total pixel count (`width * height`)
    pub fn pixel_count(&self) -> usize {
        self.samples.len()
    }

    /// Typed view of all samples, row-major
    pub fn samples(&self) -> &[u16] {
        &self.samples
    }

    /// Raw sample at `(x, y)`, or None when out of bounds
    pub fn sample_at(&self, x: u32, y: u32) -> Option<u16> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.samples[y as usize * self.width as usize + x as usize])
    }

    /// Distance in meters at `(x, y)`
    ///
    /// Returns None when the coordinate is out of bounds or the sensor
    /// reported no reading (sample 0) for that pixel.
    pub fn distance_at(&self, x: u32, y: u32) -> Option<f32> {
        let sample = self.sample_at(x, y)?;
        if sample == 0 {
            return None;
        }
        Some(self.depth_scale * sample as f32)
    }
}
