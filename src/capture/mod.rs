// SPDX-License-Identifier: GPL-3.0-only

//! Frame acquisition boundary
//!
//! Real capture hardware and depth-to-color alignment live outside this
//! crate. [`FrameSource`] is the seam they plug into: whatever produces
//! frames must hand over a color/depth pair already re-projected onto
//! the same pixel grid, with the sensor's depth scale baked into the
//! [`DepthFrame`]. Only a synthetic implementation ships here, used by
//! the demo command and the integration tests.

pub mod frame_loop;

pub use frame_loop::{LoopAction, ProcessingLoop};

use crate::constants::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::frame::{ColorFrame, DepthFrame, PixelFormat};

/// Source of pixel-aligned color/depth frame pairs
///
/// Returning None means the stream is exhausted; the processing loop
/// stops. The co-registration of the two buffers is this collaborator's
/// contract, the engine only re-checks the dimensions.
pub trait FrameSource {
    fn next_frame(&mut self) -> Option<(ColorFrame, DepthFrame)>;
}

/// Deterministic generated scene standing in for a depth camera
///
/// Renders a near rectangular "subject" drifting horizontally over a far
/// background plane, with a band of dropped depth readings along the top
/// edge (real sensors lose readings at range discontinuities and IR
/// shadows). Every frame is derived from the frame index alone, so tests
/// can predict exact pixel values.
pub struct SyntheticSource {
    width: u32,
    height: u32,
    depth_scale: f32,
    /// Raw units for the subject and the background plane
    subject_depth: u16,
    background_depth: u16,
    frames_remaining: Option<u64>,
    frame_index: u64,
}

impl SyntheticSource {
    /// Scene at the default demo resolution, subject at 1.0 m,
    /// background at 3.0 m, 1 mm depth units
    pub fn new() -> Self {
        Self::with_dimensions(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }

    pub fn with_dimensions(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            depth_scale: 0.001,
            subject_depth: 1000,
            background_depth: 3000,
            frames_remaining: None,
            frame_index: 0,
        }
    }

    /// Stop after `count` frames instead of streaming forever
    pub fn with_frame_limit(mut self, count: u64) -> Self {
        self.frames_remaining = Some(count);
        self
    }

    pub fn depth_scale(&self) -> f32 {
        self.depth_scale
    }

    /// Center of the subject rectangle for the current frame
    ///
    /// The demo's fixed-point "landmark" tracks this coordinate.
    pub fn subject_center(&self) -> (u32, u32) {
        let span = (self.width / 4).max(1);
        let x = self.width / 2 + (self.frame_index % span as u64) as u32 - span / 2;
        (x.min(self.width.saturating_sub(1)), self.height / 2)
    }

    fn subject_bounds(&self) -> (u32, u32, u32, u32) {
        let (cx, cy) = self.subject_center();
        let half_w = self.width / 8;
        let half_h = self.height / 4;
        (
            cx.saturating_sub(half_w),
            (cx + half_w).min(self.width.saturating_sub(1)),
            cy.saturating_sub(half_h),
            (cy + half_h).min(self.height.saturating_sub(1)),
        )
    }
}

impl Default for SyntheticSource {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameSource for SyntheticSource {
    fn next_frame(&mut self) -> Option<(ColorFrame, DepthFrame)> {
        if let Some(remaining) = self.frames_remaining.as_mut() {
            if *remaining == 0 {
                return None;
            }
            *remaining -= 1;
        }

        let (x0, x1, y0, y1) = self.subject_bounds();
        let dropout_rows = self.height / 16;

        let mut color = Vec::with_capacity(self.width as usize * self.height as usize * 3);
        let mut samples = Vec::with_capacity(self.width as usize * self.height as usize);

        for y in 0..self.height {
            for x in 0..self.width {
                let on_subject = x >= x0 && x <= x1 && y >= y0 && y <= y1;
                let sample = if y < dropout_rows {
                    0
                } else if on_subject {
                    self.subject_depth
                } else {
                    self.background_depth
                };
                samples.push(sample);

                // Horizontal gradient with a distinct subject tint, so
                // clipped output is visually obvious
                let shade = (x * 255 / self.width.max(1)) as u8;
                if on_subject {
                    color.extend_from_slice(&[220, shade, 80]);
                } else {
                    color.extend_from_slice(&[shade, shade, shade]);
                }
            }
        }

        self.frame_index += 1;

        let color = ColorFrame::from_raw(self.width, self.height, PixelFormat::Rgb24, color)
            .expect("generated buffer matches dimensions");
        let depth = DepthFrame::from_samples(self.width, self.height, samples, self.depth_scale)
            .expect("generated samples match dimensions");
        Some((color, depth))
    }
}
