// SPDX-License-Identifier: GPL-3.0-only

//! Landmark detector boundary
//!
//! The real detector (a face landmark model) lives outside this crate.
//! It reports at most one point of interest per frame; absence is an
//! ordinary outcome, not an error.

use crate::frame::ColorFrame;

/// A pixel coordinate worth tracking, e.g. the bridge of a detected nose
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointOfInterest {
    pub x: u32,
    pub y: u32,
}

impl PointOfInterest {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for PointOfInterest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Per-frame landmark detection seam
///
/// Implementations inspect the color frame and report a point of
/// interest when they find one. Returning None signals "no detection"
/// and makes the clipping policy fall back to its wide default.
pub trait LandmarkDetector {
    fn detect(&mut self, color: &ColorFrame) -> Option<PointOfInterest>;
}

/// Detector that never finds anything
///
/// Stands in for the external model when background removal should run
/// with the fallback clipping distance only.
#[derive(Debug, Default)]
pub struct NullDetector;

impl LandmarkDetector for NullDetector {
    fn detect(&mut self, _color: &ColorFrame) -> Option<PointOfInterest> {
        None
    }
}

/// Detector reporting a fixed coordinate on every frame
///
/// Used by the synthetic demo and tests, where the "face" position is
/// known by construction.
#[derive(Debug, Clone, Copy)]
pub struct FixedPointDetector {
    point: PointOfInterest,
}

impl FixedPointDetector {
    pub fn new(x: u32, y: u32) -> Self {
        Self {
            point: PointOfInterest::new(x, y),
        }
    }

    /// Fixed detector at the frame center
    pub fn centered(width: u32, height: u32) -> Self {
        Self::new(width / 2, height / 2)
    }
}

impl LandmarkDetector for FixedPointDetector {
    fn detect(&mut self, _color: &ColorFrame) -> Option<PointOfInterest> {
        Some(self.point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::PixelFormat;

    #[test]
    fn null_detector_reports_nothing() {
        let frame = ColorFrame::new(4, 4, PixelFormat::Rgb24);
        assert_eq!(NullDetector.detect(&frame), None);
    }

    #[test]
    fn fixed_detector_reports_its_point() {
        let frame = ColorFrame::new(8, 6, PixelFormat::Rgb24);
        let mut detector = FixedPointDetector::centered(8, 6);
        assert_eq!(detector.detect(&frame), Some(PointOfInterest::new(4, 3)));
    }
}
