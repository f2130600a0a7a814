// SPDX-License-Identifier: GPL-3.0-only

//! Per-frame clipping-distance derivation
//!
//! With a tracked point of interest the clipping distance is the depth
//! at that pixel plus a margin, so the tracked subject stays foreground
//! with a little room behind them. Without one, a wide fallback keeps
//! everything at typical indoor range in the foreground.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::{FALLBACK_CLIPPING_DISTANCE_M, POI_DEPTH_MARGIN_M};
use crate::frame::DepthFrame;
use crate::tracking::landmark::PointOfInterest;

/// Policy turning an optional point of interest into a clipping distance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClippingPolicy {
    /// Margin added behind the tracked point (meters)
    pub margin_m: f32,
    /// Clipping distance when nothing is tracked (meters)
    pub fallback_m: f32,
}

impl Default for ClippingPolicy {
    fn default() -> Self {
        Self {
            margin_m: POI_DEPTH_MARGIN_M,
            fallback_m: FALLBACK_CLIPPING_DISTANCE_M,
        }
    }
}

impl ClippingPolicy {
    /// Derive the clipping distance for one frame (meters)
    ///
    /// A point with no valid depth reading under it (sensor reported 0,
    /// or a coordinate outside the frame) is treated like "no detection"
    /// rather than producing a zero threshold that would clip the whole
    /// frame.
    pub fn clipping_distance(&self, depth: &DepthFrame, poi: Option<PointOfInterest>) -> f32 {
        match poi {
            Some(point) => match depth.distance_at(point.x, point.y) {
                Some(distance) => {
                    debug!(
                        x = point.x,
                        y = point.y,
                        distance_m = distance,
                        "Tracking point of interest"
                    );
                    distance + self.margin_m
                }
                None => {
                    debug!(
                        x = point.x,
                        y = point.y,
                        "Point of interest has no depth reading, using fallback"
                    );
                    self.fallback_m
                }
            },
            None => self.fallback_m,
        }
    }
}
