// SPDX-License-Identifier: GPL-3.0-only

//! Point-of-interest tracking and the per-frame clipping-distance policy
//!
//! Face/landmark detection itself is an external collaborator; this module
//! owns the seam it plugs into and the policy that turns its output into
//! the clipping distance fed to the engine.

pub mod clipping;
pub mod landmark;

pub use clipping::ClippingPolicy;
pub use landmark::{FixedPointDetector, LandmarkDetector, NullDetector, PointOfInterest};
