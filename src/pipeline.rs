// SPDX-License-Identifier: GPL-3.0-only

//! Per-frame processing pipeline
//!
//! Ties the collaborators together in the per-frame order: acquire an
//! aligned pair, run landmark detection, derive the clipping distance,
//! segment, hand the clipped frame to the display sink. A frame that
//! fails the engine's preconditions is skipped with a warning, never
//! forwarded with corrupt pixels and never allowed to kill the loop;
//! the sink simply keeps showing its previous frame.

use tracing::{info, warn};

use crate::capture::FrameSource;
use crate::engine::remove_background;
use crate::frame::ColorFrame;
use crate::tracking::{ClippingPolicy, LandmarkDetector};

/// Consumer of clipped frames
///
/// The frame is read-only once presented; the pipeline reuses nothing
/// after the call.
pub trait DisplaySink {
    fn present(&mut self, frame: &ColorFrame);
}

impl<F: FnMut(&ColorFrame)> DisplaySink for F {
    fn present(&mut self, frame: &ColorFrame) {
        self(frame)
    }
}

/// Counters accumulated over one pipeline run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    /// Frames segmented and presented
    pub processed: u64,
    /// Frames rejected at the engine boundary
    pub skipped: u64,
    /// Frames on which the detector reported a point of interest
    pub detections: u64,
}

/// Drive the pipeline until the source is exhausted or `should_continue`
/// returns false
///
/// `should_continue` is polled once per frame, before acquisition, so a
/// shutdown request is honored at the next frame boundary and no frame
/// is abandoned half-processed.
pub fn run_pipeline<S, D, K, C>(
    source: &mut S,
    detector: &mut D,
    policy: &ClippingPolicy,
    sink: &mut K,
    mut should_continue: C,
) -> PipelineStats
where
    S: FrameSource,
    D: LandmarkDetector,
    K: DisplaySink,
    C: FnMut() -> bool,
{
    let mut stats = PipelineStats::default();

    while should_continue() {
        let Some((mut color, depth)) = source.next_frame() else {
            info!("Frame source exhausted");
            break;
        };

        let poi = detector.detect(&color);
        if poi.is_some() {
            stats.detections += 1;
        }
        let clipping_dist = policy.clipping_distance(&depth, poi);

        match remove_background(&mut color, &depth, clipping_dist) {
            Ok(()) => {
                sink.present(&color);
                stats.processed += 1;
            }
            Err(e) => {
                warn!(error = %e, "Skipping frame");
                stats.skipped += 1;
            }
        }
    }

    info!(
        processed = stats.processed,
        skipped = stats.skipped,
        detections = stats.detections,
        "Pipeline run finished"
    );

    stats
}
