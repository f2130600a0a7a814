// SPDX-License-Identifier: GPL-3.0-only

//! End-to-end pipeline tests over the public API

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use depthclip::capture::{FrameSource, LoopAction, ProcessingLoop, SyntheticSource};
use depthclip::constants::BACKGROUND_SENTINEL;
use depthclip::engine::remove_background;
use depthclip::frame::{ColorFrame, DepthFrame, PixelFormat};
use depthclip::pipeline::run_pipeline;
use depthclip::tracking::{
    ClippingPolicy, FixedPointDetector, LandmarkDetector, NullDetector, PointOfInterest,
};

#[test]
fn raw_sensor_bytes_to_clipped_frame() {
    // Depth arrives from sensors as little-endian u16 bytes; walk the
    // whole path from raw bytes to a clipped color buffer.
    let depth_bytes: Vec<u8> = [1000u16, 0, 2500, 800]
        .iter()
        .flat_map(|s| s.to_le_bytes())
        .collect();
    let depth = DepthFrame::from_raw_bytes(2, 2, &depth_bytes, 0.001).unwrap();

    let mut color =
        ColorFrame::from_raw(2, 2, PixelFormat::Rgb24, (1..=12).collect::<Vec<u8>>()).unwrap();
    remove_background(&mut color, &depth, 1.5).unwrap();

    // 1.0 m and 0.8 m survive; no-reading and 2.5 m are painted
    assert_eq!(color.pixel(0, 0).unwrap(), &[1, 2, 3]);
    assert_eq!(color.pixel(1, 0).unwrap(), &[BACKGROUND_SENTINEL; 3]);
    assert_eq!(color.pixel(0, 1).unwrap(), &[BACKGROUND_SENTINEL; 3]);
    assert_eq!(color.pixel(1, 1).unwrap(), &[10, 11, 12]);
}

#[test]
fn synthetic_scene_keeps_only_the_subject() {
    let mut source = SyntheticSource::with_dimensions(64, 64).with_frame_limit(5);
    let (cx, cy) = source.subject_center();
    let mut detector = FixedPointDetector::new(cx, cy);
    let policy = ClippingPolicy::default();

    let mut last = None;
    let mut sink = |frame: &ColorFrame| last = Some(frame.clone());

    let stats = run_pipeline(&mut source, &mut detector, &policy, &mut sink, || true);
    assert_eq!(stats.processed, 5);
    assert_eq!(stats.detections, 5);

    let frame = last.unwrap();
    let clipped_bytes = frame
        .data()
        .iter()
        .filter(|&&b| b == BACKGROUND_SENTINEL)
        .count();
    // The subject covers a minority of the frame, so most of it is clipped
    assert!(clipped_bytes > frame.data().len() / 2);
}

#[test]
fn without_detection_fallback_keeps_whole_scene() {
    // Background plane is 3.0 m, well inside the 10.0 m fallback, so a
    // frame with no detection keeps every pixel with a valid reading.
    let mut source = SyntheticSource::with_dimensions(32, 32).with_frame_limit(1);
    let policy = ClippingPolicy::default();

    let mut last = None;
    let mut sink = |frame: &ColorFrame| last = Some(frame.clone());
    run_pipeline(&mut source, &mut NullDetector, &policy, &mut sink, || true);

    let frame = last.unwrap();
    // Bottom row is valid background plane, untouched under the fallback
    let y = frame.height() - 1;
    for x in 0..frame.width() {
        assert_ne!(frame.pixel(x, y).unwrap(), &[BACKGROUND_SENTINEL; 3]);
    }
}

#[test]
fn pipeline_runs_on_a_processing_loop_thread() {
    let processed = Arc::new(AtomicU64::new(0));
    let processed_clone = Arc::clone(&processed);

    let mut source = SyntheticSource::with_dimensions(32, 32).with_frame_limit(10);
    let mut detector = FixedPointDetector::centered(32, 32);
    let policy = ClippingPolicy::default();

    let mut handle = ProcessingLoop::spawn("test-pipeline", move || {
        let Some((mut color, depth)) = source.next_frame() else {
            return LoopAction::Stop;
        };
        let poi = detector.detect(&color);
        let clipping_dist = policy.clipping_distance(&depth, poi);
        if remove_background(&mut color, &depth, clipping_dist).is_ok() {
            processed_clone.fetch_add(1, Ordering::SeqCst);
        }
        LoopAction::Continue
    });

    handle.join();
    assert_eq!(processed.load(Ordering::SeqCst), 10);
}

#[test]
fn mismatched_pair_is_skipped_not_fatal() {
    struct OneBadFrame {
        sent: bool,
    }

    impl FrameSource for OneBadFrame {
        fn next_frame(&mut self) -> Option<(ColorFrame, DepthFrame)> {
            if self.sent {
                return None;
            }
            self.sent = true;
            let color = ColorFrame::new(8, 8, PixelFormat::Rgb24);
            let depth = DepthFrame::from_samples(8, 4, vec![1000; 32], 0.001).unwrap();
            Some((color, depth))
        }
    }

    let mut source = OneBadFrame { sent: false };
    let mut sink = |_frame: &ColorFrame| panic!("skipped frame must not reach the sink");

    let stats = run_pipeline(
        &mut source,
        &mut NullDetector,
        &ClippingPolicy::default(),
        &mut sink,
        || true,
    );
    assert_eq!(stats.skipped, 1);
    assert_eq!(stats.processed, 0);
}

#[test]
fn point_of_interest_display_is_stable() {
    assert_eq!(PointOfInterest::new(12, 7).to_string(), "(12, 7)");
}
