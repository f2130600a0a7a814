// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

/// Byte value written into every channel of a background pixel.
///
/// Writing the same byte to all channels renders as gray regardless of the
/// color buffer's channel order, so the engine never needs to know the
/// pixel layout.
pub const BACKGROUND_SENTINEL: u8 = 0x99;

/// Margin added behind a tracked point of interest when deriving the
/// clipping distance (meters). A face landmark sits on the front of the
/// head; the margin keeps the rest of the person in the foreground.
pub const POI_DEPTH_MARGIN_M: f32 = 0.30;

/// Clipping distance used when no point of interest was detected (meters).
///
/// Large enough that background removal is effectively disabled for
/// typical indoor scenes.
pub const FALLBACK_CLIPPING_DISTANCE_M: f32 = 10.0;

/// Minimum pixel count before the engine partitions rows across the
/// rayon pool. Below this the frame fits comfortably in one worker and
/// the fork/join overhead is not worth paying.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 64 * 64;

/// Default frame dimensions for the synthetic demo source.
pub const DEFAULT_WIDTH: u32 = 640;
/// Default frame dimensions for the synthetic demo source.
pub const DEFAULT_HEIGHT: u32 = 480;
