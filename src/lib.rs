// SPDX-License-Identifier: GPL-3.0-only

//! depthclip - depth-guided background removal for aligned RGB-D streams
//!
//! This library removes the background from a color video stream using
//! co-registered depth data: every pixel farther than a clipping distance
//! (or with no valid depth reading) is painted over with a sentinel color,
//! everything nearer is left untouched.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`frame`]: Typed color and depth buffer views
//! - [`engine`]: The per-pixel background removal engine
//! - [`tracking`]: Clipping-distance policy driven by a tracked point of interest
//! - [`capture`]: Frame source boundary and processing-loop lifecycle
//! - [`pipeline`]: Per-frame acquire → track → segment → display control flow
//! - [`media`]: Image file decode/encode for offline processing
//! - [`config`]: User configuration handling
//!
//! Capture hardware, depth-to-color alignment and face landmark detection
//! are external collaborators; the crate only defines the seams
//! ([`capture::FrameSource`], [`tracking::LandmarkDetector`]) they plug into.
//!
//! # Example
//!
//! ```
//! use depthclip::engine::remove_background;
//! use depthclip::frame::{ColorFrame, DepthFrame, PixelFormat};
//!
//! let mut color = ColorFrame::new(2, 1, PixelFormat::Rgb24);
//! let depth = DepthFrame::from_samples(2, 1, vec![1000, 0], 0.001).unwrap();
//!
//! // Pixel 0 is 1.0 m away and survives; pixel 1 has no depth reading
//! // and is painted with the background sentinel.
//! remove_background(&mut color, &depth, 1.5).unwrap();
//! ```

pub mod capture;
pub mod config;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod frame;
pub mod media;
pub mod pipeline;
pub mod tracking;

// Re-export commonly used types
pub use config::Config;
pub use engine::remove_background;
pub use errors::{AppError, FrameError};
pub use frame::{ColorFrame, DepthFrame, PixelFormat};
pub use tracking::{ClippingPolicy, PointOfInterest};
