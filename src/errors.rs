// SPDX-License-Identifier: GPL-3.0-only

//! Error types for depth-guided frame processing

use std::fmt;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Main application error type
#[derive(Debug, Clone)]
pub enum AppError {
    /// Frame-level precondition violations
    Frame(FrameError),
    /// Configuration errors
    Config(String),
    /// Image decode/encode errors
    Image(String),
    /// Storage/filesystem errors
    Storage(String),
    /// Generic error with message
    Other(String),
}

/// Frame-level errors raised at the engine boundary.
///
/// These are precondition violations on the buffers handed over by the
/// capture/alignment collaborator. They are detected before any pixel is
/// touched, so a rejected frame leaves the color buffer unmodified.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameError {
    /// Depth and color buffers do not cover the same pixel grid
    DimensionMismatch {
        color: (u32, u32),
        depth: (u32, u32),
    },
    /// Depth scale is zero, negative or not finite
    InvalidDepthScale(f32),
    /// Backing byte/sample storage does not match the declared dimensions
    BufferSize {
        expected: usize,
        actual: usize,
    },
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Frame(e) => write!(f, "Frame error: {}", e),
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
            AppError::Image(msg) => write!(f, "Image error: {}", msg),
            AppError::Storage(msg) => write!(f, "Storage error: {}", msg),
            AppError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::DimensionMismatch { color, depth } => write!(
                f,
                "Depth/color dimension mismatch: color is {}x{}, depth is {}x{}",
                color.0, color.1, depth.0, depth.1
            ),
            FrameError::InvalidDepthScale(scale) => {
                write!(f, "Invalid depth scale: {} (must be finite and > 0)", scale)
            }
            FrameError::BufferSize { expected, actual } => write!(
                f,
                "Buffer size mismatch: expected {} bytes, got {}",
                expected, actual
            ),
        }
    }
}

impl std::error::Error for AppError {}
impl std::error::Error for FrameError {}

impl From<FrameError> for AppError {
    fn from(err: FrameError) -> Self {
        AppError::Frame(err)
    }
}

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError::Other(msg)
    }
}

impl From<&str> for AppError {
    fn from(msg: &str) -> Self {
        AppError::Other(msg.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<image::ImageError> for AppError {
    fn from(err: image::ImageError) -> Self {
        AppError::Image(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Config(err.to_string())
    }
}
