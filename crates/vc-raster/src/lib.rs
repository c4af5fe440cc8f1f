//! VideoCore raster transform pipeline.
//!
//! A DispmanX snapshot arrives as a raw buffer in one of the VideoCore
//! pixel encodings, laid out in the display's native composition order
//! with rows padded to a 16-pixel boundary. This crate turns that buffer
//! into a canonical 8-bit-per-channel raster in the display's logical
//! orientation: [`PixelFormat`] expands sub-8-bit channels, [`SourceMap`]
//! undoes the hardware rotation/flip by addressing source pixels directly
//! (no intermediate rotated copy), and [`assemble`] drives both over the
//! output space one row at a time.

use std::fmt;

mod assemble;
mod format;
mod map;
mod raster;
mod transform;

pub use assemble::assemble;
pub use format::{ColorMode, PixelFormat};
pub use map::{RowMap, SourceMap};
pub use raster::{CapturedRaster, OutputRaster, aligned_pitch};
pub use transform::{FLIP_HORIZONTAL, FLIP_VERTICAL, Transform};

/// Errors detected before any pixel is converted.
///
/// Every variant is a configuration or sizing problem: once `assemble`
/// starts writing output rows, no further failure is possible.
#[derive(Debug, PartialEq, Eq)]
pub enum RasterError {
    /// Width or height of zero.
    InvalidDimensions { width: u32, height: u32 },
    /// Rotation quadrant outside 0..=3.
    InvalidQuadrant(u8),
    /// Row pitch smaller than one row of pixels.
    PitchTooSmall { pitch: usize, min: usize },
    /// Capture buffer shorter than `pitch * height`.
    BufferTooSmall { len: usize, need: usize },
    /// Captured dimensions inconsistent with the transform: an odd
    /// quadrant requires the capture's width/height to be the output's
    /// height/width, an even quadrant requires them to match directly.
    DimensionMismatch {
        captured: (u32, u32),
        output: (u32, u32),
    },
}

impl fmt::Display for RasterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { width, height } => {
                write!(f, "invalid dimensions: {width}x{height}")
            }
            Self::InvalidQuadrant(q) => write!(f, "invalid rotation quadrant: {q}"),
            Self::PitchTooSmall { pitch, min } => {
                write!(f, "pitch {pitch} smaller than row size {min}")
            }
            Self::BufferTooSmall { len, need } => {
                write!(f, "capture buffer is {len} bytes, need {need}")
            }
            Self::DimensionMismatch { captured, output } => write!(
                f,
                "captured {}x{} does not match output {}x{} under the display transform",
                captured.0, captured.1, output.0, output.1,
            ),
        }
    }
}

impl std::error::Error for RasterError {}
