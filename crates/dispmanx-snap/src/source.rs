//! Frame source boundary: where raw rasters come from.

use std::error::Error;

use vc_raster::{CapturedRaster, PixelFormat, RasterError};

/// What the display reports before capture: its mode dimensions and
/// the hardware transform code (rotation quadrant + flip bits).
#[derive(Debug, Clone, Copy)]
pub struct DisplayInfo {
    pub width: u32,
    pub height: u32,
    pub transform_code: u32,
}

/// A one-shot provider of raw display frames.
///
/// `capture` takes the *logical* output dimensions; when the display
/// transform has an odd rotation quadrant the implementation captures
/// with the axes swapped, so the returned raster already satisfies the
/// transform pipeline's dimension invariant.
pub trait FrameSource {
    /// Display mode and orientation, read before sizing the capture.
    fn display_info(&mut self) -> Result<DisplayInfo, Box<dyn Error>>;

    /// Capture one frame at the given logical size.
    fn capture(
        &mut self,
        format: PixelFormat,
        width: u32,
        height: u32,
    ) -> Result<CapturedRaster, Box<dyn Error>>;
}

/// Resolve the output dimensions from the display mode and the
/// requested width/height.
///
/// Both absent: the display size. One absent: scaled from the other to
/// keep the display's aspect ratio, rounded up. A display reporting a
/// zero dimension is a configuration error, caught here before any
/// capture is sized from it.
pub fn resolve_dimensions(
    info: &DisplayInfo,
    requested_width: Option<u32>,
    requested_height: Option<u32>,
) -> Result<(u32, u32), RasterError> {
    if info.width == 0 || info.height == 0 {
        return Err(RasterError::InvalidDimensions {
            width: info.width,
            height: info.height,
        });
    }
    let ceil_div = |n: u64, d: u64| ((n + d - 1) / d) as u32;
    Ok(match (requested_width, requested_height) {
        (Some(w), Some(h)) => (w, h),
        (Some(w), None) => (
            w,
            ceil_div(u64::from(info.height) * u64::from(w), u64::from(info.width)),
        ),
        (None, Some(h)) => (
            ceil_div(u64::from(info.width) * u64::from(h), u64::from(info.height)),
            h,
        ),
        (None, None) => (info.width, info.height),
    })
}
