//! Raster assembly: one pass over the output space.

use crate::RasterError;
use crate::format::ColorMode;
use crate::map::SourceMap;
use crate::raster::{CapturedRaster, OutputRaster};
use crate::transform::Transform;

/// Convert a captured raster into the canonical output raster.
///
/// Walks destination rows in increasing order (the order the PNG sink
/// requires), resolving each pixel's source position through the
/// orientation map and expanding it to 8-bit channels. Cost is one
/// visit per output pixel regardless of the capture orientation.
///
/// The output carries alpha only when the source format has it and
/// `keep_alpha` is set; otherwise the alpha channel is dropped.
pub fn assemble(
    captured: &CapturedRaster,
    transform: Transform,
    out_width: u32,
    out_height: u32,
    keep_alpha: bool,
) -> Result<OutputRaster, RasterError> {
    let format = captured.format();
    let mode = if format.has_alpha() && keep_alpha {
        ColorMode::Rgba
    } else {
        ColorMode::Rgb
    };
    let map = SourceMap::new(
        transform,
        captured.width(),
        captured.height(),
        out_width,
        out_height,
    )?;

    let mut out = OutputRaster::new(out_width, out_height, mode);
    let channels = mode.channels();
    for j in 0..out_height {
        let row_map = map.row(j);
        let row = out.row_mut(j);
        for i in 0..out_width {
            let (src_row, src_col) = row_map.pos(i);
            let pixel = format.decode(captured.pixel(src_row, src_col));
            let at = i as usize * channels;
            row[at..at + channels].copy_from_slice(&pixel[..channels]);
        }
    }
    Ok(out)
}
