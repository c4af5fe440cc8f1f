//! Captured and assembled raster buffers.
//!
//! VideoCore pads capture rows to a 16-pixel boundary, so a row is
//! `pitch` bytes long and `pitch` may exceed `bytes_per_pixel * width`.
//! All reads go through the bounded [`CapturedRaster::pixel`] accessor;
//! nothing in this crate does raw offset arithmetic into the buffer.

use crate::format::{ColorMode, PixelFormat};
use crate::RasterError;

/// VideoCore row alignment, in pixels.
const ROW_ALIGN: u32 = 16;

/// Row pitch for a capture of the given width: bytes per pixel times the
/// width rounded up to the 16-pixel boundary.
#[must_use]
pub const fn aligned_pitch(format: PixelFormat, width: u32) -> usize {
    let aligned = (width + (ROW_ALIGN - 1)) & !(ROW_ALIGN - 1);
    format.bytes_per_pixel() * aligned as usize
}

/// One raw frame read back from the display, in native composition
/// orientation. Owned by a single capture-to-file run.
pub struct CapturedRaster {
    data: Vec<u8>,
    width: u32,
    height: u32,
    pitch: usize,
    format: PixelFormat,
}

impl CapturedRaster {
    /// Wrap a raw capture buffer, validating dimensions, pitch and
    /// buffer length before anything reads from it.
    pub fn new(
        data: Vec<u8>,
        width: u32,
        height: u32,
        pitch: usize,
        format: PixelFormat,
    ) -> Result<Self, RasterError> {
        if width == 0 || height == 0 {
            return Err(RasterError::InvalidDimensions { width, height });
        }
        let min_pitch = format.bytes_per_pixel() * width as usize;
        if pitch < min_pitch {
            return Err(RasterError::PitchTooSmall {
                pitch,
                min: min_pitch,
            });
        }
        let need = pitch * height as usize;
        if data.len() < need {
            return Err(RasterError::BufferTooSmall {
                len: data.len(),
                need,
            });
        }
        Ok(Self {
            data,
            width,
            height,
            pitch,
            format,
        })
    }

    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub const fn pitch(&self) -> usize {
        self.pitch
    }

    #[must_use]
    pub const fn format(&self) -> PixelFormat {
        self.format
    }

    /// Raw bytes of the pixel at (`row`, `col`) in capture orientation.
    ///
    /// # Panics
    ///
    /// Panics if the position is out of range — reads can never land in
    /// row padding or off the end of the buffer.
    #[must_use]
    pub fn pixel(&self, row: u32, col: u32) -> &[u8] {
        assert!(row < self.height && col < self.width, "pixel out of range");
        let bpp = self.format.bytes_per_pixel();
        let start = row as usize * self.pitch + col as usize * bpp;
        &self.data[start..start + bpp]
    }
}

/// The canonical 8-bit-per-channel raster in logical orientation,
/// written once row by row and then handed to the PNG sink.
pub struct OutputRaster {
    data: Vec<u8>,
    width: u32,
    height: u32,
    mode: ColorMode,
}

impl OutputRaster {
    /// Allocate a zeroed output buffer. This is the single allocation
    /// the assembly pass performs.
    #[must_use]
    pub fn new(width: u32, height: u32, mode: ColorMode) -> Self {
        let pitch = mode.channels() * width as usize;
        Self {
            data: vec![0; pitch * height as usize],
            width,
            height,
            mode,
        }
    }

    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub const fn mode(&self) -> ColorMode {
        self.mode
    }

    /// Output row length in bytes. Unpadded: the sink takes rows back
    /// to back.
    #[must_use]
    pub const fn pitch(&self) -> usize {
        self.mode.channels() * self.width as usize
    }

    /// One finished scanline.
    #[must_use]
    pub fn row(&self, j: u32) -> &[u8] {
        let pitch = self.pitch();
        let start = j as usize * pitch;
        &self.data[start..start + pitch]
    }

    pub(crate) fn row_mut(&mut self, j: u32) -> &mut [u8] {
        let pitch = self.pitch();
        let start = j as usize * pitch;
        &mut self.data[start..start + pitch]
    }

    /// The whole raster, rows in increasing order.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pitch_alignment() {
        // 1920 is already a multiple of 16; 1366 rounds up to 1376
        assert_eq!(aligned_pitch(PixelFormat::Rgb888, 1920), 3 * 1920);
        assert_eq!(aligned_pitch(PixelFormat::Rgb888, 1366), 3 * 1376);
        assert_eq!(aligned_pitch(PixelFormat::Rgb565, 1), 2 * 16);
    }

    #[test]
    fn reject_zero_dimensions() {
        let err = CapturedRaster::new(vec![], 0, 4, 16, PixelFormat::Rgb565).err();
        assert_eq!(
            err,
            Some(RasterError::InvalidDimensions {
                width: 0,
                height: 4
            })
        );
    }

    #[test]
    fn reject_short_pitch_and_buffer() {
        let err = CapturedRaster::new(vec![0; 64], 4, 4, 6, PixelFormat::Rgb888).err();
        assert_eq!(err, Some(RasterError::PitchTooSmall { pitch: 6, min: 12 }));

        let err = CapturedRaster::new(vec![0; 10], 4, 4, 16, PixelFormat::Rgb888).err();
        assert_eq!(err, Some(RasterError::BufferTooSmall { len: 10, need: 64 }));
    }

    #[test]
    fn pixel_accessor_skips_padding() {
        // 2x2 RGB565 with pitch 8: bytes 4..8 of each row are padding
        let data = vec![
            1, 2, 3, 4, 0xEE, 0xEE, 0xEE, 0xEE, //
            5, 6, 7, 8, 0xEE, 0xEE, 0xEE, 0xEE,
        ];
        let raster = CapturedRaster::new(data, 2, 2, 8, PixelFormat::Rgb565).expect("valid");
        assert_eq!(raster.pixel(0, 0), &[1, 2]);
        assert_eq!(raster.pixel(0, 1), &[3, 4]);
        assert_eq!(raster.pixel(1, 0), &[5, 6]);
        assert_eq!(raster.pixel(1, 1), &[7, 8]);
    }

    #[test]
    #[should_panic(expected = "pixel out of range")]
    fn pixel_accessor_rejects_out_of_range() {
        let raster =
            CapturedRaster::new(vec![0; 32], 2, 2, 8, PixelFormat::Rgb565).expect("valid");
        let _ = raster.pixel(0, 2);
    }

    #[test]
    fn output_rows_are_unpadded() {
        let out = OutputRaster::new(3, 2, ColorMode::Rgba);
        assert_eq!(out.pitch(), 12);
        assert_eq!(out.data().len(), 24);
        assert_eq!(out.row(1).len(), 12);
    }
}
