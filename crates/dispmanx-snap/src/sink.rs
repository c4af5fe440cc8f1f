//! PNG sink: encode the assembled raster.

use std::error::Error;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use vc_raster::{ColorMode, OutputRaster};

/// Map a 0-9 compression level onto the encoder's presets. The core
/// passes this through untouched; only the encoder interprets it.
fn compression(level: Option<u8>) -> png::Compression {
    match level {
        Some(0..=3) => png::Compression::Fast,
        Some(7..=9) => png::Compression::Best,
        _ => png::Compression::Default,
    }
}

/// Encode the raster as an 8-bit PNG into `w`.
///
/// The color type is fixed from the raster's mode before any scanline
/// is written; rows are emitted in increasing order.
pub fn write_png<W: Write>(
    w: W,
    raster: &OutputRaster,
    level: Option<u8>,
) -> Result<(), Box<dyn Error>> {
    let mut encoder = png::Encoder::new(w, raster.width(), raster.height());
    encoder.set_color(match raster.mode() {
        ColorMode::Rgb => png::ColorType::Rgb,
        ColorMode::Rgba => png::ColorType::Rgba,
    });
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(compression(level));
    let mut writer = encoder.write_header()?;
    writer.write_image_data(raster.data())?;
    Ok(())
}

/// Encode the raster into a file at `path`.
pub fn save_png(path: &Path, raster: &OutputRaster, level: Option<u8>) -> Result<(), Box<dyn Error>> {
    let file = fs::File::create(path)?;
    write_png(BufWriter::new(file), raster, level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vc_raster::OutputRaster;

    #[test]
    fn encodes_a_decodable_png() {
        let raster = OutputRaster::new(2, 2, ColorMode::Rgb);
        let mut bytes = Vec::new();
        write_png(&mut bytes, &raster, Some(9)).expect("encode");

        let decoder = png::Decoder::new(bytes.as_slice());
        let mut reader = decoder.read_info().expect("decode");
        let info = reader.info();
        assert_eq!((info.width, info.height), (2, 2));
        assert_eq!(info.color_type, png::ColorType::Rgb);
        assert_eq!(info.bit_depth, png::BitDepth::Eight);

        let mut buf = vec![0; reader.output_buffer_size()];
        let frame = reader.next_frame(&mut buf).expect("frame");
        assert_eq!(&buf[..frame.buffer_size()], raster.data());
    }
}
