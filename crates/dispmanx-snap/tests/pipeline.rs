//! End-to-end: synthetic frame source → assemble → PNG encode → decode.

use std::error::Error;

use dispmanx_snap::sink;
use dispmanx_snap::source::{DisplayInfo, FrameSource, resolve_dimensions};
use vc_raster::{CapturedRaster, PixelFormat, Transform, aligned_pitch, assemble};

/// In-memory stand-in for the DispmanX display: a fixed gradient
/// pattern behind the same capture contract as the hardware source.
struct PatternSource {
    info: DisplayInfo,
}

impl FrameSource for PatternSource {
    fn display_info(&mut self) -> Result<DisplayInfo, Box<dyn Error>> {
        Ok(self.info)
    }

    fn capture(
        &mut self,
        format: PixelFormat,
        width: u32,
        height: u32,
    ) -> Result<CapturedRaster, Box<dyn Error>> {
        let transform = Transform::from_code(self.info.transform_code);
        let (cap_w, cap_h) = if transform.swaps_axes() {
            (height, width)
        } else {
            (width, height)
        };
        let bpp = format.bytes_per_pixel();
        let pitch = aligned_pitch(format, cap_w);
        // padding stays 0xEE so leaks are visible in the output
        let mut data = vec![0xEE; pitch * cap_h as usize];
        for row in 0..cap_h {
            for col in 0..cap_w {
                let value = (row * cap_w + col) as u8;
                let start = row as usize * pitch + col as usize * bpp;
                for b in &mut data[start..start + bpp] {
                    *b = value;
                }
            }
        }
        Ok(CapturedRaster::new(data, cap_w, cap_h, pitch, format)?)
    }
}

#[test]
fn capture_to_png_round_trip() {
    let mut source = PatternSource {
        info: DisplayInfo {
            width: 8,
            height: 4,
            transform_code: 0,
        },
    };

    let info = source.display_info().expect("info");
    let (width, height) = resolve_dimensions(&info, None, None).expect("dimensions");
    let captured = source
        .capture(PixelFormat::Rgba8888, width, height)
        .expect("capture");
    let raster = assemble(
        &captured,
        Transform::from_code(info.transform_code),
        width,
        height,
        true,
    )
    .expect("assemble");

    let mut png_bytes = Vec::new();
    sink::write_png(&mut png_bytes, &raster, None).expect("encode");

    let decoder = png::Decoder::new(png_bytes.as_slice());
    let mut reader = decoder.read_info().expect("decode");
    assert_eq!(reader.info().color_type, png::ColorType::Rgba);
    let mut buf = vec![0; reader.output_buffer_size()];
    let frame = reader.next_frame(&mut buf).expect("frame");
    let pixels = &buf[..frame.buffer_size()];

    // RGBA8888 decodes as identity, so every channel of pixel n is n
    assert_eq!(pixels.len(), 8 * 4 * 4);
    for (n, px) in pixels.chunks_exact(4).enumerate() {
        assert_eq!(px, [n as u8; 4]);
    }
}

#[test]
fn rotated_display_round_trip() {
    // a display rotated 90°: logical size 4x8, captured 8x4
    let mut source = PatternSource {
        info: DisplayInfo {
            width: 4,
            height: 8,
            transform_code: 1,
        },
    };

    let info = source.display_info().expect("info");
    let (width, height) = resolve_dimensions(&info, None, None).expect("dimensions");
    assert_eq!((width, height), (4, 8));

    let captured = source
        .capture(PixelFormat::Rgb888, width, height)
        .expect("capture");
    assert_eq!((captured.width(), captured.height()), (8, 4));

    let raster = assemble(
        &captured,
        Transform::from_code(info.transform_code),
        width,
        height,
        false,
    )
    .expect("assemble");

    let mut png_bytes = Vec::new();
    sink::write_png(&mut png_bytes, &raster, Some(9)).expect("encode");

    let decoder = png::Decoder::new(png_bytes.as_slice());
    let mut reader = decoder.read_info().expect("decode");
    let mut buf = vec![0; reader.output_buffer_size()];
    let frame = reader.next_frame(&mut buf).expect("frame");
    let pixels = &buf[..frame.buffer_size()];

    // destination (i, j) reads source (row 3-i, col j) under the
    // quarter turn; pattern value is row * 8 + col
    for j in 0..8u32 {
        for i in 0..4u32 {
            let value = ((3 - i) * 8 + j) as u8;
            let at = ((j * 4 + i) * 3) as usize;
            assert_eq!(&pixels[at..at + 3], [value; 3]);
        }
    }

    // the 0xEE padding sentinel never reaches the output
    assert!(!pixels.contains(&0xEE));
}
