//! VideoCore pixel formats and 8-bit channel expansion.
//!
//! The 16-bit formats are little-endian words with red in the high bits,
//! matching VideoCore resource layout. Sub-8-bit channels expand by bit
//! replication (high bits copied into the vacated low bits), the same
//! expansion display hardware applies: 5-bit 0 → 0, 5-bit 31 → 255, with
//! no rounding drift in between.

/// Pixel encoding of a captured raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// 16-bit 5-6-5, opaque.
    Rgb565,
    /// 16-bit 4-4-4-4 with alpha.
    Rgba4444,
    /// 24-bit, one byte per channel, opaque.
    Rgb888,
    /// 32-bit, one byte per channel, with alpha.
    Rgba8888,
}

/// Channel layout of the assembled output raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Rgb,
    Rgba,
}

impl ColorMode {
    /// Bytes per output pixel.
    #[must_use]
    pub const fn channels(self) -> usize {
        match self {
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }
}

/// Replicate a 5-bit channel into 8 bits.
const fn expand5(v: u8) -> u8 {
    (v << 3) | (v >> 2)
}

/// Replicate a 6-bit channel into 8 bits.
const fn expand6(v: u8) -> u8 {
    (v << 2) | (v >> 4)
}

/// Replicate a 4-bit channel into 8 bits.
const fn expand4(v: u8) -> u8 {
    (v << 4) | v
}

impl PixelFormat {
    /// All formats a capture can be requested in, in CLI listing order.
    pub const ALL: [Self; 4] = [Self::Rgb565, Self::Rgba4444, Self::Rgb888, Self::Rgba8888];

    /// Bytes per pixel in the captured buffer.
    #[must_use]
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Rgb565 | Self::Rgba4444 => 2,
            Self::Rgb888 => 3,
            Self::Rgba8888 => 4,
        }
    }

    /// Whether the format carries an alpha channel.
    #[must_use]
    pub const fn has_alpha(self) -> bool {
        matches!(self, Self::Rgba4444 | Self::Rgba8888)
    }

    /// Name used on the command line and in diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Rgb565 => "RGB565",
            Self::Rgba4444 => "RGBA4444",
            Self::Rgb888 => "RGB888",
            Self::Rgba8888 => "RGBA8888",
        }
    }

    /// Look up a format by its CLI name. An unknown name is a
    /// configuration error the caller reports before any capture.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.name() == name)
    }

    /// Decode one pixel into 8-bit RGBA channels.
    ///
    /// `raw` must hold [`bytes_per_pixel`](Self::bytes_per_pixel) bytes.
    /// Opaque formats report alpha 0xFF so callers can copy 3 or 4
    /// channels without branching on the format.
    #[must_use]
    pub fn decode(self, raw: &[u8]) -> [u8; 4] {
        match self {
            Self::Rgb565 => {
                let word = u16::from_le_bytes([raw[0], raw[1]]);
                [
                    expand5((word >> 11) as u8),
                    expand6(((word >> 5) & 0x3F) as u8),
                    expand5((word & 0x1F) as u8),
                    0xFF,
                ]
            }
            Self::Rgba4444 => {
                let word = u16::from_le_bytes([raw[0], raw[1]]);
                [
                    expand4((word >> 12) as u8),
                    expand4(((word >> 8) & 0xF) as u8),
                    expand4(((word >> 4) & 0xF) as u8),
                    expand4((word & 0xF) as u8),
                ]
            }
            Self::Rgb888 => [raw[0], raw[1], raw[2], 0xFF],
            Self::Rgba8888 => [raw[0], raw[1], raw[2], raw[3]],
        }
    }
}
