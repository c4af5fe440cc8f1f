//! Display orientation decoded from the DispmanX transform code.

use crate::RasterError;

/// Horizontal-flip bit of the transform code.
pub const FLIP_HORIZONTAL: u32 = 1 << 16;

/// Vertical-flip bit of the transform code.
pub const FLIP_VERTICAL: u32 = 1 << 17;

/// Physical orientation of the display: a clockwise rotation quadrant
/// plus independent horizontal/vertical mirroring.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Transform {
    quadrant: u8,
    flip_h: bool,
    flip_v: bool,
}

impl Transform {
    /// No rotation, no flips.
    pub const IDENTITY: Self = Self {
        quadrant: 0,
        flip_h: false,
        flip_v: false,
    };

    /// Build a transform from explicit parts. Quadrants outside 0..=3
    /// are a configuration error.
    pub fn new(quadrant: u8, flip_h: bool, flip_v: bool) -> Result<Self, RasterError> {
        if quadrant > 3 {
            return Err(RasterError::InvalidQuadrant(quadrant));
        }
        Ok(Self {
            quadrant,
            flip_h,
            flip_v,
        })
    }

    /// Decode a hardware transform code: low 2 bits are the quadrant,
    /// bits 16/17 the flips. Other bits carry snapshot behaviour flags
    /// and are ignored here.
    #[must_use]
    pub const fn from_code(code: u32) -> Self {
        Self {
            quadrant: (code & 3) as u8,
            flip_h: code & FLIP_HORIZONTAL != 0,
            flip_v: code & FLIP_VERTICAL != 0,
        }
    }

    /// Rotation quadrant, 0..=3 in 90° clockwise steps.
    #[must_use]
    pub const fn quadrant(self) -> u8 {
        self.quadrant
    }

    #[must_use]
    pub const fn flip_horizontal(self) -> bool {
        self.flip_h
    }

    #[must_use]
    pub const fn flip_vertical(self) -> bool {
        self.flip_v
    }

    /// Whether the capture's axes are swapped relative to the output
    /// (true for 90° and 270°).
    #[must_use]
    pub const fn swaps_axes(self) -> bool {
        self.quadrant & 1 == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_quadrant_and_flips() {
        let t = Transform::from_code(2 | FLIP_HORIZONTAL);
        assert_eq!(t.quadrant(), 2);
        assert!(t.flip_horizontal());
        assert!(!t.flip_vertical());
    }

    #[test]
    fn snapshot_flag_bits_are_ignored() {
        // 1<<24 is a snapshot packing flag, not orientation
        let t = Transform::from_code(1 << 24);
        assert_eq!(t, Transform::IDENTITY);
    }

    #[test]
    fn odd_quadrants_swap_axes() {
        assert!(!Transform::from_code(0).swaps_axes());
        assert!(Transform::from_code(1).swaps_axes());
        assert!(!Transform::from_code(2).swaps_axes());
        assert!(Transform::from_code(3).swaps_axes());
    }

    #[test]
    fn reject_out_of_range_quadrant() {
        assert_eq!(
            Transform::new(4, false, false),
            Err(RasterError::InvalidQuadrant(4))
        );
    }
}
