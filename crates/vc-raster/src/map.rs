//! Orientation mapping: destination pixel → source pixel position.
//!
//! The hardware delivers the capture in native composition order while
//! the output wants the display's logical orientation. Instead of
//! rotating through an intermediate buffer, each destination pixel's
//! source position is computed directly. Flips are resolved first, on
//! the destination indices — a horizontal flip always mirrors the final
//! visual left-right axis no matter how the quadrant maps it onto the
//! source buffer — then a single match on the quadrant picks one of
//! four index formulas.
//!
//! For a fixed destination row the source position is affine in the
//! destination column (every formula is `±i + constant` on one axis),
//! so [`SourceMap::row`] probes two columns and the per-pixel loop runs
//! branch-free arithmetic from there.

use crate::RasterError;
use crate::transform::Transform;

/// Maps destination positions to source positions for one capture.
pub struct SourceMap {
    transform: Transform,
    cap_w: u32,
    cap_h: u32,
    out_w: u32,
    out_h: u32,
}

impl SourceMap {
    /// Build the map, validating that the captured dimensions agree
    /// with the output dimensions under the transform: odd quadrants
    /// capture with axes swapped, even quadrants capture 1:1.
    pub fn new(
        transform: Transform,
        cap_w: u32,
        cap_h: u32,
        out_w: u32,
        out_h: u32,
    ) -> Result<Self, RasterError> {
        if out_w == 0 || out_h == 0 {
            return Err(RasterError::InvalidDimensions {
                width: out_w,
                height: out_h,
            });
        }
        let expected = if transform.swaps_axes() {
            (out_h, out_w)
        } else {
            (out_w, out_h)
        };
        if (cap_w, cap_h) != expected {
            return Err(RasterError::DimensionMismatch {
                captured: (cap_w, cap_h),
                output: (out_w, out_h),
            });
        }
        Ok(Self {
            transform,
            cap_w,
            cap_h,
            out_w,
            out_h,
        })
    }

    /// Source (row, col) of the pixel that must appear at destination
    /// column `i`, row `j`.
    #[must_use]
    pub fn source_pos(&self, i: u32, j: u32) -> (u32, u32) {
        let i = if self.transform.flip_horizontal() {
            self.out_w - 1 - i
        } else {
            i
        };
        let j = if self.transform.flip_vertical() {
            self.out_h - 1 - j
        } else {
            j
        };
        match self.transform.quadrant() {
            // native order
            0 => (j, i),
            // 90° cw: destination columns walk source rows upward
            1 => (self.cap_h - 1 - i, j),
            // 180°: both axes reversed
            2 => (self.cap_h - 1 - j, self.cap_w - 1 - i),
            // 270° cw: destination columns walk source rows downward
            _ => (i, self.cap_w - 1 - j),
        }
    }

    /// Resolve destination row `j` once; the returned map is pure
    /// affine arithmetic per column.
    #[must_use]
    pub fn row(&self, j: u32) -> RowMap {
        let (row0, col0) = self.source_pos(0, j);
        let (row_step, col_step) = if self.out_w > 1 {
            let (row1, col1) = self.source_pos(1, j);
            (
                i64::from(row1) - i64::from(row0),
                i64::from(col1) - i64::from(col0),
            )
        } else {
            (0, 0)
        };
        RowMap {
            row0,
            col0,
            row_step,
            col_step,
        }
    }
}

/// Source positions for one destination row: exactly one of the two
/// axes varies with the destination column, by ±1 per step.
pub struct RowMap {
    row0: u32,
    col0: u32,
    row_step: i64,
    col_step: i64,
}

impl RowMap {
    /// Source (row, col) for destination column `i` of this row.
    #[must_use]
    pub fn pos(&self, i: u32) -> (u32, u32) {
        (
            (i64::from(self.row0) + i64::from(i) * self.row_step) as u32,
            (i64::from(self.col0) + i64::from(i) * self.col_step) as u32,
        )
    }
}
